//! Reading generated programs back.
//!
//! A generated test case is a single text blob holding several source units,
//! each introduced by a `==== Source: <path> ====` header. Consumers that feed
//! units to a front-end as separate files need them split apart, and tests
//! need the declarations inside them. [`Program::parse`] does both for the
//! subset of the language this crate emits.

use chumsky::ParseResult;
use chumsky::prelude::*;

pub type Extra<'src> = extra::Err<Rich<'src, char>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program<'src> {
    pub units: Vec<SourceUnit<'src>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit<'src> {
    pub path: &'src str,
    pub items: Vec<Item<'src>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item<'src> {
    /// The imported path.
    Import(&'src str),
    /// The whole directive, e.g. `pragma abicoder v2;`.
    Pragma(&'src str),
    Contract(Contract<'src>),
    Function(Function<'src>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contract<'src> {
    pub name: &'src str,
    pub functions: Vec<Function<'src>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Function<'src> {
    pub name: &'src str,
    pub public: bool,
}

impl<'src> Program<'src> {
    pub fn parse(src: &'src str) -> ParseResult<Program<'src>, Rich<'src, char>> {
        program().parse(src)
    }
}

impl<'src> SourceUnit<'src> {
    pub fn imports(&self) -> impl Iterator<Item = &'src str> + '_ {
        self.items.iter().filter_map(|item| match item {
            Item::Import(path) => Some(*path),
            _ => None,
        })
    }

    pub fn pragmas(&self) -> impl Iterator<Item = &'src str> + '_ {
        self.items.iter().filter_map(|item| match item {
            Item::Pragma(pragma) => Some(*pragma),
            _ => None,
        })
    }

    pub fn contracts(&self) -> impl Iterator<Item = &Contract<'src>> {
        self.items.iter().filter_map(|item| match item {
            Item::Contract(contract) => Some(contract),
            _ => None,
        })
    }

    /// Functions declared outside any contract.
    pub fn free_functions(&self) -> impl Iterator<Item = &Function<'src>> {
        self.items.iter().filter_map(|item| match item {
            Item::Function(function) => Some(function),
            _ => None,
        })
    }
}

fn function<'src>() -> impl Parser<'src, &'src str, Function<'src>, Extra<'src>> {
    just("function")
        .ignore_then(text::ascii::ident().padded())
        .then_ignore(just("()"))
        .then(just("public").padded().or_not().map(|v| v.is_some()))
        .then_ignore(just("pure").padded())
        .then_ignore(just("{}"))
        .map(|(name, public)| Function { name, public })
}

fn item<'src>() -> impl Parser<'src, &'src str, Item<'src>, Extra<'src>> {
    let import = just("import")
        .padded()
        .ignore_then(
            none_of("\"")
                .repeated()
                .to_slice()
                .delimited_by(just('"'), just('"')),
        )
        .then_ignore(just(';'))
        .map(Item::Import);

    let pragma = just("pragma")
        .then(none_of(";").repeated())
        .then(just(';'))
        .to_slice()
        .map(Item::Pragma);

    let contract = just("contract")
        .padded()
        .ignore_then(text::ascii::ident())
        .then(
            function()
                .padded()
                .repeated()
                .collect::<Vec<_>>()
                .delimited_by(just('{').padded(), just('}')),
        )
        .map(|(name, functions)| Item::Contract(Contract { name, functions }));

    choice((import, pragma, contract, function().map(Item::Function))).padded()
}

fn program<'src>() -> impl Parser<'src, &'src str, Program<'src>, Extra<'src>> {
    let header = just("==== Source:")
        .padded()
        .ignore_then(none_of(" \n").repeated().to_slice())
        .then_ignore(just(" ===="));

    let unit = header
        .padded()
        .then(item().repeated().collect::<Vec<_>>())
        .map(|(path, items)| SourceUnit { path, items });

    unit.repeated()
        .collect::<Vec<_>>()
        .padded()
        .then_ignore(end())
        .map(|units| Program { units })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
==== Source: su0.sol ====
pragma abicoder v1;
pragma solidity >= 0.0.0;
contract C0 {
    function f0() pure {}
    function f1() pure {}
}
function f2() public pure {}

==== Source: su1.sol ====
import "su0.sol";
function f0() public pure {}
contract C0 {
}
"#;

    #[test]
    fn parse_units() {
        let program = Program::parse(SAMPLE).into_result().unwrap();
        assert_eq!(
            program,
            Program {
                units: vec![
                    SourceUnit {
                        path: "su0.sol",
                        items: vec![
                            Item::Pragma("pragma abicoder v1;"),
                            Item::Pragma("pragma solidity >= 0.0.0;"),
                            Item::Contract(Contract {
                                name: "C0",
                                functions: vec![
                                    Function {
                                        name: "f0",
                                        public: false
                                    },
                                    Function {
                                        name: "f1",
                                        public: false
                                    },
                                ],
                            }),
                            Item::Function(Function {
                                name: "f2",
                                public: true
                            }),
                        ],
                    },
                    SourceUnit {
                        path: "su1.sol",
                        items: vec![
                            Item::Import("su0.sol"),
                            Item::Function(Function {
                                name: "f0",
                                public: true
                            }),
                            Item::Contract(Contract {
                                name: "C0",
                                functions: vec![],
                            }),
                        ],
                    },
                ],
            }
        );
    }

    #[test]
    fn accessors() {
        let program = Program::parse(SAMPLE).into_result().unwrap();
        let [first, second] = &program.units[..] else {
            panic!("expected two units");
        };
        assert_eq!(first.imports().count(), 0);
        assert_eq!(first.pragmas().count(), 2);
        assert_eq!(first.contracts().count(), 1);
        assert_eq!(first.free_functions().count(), 1);
        assert_eq!(second.imports().collect::<Vec<_>>(), vec!["su0.sol"]);
    }

    #[test]
    fn parse_empty() {
        let program = Program::parse("").into_result().unwrap();
        assert_eq!(program, Program { units: vec![] });
    }

    #[test]
    fn reject_malformed() {
        assert!(Program::parse("contract C0 {}").has_errors());
        assert!(Program::parse("\n==== Source: a.sol ====\nimport a.sol;\n").has_errors());
        assert!(
            Program::parse("\n==== Source: a.sol ====\ncontract C {\n function f() pure {}\n")
                .has_errors()
        );
    }
}
