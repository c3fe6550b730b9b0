//! The productions of the grammar.
//!
//! ```text
//! TestCase   := SourceUnit{1,max_source_units}
//! SourceUnit := header (Import{..max_imports} | Pragma | Contract | Function{..max_free_functions})*
//! Contract   := "contract" name "{" Function{..max_functions} "}"
//! ```
//!
//! The children of a source unit and a contract are visited in a random
//! order, so the `*` above is a shuffle of the listed alternatives rather
//! than a sequence.

use crate::{
    ABI_CODER_PRAGMAS, Config, Error, GENERIC_PRAGMAS,
    generator::{Context, Edge, Generator, Kind, visit_children},
};
use itertools::Itertools;
use std::cell::Cell;
use tracing::warn;

fn indentation(level: u32) -> String {
    "    ".repeat(level as usize)
}

/// Root production.
#[derive(Debug, Default)]
pub struct TestCaseGenerator {
    children: Vec<Edge>,
}

impl Generator for TestCaseGenerator {
    fn kind(&self) -> Kind {
        Kind::TestCase
    }

    fn setup(&mut self, config: &Config) -> Result<(), Error> {
        self.children = vec![Edge::new(
            self.kind(),
            Kind::SourceUnit,
            config.max_source_units,
        )?];
        Ok(())
    }

    fn children(&self) -> &[Edge] {
        &self.children
    }

    fn visit(&self, cx: &mut Context<'_>) -> Result<String, Error> {
        visit_children(&self.children, cx)
    }
}

#[derive(Debug, Default)]
pub struct SourceUnitGenerator {
    children: Vec<Edge>,
}

impl Generator for SourceUnitGenerator {
    fn kind(&self) -> Kind {
        Kind::SourceUnit
    }

    fn setup(&mut self, config: &Config) -> Result<(), Error> {
        let kind = self.kind();
        self.children = vec![
            Edge::new(kind, Kind::Import, config.max_imports)?,
            Edge::new(kind, Kind::Pragma, 1)?,
            Edge::new(kind, Kind::Contract, 1)?,
            Edge::new(kind, Kind::Function, config.max_free_functions)?,
        ];
        Ok(())
    }

    fn children(&self) -> &[Edge] {
        &self.children
    }

    fn visit(&self, cx: &mut Context<'_>) -> Result<String, Error> {
        let path = cx.state.add_source_unit();
        let body = visit_children(&self.children, cx)?;
        Ok(format!("\n==== Source: {path} ====\n{body}"))
    }
}

#[derive(Debug, Default)]
pub struct PragmaGenerator;

impl Generator for PragmaGenerator {
    fn kind(&self) -> Kind {
        Kind::Pragma
    }

    fn visit(&self, cx: &mut Context<'_>) -> Result<String, Error> {
        let mut pragmas = cx.random.subset(GENERIC_PRAGMAS);
        // Exactly one ABI coder, never both.
        let abi = cx.random.uniform(ABI_CODER_PRAGMAS.len() as u32) as usize - 1;
        pragmas.push(ABI_CODER_PRAGMAS[abi]);
        Ok(pragmas.into_iter().sorted().join("\n") + "\n")
    }
}

#[derive(Debug, Default)]
pub struct ImportGenerator;

impl Generator for ImportGenerator {
    fn kind(&self) -> Kind {
        Kind::Import
    }

    /// Imports some other, not yet imported, source unit. Emits nothing
    /// when there is no such unit.
    fn visit(&self, cx: &mut Context<'_>) -> Result<String, Error> {
        if cx.state.len() < 2 {
            return Ok(String::new());
        }
        let path = cx.state.random_other_path(&mut cx.random)?;
        if cx.state.add_import(&path)? {
            Ok(format!("import \"{path}\";\n"))
        } else {
            Ok(String::new())
        }
    }
}

#[derive(Debug, Default)]
pub struct ContractGenerator {
    children: Vec<Edge>,
}

impl ContractGenerator {
    /// Runs `body` one indentation level deeper with functions generated as
    /// members. Both are undone once `body` returns, whether it succeeded
    /// or not.
    pub fn member_scope<T>(
        &self,
        cx: &mut Context<'_>,
        body: impl FnOnce(&mut Context<'_>) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let registry = cx.registry;
        let function = registry.generator::<FunctionGenerator>();
        cx.state.indent()?;
        function.set_scope(Scope::Member);

        let result = body(cx);

        function.set_scope(Scope::Free);
        let restored = cx.state.unindent();
        match (result, restored) {
            (Ok(value), Ok(())) => Ok(value),
            (Err(err), Ok(())) => Err(err),
            (Ok(_), Err(err)) => Err(err),
            (Err(err), Err(unindent)) => {
                warn!(%unindent, "could not restore indentation after failed contract body");
                Err(err)
            }
        }
    }
}

impl Generator for ContractGenerator {
    fn kind(&self) -> Kind {
        Kind::Contract
    }

    fn setup(&mut self, config: &Config) -> Result<(), Error> {
        self.children = vec![Edge::new(self.kind(), Kind::Function, config.max_functions)?];
        Ok(())
    }

    fn children(&self) -> &[Edge] {
        &self.children
    }

    fn visit(&self, cx: &mut Context<'_>) -> Result<String, Error> {
        let name = cx.state.new_contract_name()?;
        let indent = indentation(cx.state.indentation()?);
        let body = self.member_scope(cx, |cx| visit_children(&self.children, cx))?;
        Ok(format!("{indent}contract {name} {{\n{body}{indent}}}\n"))
    }
}

/// Where a function is being declared.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// At source unit level, declared `public`.
    #[default]
    Free,
    /// Inside a contract, no visibility.
    Member,
}

#[derive(Debug, Default)]
pub struct FunctionGenerator {
    scope: Cell<Scope>,
}

impl FunctionGenerator {
    pub fn scope(&self) -> Scope {
        self.scope.get()
    }

    pub fn set_scope(&self, scope: Scope) {
        self.scope.set(scope);
    }
}

impl Generator for FunctionGenerator {
    fn kind(&self) -> Kind {
        Kind::Function
    }

    fn visit(&self, cx: &mut Context<'_>) -> Result<String, Error> {
        let name = cx.state.new_function_name()?;
        let indent = indentation(cx.state.indentation()?);
        let visibility = match self.scope() {
            Scope::Free => " public",
            Scope::Member => "",
        };
        Ok(format!("{indent}function {name}(){visibility} pure {{}}\n"))
    }
}
