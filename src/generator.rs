//! Weighted recursive descent over the grammar.
//!
//! Each production of the grammar is a [`Generator`]. Composite generators
//! declare their children once in [`Generator::setup`] as a list of
//! [`Edge`]s, each bounding how many times the child may fire, and splice
//! randomized child output into their own text with [`visit_children`].
//!
//! Children are referred to by [`Kind`] rather than by pointer. The
//! [`Registry`] owns exactly one generator per kind and resolves kinds
//! during traversal, so the grammar is a graph over a closed vertex set
//! with no ownership between generators.

use crate::{
    Config, Error, random::RandomSource, registry::Registry, state::GenerationState,
};
use tracing::trace;

/// The closed set of productions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    TestCase,
    SourceUnit,
    Pragma,
    Import,
    Contract,
    Function,
}

impl Kind {
    /// Every kind, in the order generators are built and set up.
    pub const ALL: [Kind; 6] = [
        Kind::TestCase,
        Kind::SourceUnit,
        Kind::Pragma,
        Kind::Import,
        Kind::Contract,
        Kind::Function,
    ];
}

/// A weighted reference from a parent production to a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    kind: Kind,
    max_repeat: u32,
}

impl Edge {
    pub fn new(parent: Kind, child: Kind, max_repeat: u32) -> Result<Self, Error> {
        if max_repeat == 0 {
            Err(Error::ZeroWeight { parent, child })
        } else if max_repeat.checked_add(1).is_none() {
            // Inclusion is drawn as 1 in `max_repeat + 1`.
            Err(Error::WeightOverflow { parent, child })
        } else {
            Ok(Edge {
                kind: child,
                max_repeat,
            })
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn max_repeat(&self) -> u32 {
        self.max_repeat
    }
}

/// Everything a generator may read or mutate while visiting.
///
/// One context lives for exactly one run and is threaded by `&mut` through
/// every visit.
pub struct Context<'r> {
    pub registry: &'r Registry,
    pub random: RandomSource,
    pub state: GenerationState,
}

impl<'r> Context<'r> {
    pub fn new(registry: &'r Registry, seed: u64) -> Self {
        Context {
            registry,
            random: RandomSource::new(seed),
            state: GenerationState::new(),
        }
    }
}

/// A grammar production.
pub trait Generator {
    fn kind(&self) -> Kind;

    /// Declares this production's children. Called once per run, before any
    /// visit. Leaves keep the default.
    fn setup(&mut self, _config: &Config) -> Result<(), Error> {
        Ok(())
    }

    fn children(&self) -> &[Edge] {
        &[]
    }

    /// Produces this production's text.
    fn visit(&self, cx: &mut Context<'_>) -> Result<String, Error>;

    fn generate(&self, cx: &mut Context<'_>) -> Result<String, Error> {
        trace!(kind = ?self.kind(), "generate");
        self.visit(cx)
    }
}

/// Visits `children` in a random order.
///
/// Each child fires with probability `1 / (max_repeat + 1)`, and when it
/// does, it is generated between one and `max_repeat` times. The output of
/// every generation is concatenated in visit order.
pub fn visit_children(children: &[Edge], cx: &mut Context<'_>) -> Result<String, Error> {
    let mut order = children.to_vec();
    cx.random.shuffle(&mut order);

    let mut out = String::new();
    for edge in order {
        if !cx.random.likely(edge.max_repeat + 1) {
            trace!(kind = ?edge.kind, "skipped");
            continue;
        }
        let repeat = cx.random.uniform(edge.max_repeat);
        trace!(kind = ?edge.kind, repeat, "included");
        let registry = cx.registry;
        for _ in 0..repeat {
            out += &registry.lookup(edge.kind).generate(cx)?;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{Context, Edge, Kind, visit_children};
    use crate::{Config, Error, registry::Registry};
    use pretty_assertions::assert_eq;

    fn registry(config: &Config) -> Registry {
        let mut registry = Registry::build();
        registry.setup(config).unwrap();
        registry
    }

    #[test]
    fn bad_weights_rejected() {
        assert_eq!(
            Edge::new(Kind::Contract, Kind::Function, 0),
            Err(Error::ZeroWeight {
                parent: Kind::Contract,
                child: Kind::Function
            })
        );
        assert_eq!(
            Edge::new(Kind::TestCase, Kind::SourceUnit, u32::MAX),
            Err(Error::WeightOverflow {
                parent: Kind::TestCase,
                child: Kind::SourceUnit
            })
        );
        let edge = Edge::new(Kind::Contract, Kind::Function, 3).unwrap();
        assert_eq!(edge.kind(), Kind::Function);
        assert_eq!(edge.max_repeat(), 3);
    }

    #[test]
    fn no_children_no_output() {
        let config = Config::default();
        let registry = registry(&config);
        let mut cx = Context::new(&registry, 0);
        assert_eq!(visit_children(&[], &mut cx), Ok(String::new()));
    }

    #[test]
    fn repetitions_bounded_by_weight() {
        let config = Config::default();
        let registry = registry(&config);
        let edges = [Edge::new(Kind::TestCase, Kind::Function, 3).unwrap()];
        for seed in 0..200 {
            let mut cx = Context::new(&registry, seed);
            cx.state.add_source_unit();
            let out = visit_children(&edges, &mut cx).unwrap();
            assert!(out.lines().count() <= 3);
        }
    }

    #[test]
    fn both_presence_and_absence_occur() {
        let config = Config::default();
        let registry = registry(&config);
        let edges = [Edge::new(Kind::TestCase, Kind::Function, 1).unwrap()];
        let outputs = (0..100)
            .map(|seed| {
                let mut cx = Context::new(&registry, seed);
                cx.state.add_source_unit();
                visit_children(&edges, &mut cx).unwrap()
            })
            .collect::<Vec<_>>();
        assert!(outputs.iter().any(String::is_empty));
        assert!(outputs.iter().any(|out| !out.is_empty()));
    }

    #[test]
    fn order_is_randomized() {
        let config = Config::default();
        let registry = registry(&config);
        let edges = [
            Edge::new(Kind::TestCase, Kind::Pragma, 1).unwrap(),
            Edge::new(Kind::TestCase, Kind::Function, 1).unwrap(),
        ];
        let mut pragma_first = false;
        let mut function_first = false;
        for seed in 0..500 {
            let mut cx = Context::new(&registry, seed);
            cx.state.add_source_unit();
            let out = visit_children(&edges, &mut cx).unwrap();
            match (out.find("pragma"), out.find("function")) {
                (Some(p), Some(f)) if p < f => pragma_first = true,
                (Some(_), Some(_)) => function_first = true,
                _ => {}
            }
        }
        assert!(pragma_first && function_first);
    }

    #[test]
    fn errors_abort_traversal() {
        let config = Config::default();
        let registry = registry(&config);
        let edges = [Edge::new(Kind::TestCase, Kind::Function, 1).unwrap()];
        let errors = (0..50)
            .filter_map(|seed| {
                // No source unit: any fired function fails to mint a name.
                let mut cx = Context::new(&registry, seed);
                visit_children(&edges, &mut cx).err()
            })
            .collect::<Vec<_>>();
        assert!(!errors.is_empty());
        assert!(errors.iter().all(|e| *e == Error::NoSourceUnit));
    }
}
