//! Ownership and lookup of the grammar's generators.

use crate::{
    Config, Error,
    generator::{Context, Generator, Kind},
    kinds::{
        ContractGenerator, FunctionGenerator, ImportGenerator, PragmaGenerator,
        SourceUnitGenerator, TestCaseGenerator,
    },
};
use tracing::{debug, trace};

/// One generator of every [`Kind`].
#[derive(Debug, Default)]
pub struct Registry {
    test_case: TestCaseGenerator,
    source_unit: SourceUnitGenerator,
    pragma: PragmaGenerator,
    import: ImportGenerator,
    contract: ContractGenerator,
    function: FunctionGenerator,
}

mod sealed {
    pub trait Sealed {}
}

/// Generators with a slot in the [`Registry`].
pub trait Registered: Generator + sealed::Sealed {
    fn get(registry: &Registry) -> &Self;
}

macro_rules! registered {
    ($($ty:ty => $field:ident),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Registered for $ty {
                fn get(registry: &Registry) -> &Self {
                    &registry.$field
                }
            }
        )*
    };
}

registered! {
    TestCaseGenerator => test_case,
    SourceUnitGenerator => source_unit,
    PragmaGenerator => pragma,
    ImportGenerator => import,
    ContractGenerator => contract,
    FunctionGenerator => function,
}

impl Registry {
    /// Creates every generator. No generator has children until
    /// [`Registry::setup`] runs.
    pub fn build() -> Self {
        Self::default()
    }

    /// Wires the grammar.
    pub fn setup(&mut self, config: &Config) -> Result<(), Error> {
        for kind in Kind::ALL {
            self.lookup_mut(kind).setup(config)?;
        }
        Ok(())
    }

    pub fn lookup(&self, kind: Kind) -> &dyn Generator {
        match kind {
            Kind::TestCase => &self.test_case,
            Kind::SourceUnit => &self.source_unit,
            Kind::Pragma => &self.pragma,
            Kind::Import => &self.import,
            Kind::Contract => &self.contract,
            Kind::Function => &self.function,
        }
    }

    fn lookup_mut(&mut self, kind: Kind) -> &mut dyn Generator {
        match kind {
            Kind::TestCase => &mut self.test_case,
            Kind::SourceUnit => &mut self.source_unit,
            Kind::Pragma => &mut self.pragma,
            Kind::Import => &mut self.import,
            Kind::Contract => &mut self.contract,
            Kind::Function => &mut self.function,
        }
    }

    /// The generator of type `G`.
    pub fn generator<G: Registered>(&self) -> &G {
        G::get(self)
    }

    /// Generates one test case program from `seed`.
    pub fn run(seed: u64, config: &Config) -> Result<String, Error> {
        let mut registry = Registry::build();
        registry.setup(config)?;

        debug!(seed, "generating test case");
        let mut cx = Context::new(&registry, seed);
        let program = registry.generator::<TestCaseGenerator>().generate(&mut cx)?;
        debug!(seed, units = cx.state.len(), bytes = program.len(), "generated test case");
        trace!("final state:\n{}", cx.state);
        Ok(program)
    }
}
