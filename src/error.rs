use crate::generator::Kind;
use thiserror::Error;

/// Errors that abort a generation run.
///
/// Every variant is a defect in the grammar wiring or a misuse of
/// [`GenerationState`](crate::state::GenerationState). Empty productions, such
/// as an import with nothing left to import, are not errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A unit-scoped operation ran before any source unit was added.
    #[error("no source unit has been added yet")]
    NoSourceUnit,

    /// The current path does not name a registered source unit.
    #[error("unknown source unit `{0}`")]
    UnknownSourceUnit(String),

    /// A path selection needed more source units than are known.
    #[error("need at least {required} source units, found {found}")]
    NotEnoughSourceUnits { required: usize, found: usize },

    /// `unindent` was called at indentation level zero.
    #[error("indentation of `{0}` would become negative")]
    IndentationUnderflow(String),

    /// A child edge was declared with a repeat weight of zero.
    #[error("{parent:?} declares {child:?} with a zero repeat weight")]
    ZeroWeight { parent: Kind, child: Kind },

    /// A child edge was declared with a weight too large to draw from.
    #[error("{parent:?} declares {child:?} with a repeat weight of u32::MAX")]
    WeightOverflow { parent: Kind, child: Kind },
}
