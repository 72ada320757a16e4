//! Candidate ranking and comparison.
//!
//! Every function here is a pure, synchronous computation over an in-memory
//! candidate list. Nothing in this module performs I/O or holds state; the
//! session layer owns the repository and selection and passes them in.

pub mod comparison;
pub mod export;
pub mod filter;
pub mod selection;
pub mod sort;

#[cfg(test)]
pub(crate) mod test_support;

use thiserror::Error;

pub use comparison::{compare, ComparisonView};
pub use export::{project, ExportField, ExportRecord, ExportScope, ExportValue, FieldFlags};
pub use filter::filter;
pub use selection::{SelectionSet, ToggleOutcome, MAX_SELECTION};
pub use sort::{sort, SortDirection, SortField};

/// Raised when a caller hands the engine a value outside one of its enums.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankingError {
    #[error("invalid {name}: '{value}'")]
    InvalidArgument { name: &'static str, value: String },
}

impl RankingError {
    pub(crate) fn invalid(name: &'static str, value: &str) -> Self {
        RankingError::InvalidArgument {
            name,
            value: value.to_string(),
        }
    }
}
