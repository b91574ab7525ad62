//! Blackboard error type.

use thiserror::Error;

/// Errors produced by [`crate::Blackboard`].
///
/// `MissingKey` and `TypeMismatch` are the "missing fact" cases: a node that
/// hits either one treats its branch as not applicable this tick.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlackboardError {
    #[error("blackboard key `{0}` already exists")]
    DuplicateKey(&'static str),

    #[error("blackboard key `{0}` is not present")]
    MissingKey(&'static str),

    #[error("blackboard key `{key}` holds `{stored}`, requested `{requested}`")]
    TypeMismatch {
        key: &'static str,
        stored: &'static str,
        requested: &'static str,
    },
}

impl BlackboardError {
    pub fn is_missing_fact(&self) -> bool {
        matches!(
            self,
            BlackboardError::MissingKey(_) | BlackboardError::TypeMismatch { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, BlackboardError>;
