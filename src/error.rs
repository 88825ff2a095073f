//! Error type shared by every container and collaborator in the crate.

use thiserror::Error;

/// Failures surfaced to callers.
///
/// Duplicate inserts and removing from an empty list are silent no-ops and
/// never produce an error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AssortmentError {
    /// A constructor argument broke a documented precondition.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
    /// An iterator was advanced after yielding its last element.
    #[error("the iterator is exhausted, no more elements")]
    Exhausted,
}

impl AssortmentError {
    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        AssortmentError::InvariantViolation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_descriptive() {
        let e = AssortmentError::invariant("capacity must be > 0");
        assert_eq!(e.to_string(), "invariant violated: capacity must be > 0");
        assert_eq!(
            AssortmentError::Exhausted.to_string(),
            "the iterator is exhausted, no more elements"
        );
    }
}
