//! Precondition helpers used by constructors.
//!
//! Each helper hands the checked value back on success so calls chain with
//! `?` at the construction site.

use crate::error::AssortmentError;

/// Return `value` if `predicate` accepts it, otherwise an invariant violation
/// carrying `message`.
pub fn ensure<T, P>(value: T, predicate: P, message: impl Into<String>) -> Result<T, AssortmentError>
where
    P: FnOnce(&T) -> bool,
{
    if predicate(&value) {
        Ok(value)
    } else {
        Err(AssortmentError::invariant(message))
    }
}

/// Unwrap a required reference, reporting `message` when it is absent.
pub fn present<T>(value: Option<T>, message: impl Into<String>) -> Result<T, AssortmentError> {
    value.ok_or_else(|| AssortmentError::invariant(message))
}
