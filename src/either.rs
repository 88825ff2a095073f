//! Either: exactly one of two values.

use crate::checks;
use crate::error::AssortmentError;
use core::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Either<L, R> {
    Left(L),
    Right(R),
}

impl<L, R> Either<L, R> {
    /// Build from two optional halves. Exactly one must be present.
    pub fn from_parts(left: Option<L>, right: Option<R>) -> Result<Self, AssortmentError> {
        let (left, right) = checks::ensure(
            (left, right),
            |(l, r)| l.is_some() != r.is_some(),
            "exactly one of left and right must be present",
        )?;
        match left {
            Some(l) => Ok(Either::Left(l)),
            None => checks::present(right, "right must be present").map(Either::Right),
        }
    }

    pub fn left(&self) -> Option<&L> {
        match self {
            Either::Left(l) => Some(l),
            Either::Right(_) => None,
        }
    }

    pub fn right(&self) -> Option<&R> {
        match self {
            Either::Left(_) => None,
            Either::Right(r) => Some(r),
        }
    }

    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    pub fn is_right(&self) -> bool {
        matches!(self, Either::Right(_))
    }
}

/// `[l, -]` or `[-, r]`.
impl<L: fmt::Display, R: fmt::Display> fmt::Display for Either<L, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Either::Left(l) => write!(f, "[{l}, -]"),
            Either::Right(r) => write!(f, "[-, {r}]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts_requires_exactly_one() {
        let left: Either<i32, &str> = Either::from_parts(Some(1), None).expect("left");
        assert!(left.is_left());
        assert_eq!(left.left(), Some(&1));
        assert_eq!(left.right(), None);

        let right: Either<i32, &str> = Either::from_parts(None, Some("r")).expect("right");
        assert!(right.is_right());
        assert_eq!(right.right(), Some(&"r"));

        assert!(matches!(
            Either::<i32, &str>::from_parts(Some(1), Some("r")),
            Err(AssortmentError::InvariantViolation(_))
        ));
        assert!(matches!(
            Either::<i32, &str>::from_parts(None, None),
            Err(AssortmentError::InvariantViolation(_))
        ));
    }

    #[test]
    fn display() {
        assert_eq!(Either::<_, u8>::Left("a").to_string(), "[a, -]");
        assert_eq!(Either::<u8, _>::Right(7).to_string(), "[-, 7]");
    }
}
