/*!
# Errors

All fallible operations of this crate report one of three kinds of failure:

- [`Error::StructuralConflict`]: an insertion would break a uniqueness rule of the structure
  (duplicate key in a BST without duplicates, second edge between the same vertices in a simple
  graph, out-of-order word for a DAFSA, ...). The structure is left untouched.
- [`Error::CycleDetected`]: an acyclic graph contains (or an insertion would create) a cycle.
- [`Error::InvalidConfiguration`]: the structure was configured in a way the operation does not
  support (branching factor, polarity, calling a ternary operation on a binary tree, ...).

A search that finds nothing is *not* an error and is represented by `None` or an empty `Vec`.
*/

use thiserror::Error;

/// Error type shared by all structures of this crate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A uniqueness rule of the structure would be violated
    #[error("structural conflict: {0}")]
    StructuralConflict(String),

    /// A cycle exists where none is allowed
    #[error("cycle detected: {0}")]
    CycleDetected(String),

    /// The structure does not support the requested configuration/operation
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl Error {
    /// Returns *true* if this is a [`Error::StructuralConflict`]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::StructuralConflict(_))
    }

    /// Returns *true* if this is a [`Error::CycleDetected`]
    pub fn is_cycle(&self) -> bool {
        matches!(self, Error::CycleDetected(_))
    }

    /// Returns *true* if this is a [`Error::InvalidConfiguration`]
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Error::InvalidConfiguration(_))
    }
}

/// Shorthand for `std::result::Result<T, arbores::Error>`
pub type Result<T> = std::result::Result<T, Error>;

/// Shorthand for returning an `Err(Error::$kind(..))` early when a condition fails
macro_rules! raise_error_unless {
    ($cond : expr, $kind : ident, $($info : tt)+) => {
        if !($cond) {
            return Err($crate::error::Error::$kind(format!($($info)+)));
        }
    };
}

pub(crate) use raise_error_unless;
