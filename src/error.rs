//! Error types reported by the fallible constructors and `try_insert`.

use core::fmt;

/// Why `RobinHoodSet::try_insert` rejected a key.
///
/// `Full` takes precedence: a key that is already present in a full set
/// reports `Full`, matching the boolean `insert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertError {
    Full,
    DuplicateKey,
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertError::Full => f.write_str("set is at capacity"),
            InsertError::DuplicateKey => f.write_str("key is already present"),
        }
    }
}

impl std::error::Error for InsertError {}

/// A runtime capacity that cannot be represented by the slot layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityError {
    TooLarge { requested: usize, max: usize },
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapacityError::TooLarge { requested, max } => {
                write!(f, "capacity {requested} exceeds maximum {max}")
            }
        }
    }
}

impl std::error::Error for CapacityError {}
