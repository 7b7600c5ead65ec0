//! Pool-specific error types.

use std::error::Error;
use std::fmt;

/// Errors from reading a pool slot by index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolAccessError {
    /// The slot exists but its value has been removed.
    Deleted {
        /// The requested index.
        index: usize,
    },
    /// The index is past the end of the pool.
    OutOfRange {
        /// The requested index.
        index: usize,
        /// Number of slots the pool currently spans.
        capacity: usize,
    },
}

impl fmt::Display for PoolAccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deleted { index } => write!(f, "pool slot {index} has been deleted"),
            Self::OutOfRange { index, capacity } => {
                write!(f, "pool index {index} out of range (capacity {capacity})")
            }
        }
    }
}

impl Error for PoolAccessError {}

/// Errors from removing a pool slot by index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolPopError {
    /// The slot was already removed.
    Deleted {
        /// The requested index.
        index: usize,
    },
    /// The index is past the end of the pool.
    OutOfRange {
        /// The requested index.
        index: usize,
        /// Number of slots the pool currently spans.
        capacity: usize,
    },
}

impl fmt::Display for PoolPopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deleted { index } => write!(f, "pool slot {index} already deleted"),
            Self::OutOfRange { index, capacity } => {
                write!(f, "cannot pop index {index}: out of range (capacity {capacity})")
            }
        }
    }
}

impl Error for PoolPopError {}

