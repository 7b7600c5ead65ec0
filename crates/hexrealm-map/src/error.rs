//! Error types for map construction and region checks.

use hexrealm_core::Pos;
use std::fmt;

/// Errors arising from map construction or region auditing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// Attempted to construct a map with zero tiles.
    EmptyMap,
    /// A dimension does not fit the 16-bit wire coordinates.
    TooLarge {
        /// Which dimension.
        name: &'static str,
        /// The rejected value.
        value: u32,
        /// Largest accepted value.
        max: u32,
    },
    /// A template's tile list does not match its declared size.
    TemplateSize {
        /// `width * height`.
        expected: usize,
        /// Tiles actually supplied.
        actual: usize,
    },
    /// A region's stored aggregate disagrees with a recount of its tiles.
    RegionMismatch {
        /// First tile of the region, row-major.
        pos: Pos,
        /// The aggregate that disagrees.
        field: &'static str,
        /// Recounted value.
        expected: i32,
        /// Stored value.
        actual: i32,
    },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMap => write!(f, "map must have at least one tile"),
            Self::TooLarge { name, value, max } => {
                write!(f, "map {name} {value} exceeds maximum {max}")
            }
            Self::TemplateSize { expected, actual } => {
                write!(f, "template has {actual} tiles, expected {expected}")
            }
            Self::RegionMismatch {
                pos,
                field,
                expected,
                actual,
            } => write!(
                f,
                "region at {pos}: {field} is {actual}, recount gives {expected}"
            ),
        }
    }
}

impl std::error::Error for MapError {}
