//! Error types for the wire codec.

use std::fmt;
use std::io;

use hexrealm_map::MapError;

/// Errors that can occur while encoding or decoding.
#[derive(Debug)]
pub enum CodecError {
    /// An I/O error other than running out of input.
    Io(io::Error),
    /// The input ended in the middle of a record.
    Truncated {
        /// What was being read.
        what: &'static str,
    },
    /// A move kind tag is not recognized.
    UnknownMoveKind {
        /// The unrecognized tag.
        tag: u8,
    },
    /// A skill tag is not recognized.
    UnknownSkill {
        /// The unrecognized tag.
        tag: u8,
    },
    /// A map snapshot does not start with `b"hex?"`, or a move log does
    /// not start with `b"HXML"`.
    InvalidSignature,
    /// A string is not valid UTF-8.
    InvalidUtf8,
    /// The move log version is not supported by this build.
    UnsupportedVersion {
        /// The version found in the stream.
        found: u8,
    },
    /// A length prefix is negative or exceeds the configured limit.
    LengthLimit {
        /// What the length prefix counts.
        what: &'static str,
        /// The length read.
        len: i64,
        /// The configured maximum.
        max: usize,
    },
    /// A snapshot decoded but does not describe a valid map.
    InvalidMap(MapError),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Truncated { what } => write!(f, "input ended while reading {what}"),
            Self::UnknownMoveKind { tag } => write!(f, "unknown move kind tag {tag}"),
            Self::UnknownSkill { tag } => write!(f, "unknown skill tag {tag}"),
            Self::InvalidSignature => write!(f, "invalid signature"),
            Self::InvalidUtf8 => write!(f, "string is not valid UTF-8"),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported format version {found}")
            }
            Self::LengthLimit { what, len, max } => {
                write!(f, "{what} length {len} outside 0..={max}")
            }
            Self::InvalidMap(e) => write!(f, "invalid map: {e}"),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::InvalidMap(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CodecError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<MapError> for CodecError {
    fn from(e: MapError) -> Self {
        Self::InvalidMap(e)
    }
}
