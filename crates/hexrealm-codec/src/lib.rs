//! Binary wire format for the hexrealm game core.
//!
//! Moves and map snapshots travel between peers as big-endian byte
//! buffers with a fixed field order. Decoding is strict about move and
//! skill tags and tolerant about entity type bytes.
//!
//! # Architecture
//!
//! - [`codec`] holds the primitive and record encoders/decoders
//! - [`MoveLogWriter`] and [`MoveLogReader`] persist a sequence of moves
//! - [`state_hash`] fingerprints a map for desync detection
//! - [`ByteChannel`] is the transport seam; [`LocalChannel`] is an
//!   in-process pair
//!
//! # Move log format
//!
//! ```text
//! [MAGIC "HXML"] [VERSION u8] [map hash u64]
//! [len u32] [move] [len u32] [move] ...
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod channel;
pub mod codec;
pub mod config;
pub mod error;
pub mod hash;
pub mod reader;
pub mod writer;

pub use channel::{receive_move, send_move, ByteChannel, LocalChannel};
pub use codec::{decode_map, decode_message, decode_move, encode_map, encode_message, encode_move};
pub use config::CodecConfig;
pub use error::CodecError;
pub use hash::state_hash;
pub use reader::{MoveIter, MoveLogReader};
pub use writer::MoveLogWriter;

/// Magic bytes at the start of every move log.
pub const MAGIC: [u8; 4] = *b"HXML";

/// Current move log format version.
pub const FORMAT_VERSION: u8 = 1;

/// Signature at the start of every map snapshot.
pub const MAP_SIGNATURE: [u8; 4] = *b"hex?";
