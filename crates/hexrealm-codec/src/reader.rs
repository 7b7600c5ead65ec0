//! Move log reader.
//!
//! [`MoveLogReader`] reads moves from any `Read` source. The header is
//! validated on construction.

use std::io::Read;

use hexrealm_moves::Move;

use crate::codec::{decode_move, read_bytes, read_u64, read_u8};
use crate::config::CodecConfig;
use crate::error::CodecError;
use crate::{FORMAT_VERSION, MAGIC};

/// Reads a move log from a byte stream.
///
/// Generic over `R: Read` so tests can use `&[u8]` and production code
/// can use `BufReader<File>`.
pub struct MoveLogReader<R: Read> {
    reader: R,
    config: CodecConfig,
    map_hash: u64,
    moves_read: u64,
}

impl<R: Read> MoveLogReader<R> {
    /// Open a move log with default limits.
    pub fn open(reader: R) -> Result<Self, CodecError> {
        Self::open_with(reader, CodecConfig::default())
    }

    /// Open a move log, reading and validating the header.
    pub fn open_with(mut reader: R, config: CodecConfig) -> Result<Self, CodecError> {
        let magic = read_bytes::<4>(&mut reader, "magic")?;
        if magic != MAGIC {
            return Err(CodecError::InvalidSignature);
        }
        let version = read_u8(&mut reader)?;
        if version != FORMAT_VERSION {
            return Err(CodecError::UnsupportedVersion { found: version });
        }
        let map_hash = read_u64(&mut reader)?;
        Ok(Self {
            reader,
            config,
            map_hash,
            moves_read: 0,
        })
    }

    /// Hash of the map the logged moves start from.
    pub fn map_hash(&self) -> u64 {
        self.map_hash
    }

    /// Read the next move, or `None` if the stream is exhausted.
    pub fn next_move(&mut self) -> Result<Option<Move>, CodecError> {
        let mv = read_record(&mut self.reader, &self.config)?;
        if mv.is_some() {
            self.moves_read += 1;
        }
        Ok(mv)
    }

    /// Number of moves read so far.
    pub fn moves_read(&self) -> u64 {
        self.moves_read
    }

    /// Convert into a move iterator.
    pub fn moves(self) -> MoveIter<R> {
        MoveIter {
            reader: self.reader,
            config: self.config,
            done: false,
        }
    }
}

/// Read one length-prefixed record.
///
/// Returns `Ok(None)` on clean EOF (no bytes available) and an error when
/// the stream ends inside the length prefix or the record.
fn read_record(r: &mut dyn Read, config: &CodecConfig) -> Result<Option<Move>, CodecError> {
    let mut len_buf = [0u8; 4];
    let mut filled = 0;
    while filled < len_buf.len() {
        match r.read(&mut len_buf[filled..]) {
            Ok(0) if filled == 0 => return Ok(None),
            Ok(0) => {
                return Err(CodecError::Truncated {
                    what: "record length",
                })
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CodecError::Io(e)),
        }
    }
    let len = u32::from_be_bytes(len_buf) as usize;
    if len > config.max_message_len {
        return Err(CodecError::LengthLimit {
            what: "record",
            len: len as i64,
            max: config.max_message_len,
        });
    }

    let mut record = vec![0u8; len];
    r.read_exact(&mut record).map_err(|e| match e.kind() {
        std::io::ErrorKind::UnexpectedEof => CodecError::Truncated { what: "record" },
        _ => CodecError::Io(e),
    })?;
    let mut body = record.as_slice();
    let mv = decode_move(&mut body)?;
    if !body.is_empty() {
        tracing::debug!(trailing = body.len(), "move record has trailing bytes");
    }
    Ok(Some(mv))
}

/// Iterator adapter over logged moves. Stops after the first error.
pub struct MoveIter<R: Read> {
    reader: R,
    config: CodecConfig,
    done: bool,
}

impl<R: Read> Iterator for MoveIter<R> {
    type Item = Result<Move, CodecError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match read_record(&mut self.reader, &self.config) {
            Ok(Some(mv)) => Some(Ok(mv)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
