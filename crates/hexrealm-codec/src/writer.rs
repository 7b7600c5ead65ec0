//! Move log writer.
//!
//! [`MoveLogWriter`] streams moves to any `Write` sink. The header is
//! written immediately on construction.

use std::io::Write;

use hexrealm_moves::Move;

use crate::codec::{encode_move, write_u32, write_u64, write_u8};
use crate::error::CodecError;
use crate::{FORMAT_VERSION, MAGIC};

/// Writes a move log to a byte stream.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and production
/// code can use `BufWriter<File>`.
///
/// # Examples
///
/// ```
/// use hexrealm_core::Pos;
/// use hexrealm_codec::{MoveLogReader, MoveLogWriter};
/// use hexrealm_moves::{EntityWithdraw, Move};
///
/// let mut buf = Vec::new();
/// let mut writer = MoveLogWriter::new(&mut buf, 0xfeed).unwrap();
/// writer.write_move(&Move::new(EntityWithdraw::new(Pos::new(1, 2)))).unwrap();
/// assert_eq!(writer.moves_written(), 1);
/// drop(writer);
///
/// let mut reader = MoveLogReader::open(buf.as_slice()).unwrap();
/// assert_eq!(reader.map_hash(), 0xfeed);
/// assert!(reader.next_move().unwrap().is_some());
/// assert!(reader.next_move().unwrap().is_none());
/// ```
pub struct MoveLogWriter<W: Write> {
    writer: W,
    moves_written: u64,
}

impl<W: Write> MoveLogWriter<W> {
    /// Create a writer, immediately writing the header with the hash of
    /// the map the moves start from.
    pub fn new(mut writer: W, map_hash: u64) -> Result<Self, CodecError> {
        let mut header = Vec::with_capacity(MAGIC.len() + 9);
        header.extend_from_slice(&MAGIC);
        write_u8(&mut header, FORMAT_VERSION);
        write_u64(&mut header, map_hash);
        writer.write_all(&header)?;
        Ok(Self {
            writer,
            moves_written: 0,
        })
    }

    /// Append one move as a length-prefixed record.
    pub fn write_move(&mut self, mv: &Move) -> Result<(), CodecError> {
        let mut body = Vec::new();
        encode_move(&mut body, mv);
        let mut record = Vec::with_capacity(4 + body.len());
        write_u32(&mut record, body.len() as u32);
        record.extend_from_slice(&body);
        self.writer.write_all(&record)?;
        self.moves_written += 1;
        Ok(())
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<(), CodecError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Number of moves written so far.
    pub fn moves_written(&self) -> u64 {
        self.moves_written
    }

    /// Consume the writer and return the underlying `Write` sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
