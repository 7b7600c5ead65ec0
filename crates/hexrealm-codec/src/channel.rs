//! Transport seam for encoded moves.
//!
//! A [`ByteChannel`] carries whole messages: each `send` is received as
//! exactly one buffer, in order. [`LocalChannel`] is an in-process pair
//! built on crossbeam channels, usable across threads; the map and its
//! pools stay on the thread that owns them.

use crossbeam_channel::{Receiver, Sender};

use hexrealm_moves::Move;

use crate::codec::{decode_message, encode_message};

/// A message-oriented byte transport.
pub trait ByteChannel {
    /// Queue one complete message.
    fn send(&mut self, bytes: &[u8]);
    /// Take the next complete message, if one has arrived.
    fn receive(&mut self) -> Option<Vec<u8>>;
}

/// One end of an in-process channel pair.
///
/// # Examples
///
/// ```
/// use hexrealm_codec::{ByteChannel, LocalChannel};
///
/// let (mut a, mut b) = LocalChannel::pair();
/// a.send(b"ping");
/// assert_eq!(b.receive().as_deref(), Some(&b"ping"[..]));
/// assert_eq!(b.receive(), None);
/// ```
#[derive(Debug)]
pub struct LocalChannel {
    tx: Sender<Vec<u8>>,
    rx: Receiver<Vec<u8>>,
}

impl LocalChannel {
    /// Two connected ends; what one sends the other receives.
    pub fn pair() -> (LocalChannel, LocalChannel) {
        let (a_tx, b_rx) = crossbeam_channel::unbounded();
        let (b_tx, a_rx) = crossbeam_channel::unbounded();
        (
            LocalChannel { tx: a_tx, rx: a_rx },
            LocalChannel { tx: b_tx, rx: b_rx },
        )
    }
}

impl ByteChannel for LocalChannel {
    fn send(&mut self, bytes: &[u8]) {
        if self.tx.send(bytes.to_vec()).is_err() {
            tracing::debug!(len = bytes.len(), "peer gone, message discarded");
        }
    }

    fn receive(&mut self) -> Option<Vec<u8>> {
        self.rx.try_recv().ok()
    }
}

/// Encode `mv` and send it as one message.
pub fn send_move(channel: &mut dyn ByteChannel, mv: &Move) {
    channel.send(&encode_message(mv));
}

/// Receive messages until one decodes into a move.
///
/// Undecodable messages are dropped and logged. Returns `None` once no
/// message is waiting.
pub fn receive_move(channel: &mut dyn ByteChannel) -> Option<Move> {
    while let Some(bytes) = channel.receive() {
        if let Some(mv) = decode_message(&bytes) {
            return Some(mv);
        }
    }
    None
}
