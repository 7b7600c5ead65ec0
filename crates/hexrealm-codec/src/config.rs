//! Decoder limits.

/// Bounds applied to length prefixes while decoding.
///
/// Every length read from the wire is checked against these before any
/// allocation, so a hostile peer cannot make the decoder reserve
/// arbitrary memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodecConfig {
    /// Longest accepted string, in bytes.
    pub max_string_len: usize,
    /// Longest accepted entity, effect or region list.
    pub max_list_len: usize,
    /// Longest accepted move log record, in bytes.
    pub max_message_len: usize,
}

impl CodecConfig {
    /// Default string limit.
    pub const DEFAULT_MAX_STRING_LEN: usize = 1 << 10;
    /// Default list limit.
    pub const DEFAULT_MAX_LIST_LEN: usize = 1 << 16;
    /// Default record limit.
    pub const DEFAULT_MAX_MESSAGE_LEN: usize = 1 << 16;
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_string_len: Self::DEFAULT_MAX_STRING_LEN,
            max_list_len: Self::DEFAULT_MAX_LIST_LEN,
            max_message_len: Self::DEFAULT_MAX_MESSAGE_LEN,
        }
    }
}
