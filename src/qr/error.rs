use thiserror::Error;

/// Errors raised while decoding or formatting receipt QR data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum QrError {
    /// The raw string is not valid URL-query syntax.
    #[error("undecodable QR data {input:?}: {reason}")]
    Undecodable {
        /// The raw QR string as received.
        input: String,
        /// What made it undecodable.
        reason: String,
    },

    /// The `t` field is neither `YYYYMMDDTHHMM` nor `YYYYMMDDTHHMMSS`.
    #[error("invalid QR date-time {value:?}: expected 13 or 15 characters, got {len}")]
    InvalidTimestamp {
        /// The raw timestamp value.
        value: String,
        /// Its length in bytes.
        len: usize,
    },
}
