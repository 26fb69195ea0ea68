use thiserror::Error;

use crate::qr::QrError;

/// Errors from a call to the FNS receipt-check service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FnsError {
    /// The request URL built from the QR fields does not parse.
    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl {
        /// The URL as built from the template.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// Connection, TLS or other transport failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a status other than the expected one.
    #[error("status code {actual}, expected {expected}")]
    UnexpectedStatus {
        /// Status that signals success for this endpoint.
        expected: u16,
        /// Status actually returned.
        actual: u16,
    },

    /// The response body could not be read.
    #[error("error reading body: {0}")]
    BodyRead(String),

    /// A QR field could not be formatted for the request.
    #[error(transparent)]
    Qr(#[from] QrError),
}
