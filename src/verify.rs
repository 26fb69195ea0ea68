//! End-to-end receipt verification: QR string in, receipt JSON out.

use thiserror::Error;
use tracing::debug;

use crate::fns::{ApiConfig, FnsError, Transport, check_exists, fetch_receipt};
use crate::qr::{QrError, parse_qr};

/// Why a receipt could not be verified.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VerifyError {
    /// No QR data was given.
    #[error("invalid arguments: empty input data")]
    EmptyInput,

    /// The QR data is not valid query syntax.
    #[error("invalid qr code: {0}")]
    Qr(#[from] QrError),

    /// Some of the six QR fields are missing or empty.
    #[error("invalid qr code: missing fields {}", .missing.join(", "))]
    Incomplete {
        /// QR keys of the missing fields.
        missing: Vec<&'static str>,
    },

    /// The existence check or the contents download failed.
    #[error(transparent)]
    Fns(#[from] FnsError),
}

/// Verify the receipt encoded in `raw` and return its JSON contents.
///
/// Runs parse, field check, existence check and download in that order
/// and stops at the first failure. Nothing is sent over the network
/// unless the QR data is complete, and the contents are only requested
/// after the existence check succeeded.
///
/// # Errors
///
/// See [`VerifyError`].
pub fn verify_receipt<T: Transport + ?Sized>(
    raw: &str,
    config: &ApiConfig,
    transport: &T,
) -> Result<Vec<u8>, VerifyError> {
    debug!(input = raw, "verifying receipt");
    if raw.is_empty() {
        return Err(VerifyError::EmptyInput);
    }

    let qr = parse_qr(raw)?;
    if !qr.is_valid() {
        return Err(VerifyError::Incomplete {
            missing: qr.missing_fields(),
        });
    }

    check_exists(&qr, config, transport)?;
    Ok(fetch_receipt(&qr, config, transport)?)
}
