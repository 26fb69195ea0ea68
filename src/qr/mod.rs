//! Receipt QR code decoding and formatting.
//!
//! The QR code printed on a Russian fiscal receipt carries six fields in
//! URL-query syntax. This module parses them and derives the values the
//! receipt-check service expects.

mod error;
mod parse;
mod payload;

pub use error::QrError;
pub use parse::parse_qr;
pub use payload::ReceiptQrPayload;
