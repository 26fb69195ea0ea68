//! # checkfns
//!
//! Verify Russian fiscal receipts against the FNS receipt-check service
//! using the data from the receipt's QR code.
//!
//! The QR code carries six fields (`t`, `s`, `fn`, `i`, `fp`, `n`). The
//! service is asked whether a receipt with those fields was registered and,
//! if so, returns its full contents as JSON.
//!
//! ## Quick Start
//!
//! ```rust
//! use checkfns::qr::parse_qr;
//!
//! let qr = parse_qr("t=20190418T211655&s=3943.26&fn=9282000100072197&i=64318&fp=2918241905&n=1")
//!     .unwrap();
//!
//! assert!(qr.is_valid());
//! assert_eq!(qr.format_date_time().unwrap(), "2019-04-18T21:16:55");
//! assert_eq!(qr.format_sum(), "394326");
//! ```
//!
//! Network access goes through the [`fns::Transport`] trait;
//! [`fns::HttpTransport`] is the blocking `reqwest` implementation.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `cli` (default) | The `checkfns` command-line binary |

pub mod fns;
pub mod qr;
mod verify;

pub use crate::verify::{VerifyError, verify_receipt};
