//! Client for the FNS receipt-check service (`proverkacheka.nalog.ru`).
//!
//! Two authenticated GET requests: an existence check and a contents
//! download. Each call builds its URL from the QR fields, sends HTTP Basic
//! credentials from [`ApiConfig`] and a freshly generated device id.
//!
//! # Example
//!
//! ```ignore
//! use checkfns::fns::*;
//! use checkfns::qr::parse_qr;
//!
//! let config = ApiConfig::from_env();
//! let transport = HttpTransport::new()?;
//! let qr = parse_qr("t=20190418T211655&s=3943.26&fn=9282000100072197&i=64318&fp=2918241905&n=1")?;
//!
//! check_exists(&qr, &config, &transport)?;
//! let json = fetch_receipt(&qr, &config, &transport)?;
//! ```

mod config;
mod device;
mod error;
mod service;
mod transport;

pub use config::{ApiConfig, DEFAULT_BASE_URL, ENV_DEBUG, ENV_LOGIN, ENV_PASSWORD};
pub use device::{DEVICE_OS, new_device_id};
pub use error::FnsError;
pub use service::{check_exists, exists_url, fetch_receipt, receipt_url};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
