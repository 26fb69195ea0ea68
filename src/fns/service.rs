//! The two receipt-check endpoints.
//!
//! 1. Existence check, answers `204 No Content` for a registered receipt:
//!    `GET /v1/ofds/*/inns/*/fss/{fn}/operations/{n}/tickets/{i}?fiscalSign={fp}&date={date}&sum={sum}`
//! 2. Receipt contents, answers `200 OK` with a JSON body:
//!    `GET /v1/inns/*/kkts/*/fss/{fn}/tickets/{i}?fiscalSign={fp}&sendToEmail=no`

use tracing::{debug, info, warn};
use url::Url;

use super::config::ApiConfig;
use super::device::device_headers;
use super::error::FnsError;
use super::transport::{ApiRequest, ApiResponse, Transport};
use crate::qr::ReceiptQrPayload;

/// Success status of the existence check.
const EXISTS_STATUS: u16 = 204;
/// Success status of the contents request.
const RECEIPT_STATUS: u16 = 200;

/// URL of the existence check for `qr`.
///
/// Fields are substituted as-is; values containing `/`, `?` or `#` change
/// the shape of the URL.
///
/// # Errors
///
/// [`FnsError::Qr`] if the timestamp cannot be formatted,
/// [`FnsError::InvalidUrl`] if the result does not parse.
pub fn exists_url(qr: &ReceiptQrPayload, config: &ApiConfig) -> Result<Url, FnsError> {
    let raw = format!(
        "{}/v1/ofds/*/inns/*/fss/{}/operations/{}/tickets/{}?fiscalSign={}&date={}&sum={}",
        config.base_url,
        qr.fiscal_storage_number,
        qr.receipt_type,
        qr.document_number,
        qr.fiscal_sign,
        qr.format_date_time()?,
        qr.format_sum(),
    );
    parse_url(raw)
}

/// URL of the receipt contents request for `qr`.
///
/// # Errors
///
/// [`FnsError::InvalidUrl`] if the result does not parse.
pub fn receipt_url(qr: &ReceiptQrPayload, config: &ApiConfig) -> Result<Url, FnsError> {
    let raw = format!(
        "{}/v1/inns/*/kkts/*/fss/{}/tickets/{}?fiscalSign={}&sendToEmail=no",
        config.base_url, qr.fiscal_storage_number, qr.document_number, qr.fiscal_sign,
    );
    parse_url(raw)
}

fn parse_url(raw: String) -> Result<Url, FnsError> {
    Url::parse(&raw).map_err(|e| FnsError::InvalidUrl {
        url: raw,
        reason: e.to_string(),
    })
}

/// Ask the service whether the receipt in `qr` was registered.
///
/// Makes exactly one request. Only `204` counts as success.
///
/// # Errors
///
/// Any [`FnsError`]; each failure is also logged.
pub fn check_exists<T: Transport + ?Sized>(
    qr: &ReceiptQrPayload,
    config: &ApiConfig,
    transport: &T,
) -> Result<(), FnsError> {
    let result = exists_url(qr, config)
        .and_then(|url| send(url, config, transport))
        .and_then(|resp| expect_status(resp, EXISTS_STATUS))
        .map(|_| ());
    match &result {
        Ok(()) => info!(fiscal_storage = %qr.fiscal_storage_number, "receipt registered"),
        Err(e) => warn!("failed check: {e}"),
    }
    result
}

/// Download the receipt contents for `qr`.
///
/// Returns the response body unmodified. Only `200` counts as success.
///
/// # Errors
///
/// Any [`FnsError`]; each failure is also logged.
pub fn fetch_receipt<T: Transport + ?Sized>(
    qr: &ReceiptQrPayload,
    config: &ApiConfig,
    transport: &T,
) -> Result<Vec<u8>, FnsError> {
    let result = receipt_url(qr, config)
        .and_then(|url| send(url, config, transport))
        .and_then(|resp| expect_status(resp, RECEIPT_STATUS))
        .map(|resp| resp.body);
    match &result {
        Ok(body) => info!(bytes = body.len(), "receipt fetched"),
        Err(e) => warn!("failed get data: {e}"),
    }
    result
}

fn send<T: Transport + ?Sized>(
    url: Url,
    config: &ApiConfig,
    transport: &T,
) -> Result<ApiResponse, FnsError> {
    let request = ApiRequest {
        url,
        login: config.login.clone(),
        password: config.password.clone(),
        headers: device_headers(),
    };
    if config.debug {
        debug!("raw request:\n{}", request.dump());
    }

    let resp = transport.get(&request)?;
    if config.debug {
        debug!("raw response:\n{}", resp.dump());
    }
    Ok(resp)
}

fn expect_status(resp: ApiResponse, expected: u16) -> Result<ApiResponse, FnsError> {
    if resp.status == expected {
        Ok(resp)
    } else {
        Err(FnsError::UnexpectedStatus {
            expected,
            actual: resp.status,
        })
    }
}
