//! URL-query decoding of receipt QR content.

use url::form_urlencoded;

use super::error::QrError;
use super::payload::ReceiptQrPayload;

/// Parse raw QR content into a [`ReceiptQrPayload`].
///
/// The input is decoded as URL-query syntax (`key=value` pairs joined by
/// `&`, `+` as space, `%XX` escapes). Keys are matched exactly and the last
/// value wins on duplicates. Unknown keys are ignored.
///
/// Missing fields are not an error here; check
/// [`ReceiptQrPayload::is_valid`] before using the payload.
///
/// # Errors
///
/// Returns [`QrError::Undecodable`] on a malformed `%` escape or a `;`
/// inside a pair.
pub fn parse_qr(raw: &str) -> Result<ReceiptQrPayload, QrError> {
    for pair in raw.split('&') {
        check_pair(pair).map_err(|reason| QrError::Undecodable {
            input: raw.to_string(),
            reason,
        })?;
    }

    let mut payload = ReceiptQrPayload::default();
    for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
        let slot = match key.as_ref() {
            "t" => &mut payload.timestamp_raw,
            "s" => &mut payload.sum_raw,
            "fn" => &mut payload.fiscal_storage_number,
            "i" => &mut payload.document_number,
            "fp" => &mut payload.fiscal_sign,
            "n" => &mut payload.receipt_type,
            _ => continue,
        };
        *slot = value.into_owned();
    }
    Ok(payload)
}

/// Reject the pair shapes a strict query decoder refuses.
fn check_pair(pair: &str) -> Result<(), String> {
    if pair.contains(';') {
        return Err(format!("invalid semicolon separator in {pair:?}"));
    }

    let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
    check_component(key)?;
    check_component(value)
}

/// Percent-decode `part` and require the result to be UTF-8.
fn check_component(part: &str) -> Result<(), String> {
    let bytes = part.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let mut byte = [0u8; 1];
            match bytes.get(i + 1..i + 3) {
                Some(escape) if hex::decode_to_slice(escape, &mut byte).is_ok() => {
                    decoded.push(byte[0]);
                    i += 3;
                }
                _ => {
                    let end = (i + 3).min(bytes.len());
                    return Err(format!(
                        "invalid URL escape {:?}",
                        String::from_utf8_lossy(&bytes[i..end])
                    ));
                }
            }
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }

    std::str::from_utf8(&decoded)
        .map(|_| ())
        .map_err(|_| format!("{part:?} does not decode to UTF-8"))
}
