use super::error::QrError;

/// The six fields encoded in a fiscal receipt QR code.
///
/// Example QR content:
/// `t=20190418T211655&s=3943.26&fn=9282000100072197&i=64318&fp=2918241905&n=1`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiptQrPayload {
    /// `t`: compact date-time, `YYYYMMDDTHHMM` or `YYYYMMDDTHHMMSS`.
    pub timestamp_raw: String,
    /// `s`: receipt total with a `.` separator, e.g. `3943.26`.
    pub sum_raw: String,
    /// `fn`: fiscal storage number (FN), up to 16 digits.
    pub fiscal_storage_number: String,
    /// `i`: fiscal document number (FD), up to 10 digits.
    pub document_number: String,
    /// `fp`: fiscal sign of the document (FP), up to 10 digits.
    pub fiscal_sign: String,
    /// `n`: receipt type, `1` for a sale and `2` for a refund.
    pub receipt_type: String,
}

impl ReceiptQrPayload {
    /// QR keys of the fields that are empty, in QR order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("t", &self.timestamp_raw),
            ("s", &self.sum_raw),
            ("fn", &self.fiscal_storage_number),
            ("i", &self.document_number),
            ("fp", &self.fiscal_sign),
            ("n", &self.receipt_type),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(key, _)| key)
        .collect()
    }

    /// Returns `true` if all six fields are non-empty.
    ///
    /// No further content checks are made: digits, lengths and the receipt
    /// type are passed to the service as-is.
    pub fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Format the QR timestamp as `2019-04-18T21:16:55`.
    ///
    /// A 13-character timestamp (no seconds) yields `2019-04-18T21:16`.
    ///
    /// # Errors
    ///
    /// Returns [`QrError::InvalidTimestamp`] for any other length.
    pub fn format_date_time(&self) -> Result<String, QrError> {
        let t = self.timestamp_raw.as_str();
        let invalid = || QrError::InvalidTimestamp {
            value: t.to_string(),
            len: t.len(),
        };
        if (t.len() != 13 && t.len() != 15) || !t.is_ascii() {
            return Err(invalid());
        }

        let mut out = format!(
            "{}-{}-{}T{}:{}",
            &t[0..4],
            &t[4..6],
            &t[6..8],
            &t[9..11],
            &t[11..13]
        );
        if t.len() == 15 {
            out.push(':');
            out.push_str(&t[13..15]);
        }
        Ok(out)
    }

    /// The receipt total in kopecks: every `.` removed from `s`.
    ///
    /// Purely textual, `3943.26` becomes `394326` and `100` stays `100`.
    pub fn format_sum(&self) -> String {
        self.sum_raw.replace('.', "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(t: &str, s: &str) -> ReceiptQrPayload {
        ReceiptQrPayload {
            timestamp_raw: t.into(),
            sum_raw: s.into(),
            fiscal_storage_number: "9282000100072197".into(),
            document_number: "64318".into(),
            fiscal_sign: "2918241905".into(),
            receipt_type: "1".into(),
        }
    }

    #[test]
    fn date_time_with_seconds() {
        let p = payload("20190418T211655", "1");
        assert_eq!(p.format_date_time().unwrap(), "2019-04-18T21:16:55");
    }

    #[test]
    fn date_time_without_seconds() {
        let p = payload("20190418T2116", "1");
        assert_eq!(p.format_date_time().unwrap(), "2019-04-18T21:16");
    }

    #[test]
    fn date_time_wrong_length() {
        let p = payload("20190418T21165", "1");
        assert_eq!(
            p.format_date_time(),
            Err(QrError::InvalidTimestamp {
                value: "20190418T21165".into(),
                len: 14,
            })
        );
    }

    #[test]
    fn date_time_non_ascii_rejected() {
        // 13 bytes, but not sliceable at the fixed offsets
        let p = payload("201904ёT2116", "1");
        assert_eq!(p.timestamp_raw.len(), 13);
        assert!(p.format_date_time().is_err());
    }

    #[test]
    fn sum_drops_dots() {
        assert_eq!(payload("", "3943.26").format_sum(), "394326");
        assert_eq!(payload("", "0.00").format_sum(), "000");
        assert_eq!(payload("", "100").format_sum(), "100");
    }

    #[test]
    fn missing_fields_named() {
        let mut p = payload("20190418T211655", "3943.26");
        assert!(p.is_valid());
        p.fiscal_sign.clear();
        p.receipt_type.clear();
        assert_eq!(p.missing_fields(), vec!["fp", "n"]);
        assert!(!p.is_valid());
    }
}
