use rand::RngCore;
use rand::rngs::OsRng;

/// Value of the `Device-OS` header the service expects.
pub const DEVICE_OS: &str = "Android 4.4.4";

/// Random bytes behind each `Device-Id`.
const DEVICE_ID_BYTES: usize = 32;

/// A fresh device id: 32 random bytes from the OS generator as lowercase hex.
pub fn new_device_id() -> String {
    let mut bytes = [0u8; DEVICE_ID_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// `Device-OS` and `Device-Id` headers for one request.
pub fn device_headers() -> Vec<(&'static str, String)> {
    vec![
        ("Device-OS", DEVICE_OS.to_string()),
        ("Device-Id", new_device_id()),
    ]
}
