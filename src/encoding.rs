//! Encoding detection and permissive decoding for file loads

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};

/// Guess the encoding of raw file bytes.
///
/// A byte-order mark wins; otherwise the bytes are sniffed. Pure ASCII and
/// valid UTF-8 input resolve to UTF-8.
pub fn detect(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }
    if std::str::from_utf8(bytes).is_ok() {
        return UTF_8;
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

/// Decode bytes with the detected encoding.
///
/// Malformed sequences are replaced with U+FFFD; decoding never fails.
pub fn decode(bytes: &[u8]) -> (String, &'static Encoding) {
    let encoding = detect(bytes);
    let (text, actual, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!(
            "Replaced undecodable bytes while decoding as {}",
            actual.name()
        );
    }
    (text.into_owned(), actual)
}
