// ABOUTME: Decodes raw document bytes to text before extraction.
// ABOUTME: Picks an encoding from the BOM, an explicit charset label, or chardetng detection.

use encoding_rs::{Encoding, UTF_8};
use tracing::debug;

/// Chooses the encoding for `body`.
///
/// A byte order mark wins, then a recognized `charset` label, then detection.
pub fn pick_encoding(body: &[u8], charset: Option<&str>) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(body) {
        return encoding;
    }
    if let Some(encoding) = charset.and_then(|label| Encoding::for_label(label.trim().as_bytes())) {
        return encoding;
    }
    if body.is_ascii() {
        return UTF_8;
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    detector.guess(None, true)
}

/// Decodes `body` to a string, replacing malformed sequences.
pub fn decode_body(body: &[u8], charset: Option<&str>) -> String {
    let encoding = pick_encoding(body, charset);
    let (decoded, used, had_errors) = encoding.decode(body);
    debug!(
        encoding = used.name(),
        had_errors,
        bytes = body.len(),
        "decoded document body"
    );
    decoded.into_owned()
}

/// Reads the `charset` parameter of a Content-Type value, lowercased and unquoted.
pub fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
        (!value.is_empty()).then(|| value.to_ascii_lowercase())
    })
}
