//! Redirects for the old `/contents/{id}` detail URLs.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::form_urlencoded;

/// Characters escaped when a value is embedded as a single URI component.
pub const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-decodes one path segment. Malformed escapes and non-UTF-8 results yield `None`.
pub fn safe_decode_path_segment(value: &str) -> Option<String> {
    let bytes = value.as_bytes();
    let mut index = 0;
    while let Some(offset) = bytes[index..].iter().position(|byte| *byte == b'%') {
        let escape = index + offset;
        let well_formed = bytes
            .get(escape + 1..escape + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !well_formed {
            return None;
        }
        index = escape + 3;
    }

    percent_decode_str(value)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}

/// Target of a legacy detail URL, preserving every query parameter.
///
/// Repeated keys are grouped together in first-seen order. Returns `None` when the id does not
/// decode or decodes to nothing.
pub fn build_legacy_content_redirect_path(
    id_param: &str,
    params: &[(String, String)],
) -> Option<String> {
    let decoded = safe_decode_path_segment(id_param).filter(|id| !id.is_empty())?;
    let target = utf8_percent_encode(&decoded, URI_COMPONENT);

    let mut keys: Vec<&str> = Vec::new();
    for (key, _) in params {
        if !keys.contains(&key.as_str()) {
            keys.push(key.as_str());
        }
    }

    let mut query = form_urlencoded::Serializer::new(String::new());
    for key in keys {
        for (_, value) in params.iter().filter(|(name, _)| name == key) {
            query.append_pair(key, value);
        }
    }
    let query = query.finish();

    Some(if query.is_empty() {
        format!("/content/{target}")
    } else {
        format!("/content/{target}?{query}")
    })
}
