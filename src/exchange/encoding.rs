use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left as-is by `encode`. Everything else, the format's own
/// delimiters and space included, is percent-encoded.
const FIELD_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*');

/// Percent-encode a text field
pub fn encode(value: &str) -> String {
    utf8_percent_encode(value, FIELD_SAFE).to_string()
}

/// Decode a text field.
///
/// A literal `+` is read as a space, as form encoders write it. An encoded
/// plus (`%2B`) is decoded after that substitution and survives.
pub fn decode(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let spaced = value.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
