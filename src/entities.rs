//! Character entity decoding for cleaned markup text.

/// Replaces named (the full HTML5 set, including the legacy forms that may
/// omit the `;`), decimal and hex character references with the characters
/// they stand for. Text that is not a reference is left untouched.
pub fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }
    htmlize::unescape(input).into_owned()
}
