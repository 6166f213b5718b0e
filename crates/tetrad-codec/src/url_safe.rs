//! Conversion between standard base64 text and its URL-safe form.
//!
//! The URL-safe form replaces `+` with `-` and `/` with `_`, and drops all `=` padding.
//! [`from_url_safe`] undoes the remap and re-pads to a multiple of four so the result
//! can be fed to a standard base64 decoder.

use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Rewrites standard base64 text into its URL-safe form.
///
/// # Examples
///
/// ```
/// use tetrad_codec::to_url_safe;
///
/// assert_eq!(to_url_safe("a+b/c=="), "a-b_c");
/// ```
#[must_use]
pub fn to_url_safe(base64: &str) -> String {
    base64
        .chars()
        .filter(|&c| c != '=')
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            c => c,
        })
        .collect()
}

/// Rewrites URL-safe base64 text back into padded standard base64.
///
/// # Examples
///
/// ```
/// use tetrad_codec::from_url_safe;
///
/// assert_eq!(from_url_safe("a-b_c"), "a+b/c===");
/// assert_eq!(from_url_safe("abcd"), "abcd");
/// ```
#[must_use]
pub fn from_url_safe(url_safe: &str) -> String {
    let mut base64: String = url_safe
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();
    while !base64.len().is_multiple_of(4) {
        base64.push('=');
    }
    base64
}

/// Encodes bytes as URL-safe base64 without compression.
///
/// This is the text form used for puzzle identities.
#[must_use]
pub fn encode_bytes(bytes: &[u8]) -> String {
    to_url_safe(&STANDARD.encode(bytes))
}

/// Decodes URL-safe base64 produced by [`encode_bytes`].
///
/// # Errors
///
/// Returns an error if the text is not valid base64 once the remap is undone.
pub fn decode_bytes(text: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(from_url_safe(text))
}
