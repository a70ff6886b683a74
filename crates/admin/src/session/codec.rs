//! Reversible cookie value encoding.
//!
//! Values are written as URL-safe base64 (no padding) of their UTF-8 bytes so
//! that tokens are never stored verbatim and every value is cookie-safe.
//!
//! This is obfuscation, not encryption. Anyone holding the cookie can decode
//! it; treat the stored values as readable by the browser user.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use thiserror::Error;

/// Errors produced while decoding a stored cookie value.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The value is not valid base64.
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded bytes are not valid UTF-8.
    #[error("decoded value is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Encode a value for storage.
#[must_use]
pub fn encode(value: &str) -> String {
    URL_SAFE_NO_PAD.encode(value.as_bytes())
}

/// Decode a stored value, reporting why it could not be decoded.
///
/// # Errors
///
/// Returns [`DecodeError`] if the input is not base64 or does not decode to UTF-8.
pub fn try_decode(encoded: &str) -> Result<String, DecodeError> {
    let bytes = URL_SAFE_NO_PAD.decode(encoded.as_bytes())?;
    Ok(String::from_utf8(bytes)?)
}

/// Decode a stored value, returning the input unchanged if it cannot be decoded.
#[must_use]
pub fn decode(encoded: &str) -> String {
    try_decode(encoded).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "cookie value is not encoded, using raw value");
        encoded.to_owned()
    })
}
