//! [rfc-4226](https://tools.ietf.org/html/rfc4226#section-5) HMAC-based one-time codes.
//!
//! Every function here is pure: same inputs, same code, no shared state.

use crate::rfc::assert_digits;
use crate::{Algorithm, OtpError, Secret};

/// Will generate the code for `counter`, decoding the base32 (or raw) `secret` first.
///
/// ```rust
/// use totp_engine::{hotp, Algorithm, Secret};
///
/// let secret = Secret::Raw(b"12345678901234567890".to_vec());
/// assert_eq!(hotp::generate(&secret, 1, Algorithm::SHA1, 6).unwrap(), "287082");
/// ```
///
/// # Errors
///
/// - [OtpError::UnsupportedDigitLength] when `digits` is not between 6 and 8
/// - [OtpError::InvalidCounter] when `counter` is negative
/// - [OtpError::InvalidSecretFormat] when `secret` is not valid base32
pub fn generate(
    secret: &Secret,
    counter: i64,
    algorithm: Algorithm,
    digits: usize,
) -> Result<String, OtpError> {
    assert_digits(&digits)?;
    let counter = encode_counter(counter)?;
    let key = secret.to_bytes()?;
    Ok(truncate(&algorithm.sign(&key, &counter)?, digits))
}

/// Same as [generate] with an already decoded key.
pub fn generate_raw(
    key: &[u8],
    counter: i64,
    algorithm: Algorithm,
    digits: usize,
) -> Result<String, OtpError> {
    assert_digits(&digits)?;
    let counter = encode_counter(counter)?;
    Ok(truncate(&algorithm.sign(key, &counter)?, digits))
}

/// 8 bytes, big-endian, as the moving factor is defined in RFC 4226 section 5.1.
pub(crate) fn encode_counter(counter: i64) -> Result<[u8; 8], OtpError> {
    u64::try_from(counter)
        .map(u64::to_be_bytes)
        .map_err(|_| OtpError::InvalidCounter(counter))
}

/// Dynamic truncation, then reduction to `digits` zero-padded decimal digits.
///
/// `digest` is an HMAC output, at least 20 bytes, so the 4 bytes at any offset in 0..=15 exist.
pub(crate) fn truncate(digest: &[u8], digits: usize) -> String {
    let offset = digest.last().map_or(0, |b| (b & 0x0f) as usize);
    let bin_code = u32::from_be_bytes([
        digest[offset],
        digest[offset + 1],
        digest[offset + 2],
        digest[offset + 3],
    ]) & 0x7fff_ffff;
    format!(
        "{1:00$}",
        digits,
        bin_code % 10_u32.pow(digits as u32)
    )
}
