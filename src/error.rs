use std::time::SystemTimeError;

use thiserror::Error;

/// Everything that can go wrong while provisioning a secret, generating a code, or verifying one.
///
/// None of these are retried internally: every operation is a pure function of its inputs,
/// so the caller must change the inputs before trying again.
#[derive(Debug, Error)]
pub enum OtpError {
    /// The secret is not a valid non-padded base32 string, or decodes to nothing.
    #[error("Secret is not a valid non-padded base32 string")]
    InvalidSecretFormat,
    /// Implementations MUST extract a 6-digit code at a minimum and possibly 7 and 8-digit code
    #[error("Implementations MUST extract a 6-digit code at a minimum and possibly 7 and 8-digit code. {0} digits is not allowed")]
    UnsupportedDigitLength(usize),
    /// Counters are unsigned 64-bit values on the wire, a negative one points at a clock or config error.
    #[error("Counter must not be negative, got {0}")]
    InvalidCounter(i64),
    /// The submitted code has the wrong length or contains something other than ASCII digits.
    #[error("Submitted code is not a decimal string of the configured length")]
    InvalidCodeFormat,
    /// The random source could not provide the requested entropy.
    #[error("Random source failed to provide entropy: {0}")]
    RandomSourceExhausted(String),
    /// Requested secret size is not a whole number of bytes, or is under 80 bits.
    #[error("Secret length must be a multiple of 8 and at least 80 bits, {0} bits is not allowed")]
    InvalidSecretLength(usize),
    /// The length of the shared secret MUST be at least 128 bits
    #[error("The length of the shared secret MUST be at least 128 bits. {0} bits is not enough")]
    SecretTooSmall(usize),
    #[error("Algorithm can only be SHA1, SHA256 or SHA512, not \"{0}\"")]
    UnknownAlgorithm(String),
    #[error("Time step must be a positive number of seconds")]
    InvalidPeriod,
    #[error("A window of {0} steps is too wide, at most {} steps are accepted", crate::rfc::MAX_SKEW)]
    WindowTooLarge(u8),
    #[error("System clock is set before the UNIX epoch")]
    Clock(#[from] SystemTimeError),
}
