use crate::Algorithm;
use crate::OtpError;
use crate::TOTP;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Digits per code when nothing else is asked for, what every authenticator app supports.
pub const DEFAULT_DIGITS: usize = 6;
/// Per [rfc-4226](https://tools.ietf.org/html/rfc4226#section-5.3), codes are 6 to 8 digits long.
pub const MIN_DIGITS: usize = 6;
/// Longest code RFC 4226 allows.
pub const MAX_DIGITS: usize = 8;
/// The recommended value per [rfc-6238](https://tools.ietf.org/html/rfc6238#section-5.2) is 30 seconds
pub const DEFAULT_STEP: u64 = 30;
/// The recommended value per [rfc-6238](https://tools.ietf.org/html/rfc6238#section-5.2) is 1.
pub const DEFAULT_SKEW: u8 = 1;
/// Widest window a verifier accepts. At 6 digits and a skew of 3, seven codes are valid at once,
/// so a blind guess succeeds with probability 7 in a million.
pub const MAX_SKEW: u8 = 3;
/// The length of the shared secret MUST be at least 128 bits
pub const MIN_SECRET_BITS: usize = 128;
/// This document RECOMMENDs a shared secret length of 160 bits.
pub const DEFAULT_SECRET_BITS: usize = 160;
/// Floor for generated secrets, the smallest size RFC 4226 still tolerates for legacy tokens.
pub const MIN_GENERATED_SECRET_BITS: usize = 80;

pub fn assert_digits(digits: &usize) -> Result<(), OtpError> {
    if !(MIN_DIGITS..=MAX_DIGITS).contains(digits) {
        Err(OtpError::UnsupportedDigitLength(*digits))
    } else {
        Ok(())
    }
}

pub fn assert_secret_length(secret: &[u8]) -> Result<(), OtpError> {
    if secret.len() * 8 < MIN_SECRET_BITS {
        Err(OtpError::SecretTooSmall(secret.len() * 8))
    } else {
        Ok(())
    }
}

pub fn assert_step(step: u64) -> Result<(), OtpError> {
    if step == 0 {
        Err(OtpError::InvalidPeriod)
    } else {
        Ok(())
    }
}

pub fn assert_skew(skew: u8) -> Result<(), OtpError> {
    if skew > MAX_SKEW {
        Err(OtpError::WindowTooLarge(skew))
    } else {
        Ok(())
    }
}

/// [rfc-6238](https://tools.ietf.org/html/rfc6238) compliant set of options to create a [TOTP](struct.TOTP.html)
///
/// # Example
/// ```
/// use totp_engine::{Algorithm, Rfc6238, TOTP};
///
/// let mut rfc = Rfc6238::with_defaults(
///     "totp-sercret-123"
/// ).unwrap();
///
/// // optional, set digits, skew, step, algorithm
/// rfc.digits(8).unwrap();
/// rfc.step(60).unwrap();
/// rfc.algorithm(Algorithm::SHA256);
///
/// let totp = TOTP::from_rfc6238(rfc).unwrap();
/// assert_eq!(totp.step, 60);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Rfc6238<T = Vec<u8>> {
    /// SHA-1
    algorithm: Algorithm,
    /// The number of digits composing the auth code. Per [rfc-4226](https://tools.ietf.org/html/rfc4226#section-5.3), this can oscilate between 6 and 8 digits
    digits: usize,
    /// The recommended value per [rfc-6238](https://tools.ietf.org/html/rfc6238#section-5.2) is 1.
    skew: u8,
    /// The recommended value per [rfc-6238](https://tools.ietf.org/html/rfc6238#section-5.2) is 30 seconds
    step: u64,
    /// As per [rfc-4226](https://tools.ietf.org/html/rfc4226#section-4) the secret should come from a strong source, most likely a CSPRNG. It should be at least 128 bits, but 160 are recommended
    secret: T,
}

impl<T: AsRef<[u8]>> Rfc6238<T> {
    /// Create an [rfc-6238](https://tools.ietf.org/html/rfc6238) compliant set of options that can be turned into a [TOTP](struct.TOTP.html)
    ///
    /// # Errors
    ///
    /// will return an [OtpError](enum.OtpError.html) when
    /// - `digits` is lower than 6 or higher than 8
    /// - `secret` is smaller than 128 bits (16 characters)
    pub fn new(digits: usize, secret: T) -> Result<Rfc6238<T>, OtpError> {
        assert_digits(&digits)?;
        assert_secret_length(secret.as_ref())?;
        Ok(Rfc6238 {
            algorithm: Algorithm::SHA1,
            digits,
            skew: DEFAULT_SKEW,
            step: DEFAULT_STEP,
            secret,
        })
    }

    /// Create an [rfc-6238](https://tools.ietf.org/html/rfc6238) compliant set of options that can be turned into a [TOTP](struct.TOTP.html),
    /// with a default value of 6 for `digits`
    ///
    /// # Errors
    ///
    /// will return an [OtpError](enum.OtpError.html) when
    /// - `secret` is smaller than 128 bits (16 characters)
    pub fn with_defaults(secret: T) -> Result<Rfc6238<T>, OtpError> {
        Rfc6238::new(DEFAULT_DIGITS, secret)
    }

    /// Set the `digits`
    pub fn digits(&mut self, value: usize) -> Result<(), OtpError> {
        assert_digits(&value)?;
        self.digits = value;
        Ok(())
    }

    /// Set the `skew`, at most [MAX_SKEW]
    pub fn skew(&mut self, value: u8) -> Result<(), OtpError> {
        assert_skew(value)?;
        self.skew = value;
        Ok(())
    }

    /// Set the `step`, in seconds
    pub fn step(&mut self, value: u64) -> Result<(), OtpError> {
        assert_step(value)?;
        self.step = value;
        Ok(())
    }

    /// Set the `algorithm`
    pub fn algorithm(&mut self, value: Algorithm) {
        self.algorithm = value;
    }
}

impl<T: AsRef<[u8]>> TryFrom<Rfc6238<T>> for TOTP<T> {
    type Error = OtpError;

    /// Try to create a [TOTP](struct.TOTP.html) from a [Rfc6238](struct.Rfc6238.html) config
    fn try_from(rfc: Rfc6238<T>) -> Result<Self, Self::Error> {
        TOTP::new(rfc.algorithm, rfc.digits, rfc.skew, rfc.step, rfc.secret)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Rfc6238, TOTP};
    use crate::{Algorithm, OtpError};

    const GOOD_SECRET: &str = "01234567890123456789";

    #[test]
    fn new_rfc_digits() {
        for x in 0..=20 {
            let rfc = Rfc6238::new(x, GOOD_SECRET.to_string());
            if !(6..=8).contains(&x) {
                assert!(matches!(rfc.unwrap_err(), OtpError::UnsupportedDigitLength(d) if d == x));
            } else {
                assert!(rfc.is_ok());
            }
        }
    }

    #[test]
    fn new_rfc_secret() {
        let mut secret = String::from("");
        for _ in 0..=20 {
            secret = format!("{}{}", secret, "0");
            let rfc = Rfc6238::new(6, secret.clone());
            let rfc_default = Rfc6238::with_defaults(secret.clone());
            if secret.len() < 16 {
                assert!(matches!(rfc.unwrap_err(), OtpError::SecretTooSmall(_)));
                assert!(matches!(
                    rfc_default.unwrap_err(),
                    OtpError::SecretTooSmall(bits) if bits == secret.len() * 8
                ));
            } else {
                assert!(rfc.is_ok());
                assert!(rfc_default.is_ok());
            }
        }
    }

    #[test]
    fn rfc_to_totp_ok() {
        let rfc = Rfc6238::new(8, GOOD_SECRET.to_string()).unwrap();
        let otp = TOTP::try_from(rfc).unwrap();
        assert_eq!(&otp.secret, GOOD_SECRET);
        assert_eq!(otp.algorithm, Algorithm::SHA1);
        assert_eq!(otp.digits, 8);
        assert_eq!(otp.skew, 1);
        assert_eq!(otp.step, 30)
    }

    #[test]
    fn rfc_with_default_set_values() {
        let mut rfc = Rfc6238::with_defaults(GOOD_SECRET.to_string()).unwrap();

        let fail = rfc.digits(4);
        assert!(matches!(fail.unwrap_err(), OtpError::UnsupportedDigitLength(4)));
        assert_eq!(rfc.digits, 6);
        assert!(rfc.digits(8).is_ok());
        assert_eq!(rfc.digits, 8);

        assert!(matches!(rfc.step(0).unwrap_err(), OtpError::InvalidPeriod));
        assert_eq!(rfc.step, 30);
        assert!(rfc.step(60).is_ok());

        assert!(matches!(rfc.skew(4).unwrap_err(), OtpError::WindowTooLarge(4)));
        assert_eq!(rfc.skew, 1);
        assert!(rfc.skew(0).is_ok());

        rfc.algorithm(Algorithm::SHA512);

        let otp = TOTP::from_rfc6238(rfc).unwrap();
        assert_eq!(otp.algorithm, Algorithm::SHA512);
        assert_eq!(otp.digits, 8);
        assert_eq!(otp.skew, 0);
        assert_eq!(otp.step, 60);
    }
}
