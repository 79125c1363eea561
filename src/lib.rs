//! This library generates and verifies one-time passwords per [rfc-6238](https://tools.ietf.org/html/rfc6238) (TOTP) and [rfc-4226](https://tools.ietf.org/html/rfc4226) (HOTP), provisions shared secrets, and tolerates clock drift through a configurable window of time steps. Everything is a pure function of its inputs: the clock and the random source are the only outside collaborators.
//!
//! Be aware that some authenticator apps will accept the `SHA256`
//! and `SHA512` algorithms but silently fallback to `SHA1` which will
//! make the `check()` function fail due to mismatched algorithms.
//!
//! Use the `SHA1` algorithm to avoid this problem.
//!
//! # Examples
//!
//! ```rust
//! use totp_engine::{Algorithm, Secret, TOTP};
//!
//! let totp = TOTP::new(
//!     Algorithm::SHA1,
//!     6,
//!     1,
//!     30,
//!     Secret::Raw("TestSecretSuperSecret".as_bytes().to_vec()).to_bytes().unwrap(),
//! ).unwrap();
//! let token = totp.generate_current().unwrap();
//! assert!(totp.check_current(&token).unwrap());
//! ```
//!
//! Without a [TOTP] value, straight from the stored base32 text:
//!
//! ```rust
//! use totp_engine::{verify, Algorithm, Secret};
//!
//! let secret = Secret::Encoded("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ".to_string());
//! let valid = verify::is_valid(&secret, 30, Algorithm::SHA1, 6, "287082", 45, 1).unwrap();
//! assert!(valid);
//! ```

mod clock;
pub mod counter;
mod error;
pub mod hotp;
pub mod rfc;
mod secret;
pub mod verify;

#[cfg(feature = "otpauth")]
mod otpauth;
#[cfg(feature = "otpauth")]
mod url_error;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::OtpError;
pub use rfc::Rfc6238;
pub use secret::Secret;

#[cfg(feature = "otpauth")]
pub use otpauth::OtpAuth;
#[cfg(feature = "otpauth")]
pub use url_error::TotpUrlError;

use constant_time_eq::constant_time_eq;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use core::fmt;
use std::str::FromStr;

use hmac::Mac;

type HmacSha1 = hmac::Hmac<sha1::Sha1>;
type HmacSha256 = hmac::Hmac<sha2::Sha256>;
type HmacSha512 = hmac::Hmac<sha2::Sha512>;

/// Algorithm enum holds the three standards algorithms for TOTP as per the [reference implementation](https://tools.ietf.org/html/rfc6238#appendix-A)
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum Algorithm {
    #[default]
    SHA1,
    SHA256,
    SHA512,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::SHA1 => f.write_str("SHA1"),
            Algorithm::SHA256 => f.write_str("SHA256"),
            Algorithm::SHA512 => f.write_str("SHA512"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = OtpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SHA1" => Ok(Algorithm::SHA1),
            "SHA256" => Ok(Algorithm::SHA256),
            "SHA512" => Ok(Algorithm::SHA512),
            _ => Err(OtpError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl Algorithm {
    fn hash<D>(mut digest: D, data: &[u8]) -> Vec<u8>
    where
        D: Mac,
    {
        digest.update(data);
        digest.finalize().into_bytes().to_vec()
    }

    /// HMAC of `data` keyed with `key`. Digests are 20, 32 and 64 bytes long respectively.
    pub(crate) fn sign(&self, key: &[u8], data: &[u8]) -> Result<Vec<u8>, OtpError> {
        // HMAC takes keys of any length, the error arm is unreachable in practice
        let invalid = |_| OtpError::InvalidSecretFormat;
        Ok(match self {
            Algorithm::SHA1 => Algorithm::hash(HmacSha1::new_from_slice(key).map_err(invalid)?, data),
            Algorithm::SHA256 => {
                Algorithm::hash(HmacSha256::new_from_slice(key).map_err(invalid)?, data)
            }
            Algorithm::SHA512 => {
                Algorithm::hash(HmacSha512::new_from_slice(key).map_err(invalid)?, data)
            }
        })
    }
}

/// TOTP holds informations as to how to generate an auth code and validate it. Its [secret](struct.TOTP.html#structfield.secret) field is sensitive data, treat it accordingly
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct TOTP<T = Vec<u8>> {
    /// SHA-1 is the most widespread algorithm used, and for totp pursposes, SHA-1 hash collisions are [not a problem](https://tools.ietf.org/html/rfc4226#appendix-B.2) as HMAC-SHA-1 is not impacted. It's also the main one cited in [rfc-6238](https://tools.ietf.org/html/rfc6238#section-3) even though the [reference implementation](https://tools.ietf.org/html/rfc6238#appendix-A) permits the use of SHA-1, SHA-256 and SHA-512. Not all clients support other algorithms then SHA-1
    pub algorithm: Algorithm,
    /// The number of digits composing the auth code. Per [rfc-4226](https://tools.ietf.org/html/rfc4226#section-5.3), this can oscilate between 6 and 8 digits
    pub digits: usize,
    /// Number of steps allowed as network delay. 1 would mean one step before current step and one step after are valids. The recommended value per [rfc-6238](https://tools.ietf.org/html/rfc6238#section-5.2) is 1, and at most [MAX_SKEW](rfc::MAX_SKEW) is accepted
    pub skew: u8,
    /// Duration in seconds of a step. The recommended value per [rfc-6238](https://tools.ietf.org/html/rfc6238#section-5.2) is 30 seconds
    pub step: u64,
    /// As per [rfc-4226](https://tools.ietf.org/html/rfc4226#section-4) the secret should come from a strong source, most likely a CSPRNG. It should be at least 128 bits, but 160 are recommended
    ///
    /// non-encoded value
    pub secret: T,
}

impl<T: AsRef<[u8]>> PartialEq for TOTP<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.algorithm != other.algorithm {
            return false;
        }
        if self.digits != other.digits {
            return false;
        }
        if self.skew != other.skew {
            return false;
        }
        if self.step != other.step {
            return false;
        }
        constant_time_eq(self.secret.as_ref(), other.secret.as_ref())
    }
}

impl<T> fmt::Display for TOTP<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "digits: {}; step: {}; alg: {}",
            self.digits, self.step, self.algorithm,
        )
    }
}

impl<T: AsRef<[u8]>> TOTP<T> {
    /// Will create a new instance of TOTP with given parameters. See [the doc](struct.TOTP.html#fields) for reference as to how to choose those values
    ///
    /// # Description
    /// * `secret`: expect a non-encoded value, to pass in base32 string use `Secret::Encoded(String)`
    ///
    /// ```rust
    /// use totp_engine::{Secret, TOTP, Algorithm};
    /// let secret = Secret::Encoded("OBWGC2LOFVZXI4TJNZTS243FMNZGK5BNGEZDG".to_string());
    /// let totp = TOTP::new(Algorithm::SHA1, 6, 1, 30, secret.to_bytes().unwrap()).unwrap();
    /// ```
    /// * `digits`: MUST be between 6 & 8
    /// * `skew`: at most [MAX_SKEW](rfc::MAX_SKEW)
    /// * `step`: MUST be positive
    /// * `secret`: Must have bitsize of at least 128
    ///
    /// # Errors
    ///
    /// Will return an error in case one of the above does not hold
    pub fn new(
        algorithm: Algorithm,
        digits: usize,
        skew: u8,
        step: u64,
        secret: T,
    ) -> Result<TOTP<T>, OtpError> {
        rfc::assert_digits(&digits)?;
        rfc::assert_skew(skew)?;
        rfc::assert_step(step)?;
        rfc::assert_secret_length(secret.as_ref())?;
        Ok(TOTP {
            algorithm,
            digits,
            skew,
            step,
            secret,
        })
    }

    /// Will create a new instance of TOTP from the given [Rfc6238](struct.Rfc6238.html) struct
    ///
    /// # Errors
    ///
    /// Will return an error in case the options are not rfc-6238 compliant
    pub fn from_rfc6238(rfc: Rfc6238<T>) -> Result<TOTP<T>, OtpError> {
        TOTP::try_from(rfc)
    }

    /// Will sign the given timestamp
    pub fn sign(&self, time: i64) -> Result<Vec<u8>, OtpError> {
        let counter = hotp::encode_counter(counter::counter_for(time, self.step)?)?;
        self.algorithm.sign(self.secret.as_ref(), &counter)
    }

    /// Will generate a token given the provided timestamp in seconds
    pub fn generate(&self, time: i64) -> Result<String, OtpError> {
        hotp::generate_raw(
            self.secret.as_ref(),
            counter::counter_for(time, self.step)?,
            self.algorithm,
            self.digits,
        )
    }

    /// Returns the timestamp of the first second for the next step
    /// given the provided timestamp in seconds
    pub fn next_step(&self, time: i64) -> Result<i64, OtpError> {
        counter::next_step(time, self.step)
    }

    /// Returns the timestamp of the first second of the next step
    /// According to system time
    pub fn next_step_current(&self) -> Result<i64, OtpError> {
        let t = clock::system_time()?;
        self.next_step(t)
    }

    /// Give the ttl (in seconds) of the current token
    pub fn ttl(&self) -> Result<u64, OtpError> {
        let t = clock::system_time()?;
        counter::ttl(t, self.step)
    }

    /// Generate a token from the current system time
    pub fn generate_current(&self) -> Result<String, OtpError> {
        self.generate_with(&SystemClock)
    }

    /// Generate a token for the time given by `clock`
    pub fn generate_with<C: Clock + ?Sized>(&self, clock: &C) -> Result<String, OtpError> {
        self.generate(clock.now()?)
    }

    /// Will check if token is valid given the provided timestamp in seconds, accounting [skew](struct.TOTP.html#structfield.skew)
    ///
    /// # Errors
    ///
    /// A token that is not made of exactly [digits](struct.TOTP.html#structfield.digits) ASCII digits
    /// is refused with [OtpError::InvalidCodeFormat] rather than compared.
    pub fn check(&self, token: &str, time: i64) -> Result<bool, OtpError> {
        rfc::assert_skew(self.skew)?;
        rfc::assert_digits(&self.digits)?;
        verify::check_window(
            self.secret.as_ref(),
            self.step,
            self.algorithm,
            self.digits,
            token,
            time,
            self.skew,
        )
    }

    /// Will check if token is valid by current system time, accounting [skew](struct.TOTP.html#structfield.skew)
    pub fn check_current(&self, token: &str) -> Result<bool, OtpError> {
        self.check_with(token, &SystemClock)
    }

    /// Will check if token is valid at the time given by `clock`, accounting [skew](struct.TOTP.html#structfield.skew)
    pub fn check_with<C: Clock + ?Sized>(&self, token: &str, clock: &C) -> Result<bool, OtpError> {
        self.check(token, clock.now()?)
    }

    /// Will return the base32 representation of the secret, which might be useful when users want to manually add the secret to their authenticator
    pub fn get_secret_base32(&self) -> String {
        secret::encode_base32(self.secret.as_ref())
    }
}
