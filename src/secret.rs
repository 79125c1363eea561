//! Representation of a secret either a "raw" \[u8\] or "base 32" encoded String
//!
//! # Examples
//!
//! - Verify a code against a base32 encoded secret
//! ```
//! use totp_engine::{hotp, Algorithm, Secret};
//!
//! let secret = Secret::Encoded(String::from("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ"));
//! let code = hotp::generate(&secret, 0, Algorithm::SHA1, 6).unwrap();
//!
//! assert_eq!(code, "755224");
//! ```
//!
//! - Provision a new secret and hand its base32 form to the user
//! ```
//! # #[cfg(feature = "gen_secret")] {
//! use totp_engine::Secret;
//!
//! let secret = Secret::generate(160).unwrap();
//! println!("add this key to your authenticator:\t{}", secret);
//! assert_eq!(secret.to_bytes().unwrap().len(), 20);
//! # }
//! ```

use base32::{self, Alphabet};

use constant_time_eq::constant_time_eq;

use crate::OtpError;

#[cfg(feature = "gen_secret")]
use crate::rfc::{DEFAULT_SECRET_BITS, MIN_GENERATED_SECRET_BITS};

/// Shared secret between client and server to validate token against/generate token from.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "zeroize", derive(zeroize::Zeroize, zeroize::ZeroizeOnDrop))]
pub enum Secret {
    /// Non-encoded "raw" secret.
    Raw(Vec<u8>),
    /// Base32 encoded secret. Decoding is case-insensitive.
    Encoded(String),
}

impl PartialEq for Secret {
    /// Will check that to_bytes() returns the same.
    /// One secret can be Raw, and the other Encoded.
    /// A secret that cannot be decoded is never equal to anything.
    fn eq(&self, other: &Self) -> bool {
        match (self.to_bytes(), other.to_bytes()) {
            (Ok(left), Ok(right)) => constant_time_eq(&left, &right),
            _ => false,
        }
    }
}

/// Decodes RFC 4648 base32 without padding, after folding to uppercase.
///
/// Anything outside `A-Z2-7` is refused up front instead of being left to the decoder,
/// and so is any text that is not the canonical encoding of its bytes: a length no byte
/// count produces, or unused trailing bits that are not zero.
pub(crate) fn decode_base32(encoded: &str) -> Result<Vec<u8>, OtpError> {
    let normalized = encoded.to_ascii_uppercase();
    if !normalized
        .bytes()
        .all(|b| matches!(b, b'A'..=b'Z' | b'2'..=b'7'))
    {
        return Err(OtpError::InvalidSecretFormat);
    }
    // 1, 3 and 6 leftover characters never come out of an encoder
    if matches!(normalized.len() % 8, 1 | 3 | 6) {
        return Err(OtpError::InvalidSecretFormat);
    }

    let bytes = match base32::decode(Alphabet::Rfc4648 { padding: false }, &normalized) {
        Some(bytes) if !bytes.is_empty() => bytes,
        _ => return Err(OtpError::InvalidSecretFormat),
    };
    if !constant_time_eq(encode_base32(&bytes).as_bytes(), normalized.as_bytes()) {
        return Err(OtpError::InvalidSecretFormat);
    }
    Ok(bytes)
}

pub(crate) fn encode_base32(bytes: &[u8]) -> String {
    base32::encode(Alphabet::Rfc4648 { padding: false }, bytes)
}

impl Secret {
    /// Get the inner String value as a Vec of bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, OtpError> {
        match self {
            Secret::Raw(s) if s.is_empty() => Err(OtpError::InvalidSecretFormat),
            Secret::Raw(s) => Ok(s.to_vec()),
            Secret::Encoded(s) => decode_base32(s),
        }
    }

    /// Try to transform a `Secret::Encoded` into a `Secret::Raw`
    pub fn to_raw(&self) -> Result<Self, OtpError> {
        match self {
            Secret::Raw(_) => Ok(self.clone()),
            Secret::Encoded(s) => Ok(Secret::Raw(decode_base32(s)?)),
        }
    }

    /// Try to transforms a `Secret::Raw` into a `Secret::Encoded`.
    pub fn to_encoded(&self) -> Self {
        match self {
            Secret::Raw(s) => Secret::Encoded(encode_base32(s)),
            Secret::Encoded(_) => self.clone(),
        }
    }

    /// Generate a CSPRNG binary value of 160 bits,
    /// the recomended size from [rfc-4226](https://www.rfc-editor.org/rfc/rfc4226#section-4).
    ///
    /// > The length of the shared secret MUST be at least 128 bits.
    /// > This document RECOMMENDs a shared secret length of 160 bits.
    #[cfg(feature = "gen_secret")]
    #[cfg_attr(docsrs, doc(cfg(feature = "gen_secret")))]
    pub fn generate_secret() -> Result<Secret, OtpError> {
        Secret::generate(DEFAULT_SECRET_BITS)
    }

    /// Generate a base32 encoded secret of `bits` bits from the operating system's CSPRNG.
    ///
    /// # Errors
    ///
    /// - `bits` is not a multiple of 8, or is lower than 80
    /// - the operating system could not provide entropy
    #[cfg(feature = "gen_secret")]
    #[cfg_attr(docsrs, doc(cfg(feature = "gen_secret")))]
    pub fn generate(bits: usize) -> Result<Secret, OtpError> {
        let mut rng = rand::rngs::OsRng;
        Secret::generate_with(&mut rng, bits)
    }

    /// Same as [generate](Secret::generate), drawing from the given cryptographic RNG.
    ///
    /// Any infallible `CryptoRng` (`rand::rng()`, a seeded `StdRng`, ...) qualifies too.
    #[cfg(feature = "gen_secret")]
    #[cfg_attr(docsrs, doc(cfg(feature = "gen_secret")))]
    pub fn generate_with<R>(rng: &mut R, bits: usize) -> Result<Secret, OtpError>
    where
        R: rand::TryCryptoRng + ?Sized,
    {
        if bits % 8 != 0 || bits < MIN_GENERATED_SECRET_BITS {
            return Err(OtpError::InvalidSecretLength(bits));
        }

        let mut secret = vec![0u8; bits / 8];
        if let Err(e) = rng.try_fill_bytes(&mut secret) {
            tracing::error!(error = %e, "random source failed while generating a secret");
            return Err(OtpError::RandomSourceExhausted(e.to_string()));
        }

        let encoded = encode_base32(&secret);
        #[cfg(feature = "zeroize")]
        zeroize::Zeroize::zeroize(&mut secret);

        tracing::debug!(bits, "generated shared secret");
        Ok(Secret::Encoded(encoded))
    }
}

impl std::fmt::Display for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Secret::Raw(bytes) => {
                for b in bytes {
                    write!(f, "{:02x}", b)?;
                }
                Ok(())
            }
            Secret::Encoded(s) => write!(f, "{}", s),
        }
    }
}
