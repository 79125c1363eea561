use thiserror::Error;
use url::ParseError;

use crate::OtpError;

#[derive(Debug, Error)]
pub enum TotpUrlError {
    #[error("Error parsing URL: {0}")]
    Url(#[from] ParseError),
    #[error("Scheme should be otpauth, not \"{0}\"")]
    Scheme(String),
    #[error("Host should be totp, not \"{0}\"")]
    Host(String),
    #[error("Secret \"{0}\" is not a valid non-padded base32 string")]
    Secret(String),
    #[error("Algorithm can only be SHA1, SHA256 or SHA512, not \"{0}\"")]
    Algorithm(String),
    #[error("Could not parse \"{0}\" as a number.")]
    Digits(String),
    #[error("Could not parse \"{0}\" as a number.")]
    Step(String),
    #[error("Issuer can't contain a colon. \"{0}\" contains a colon")]
    Issuer(String),
    #[error("Couldn't URL decode \"{0}\"")]
    IssuerDecoding(String),
    #[error("An issuer \"{0}\" could be retrieved from the path, but a different issuer \"{1}\" was found in the issuer URL parameter")]
    IssuerMistmatch(String, String),
    #[error("Account Name can't contain a colon. \"{0}\" contains a colon")]
    AccountName(String),
    #[error("Couldn't URL decode \"{0}\"")]
    AccountNameDecoding(String),
    #[error(transparent)]
    Otp(#[from] OtpError),
}
