//! `otpauth://totp/` enrollment URIs, the payload authenticator apps scan from a QR code.
//!
//! ```rust
//! use totp_engine::{Algorithm, OtpAuth, TOTP};
//!
//! let totp = TOTP::new(Algorithm::SHA1, 6, 1, 30, b"TestSecretSuperSecret".to_vec()).unwrap();
//! let enrollment = OtpAuth::new(totp, Some("Github".to_string()), "constantoine@github.com".to_string()).unwrap();
//! let url = enrollment.get_url();
//!
//! assert_eq!(OtpAuth::from_url(&url).unwrap(), enrollment);
//! ```

use url::{Host, Url};

use crate::rfc::{DEFAULT_DIGITS, DEFAULT_SKEW, DEFAULT_STEP};
use crate::{Algorithm, Secret, TotpUrlError, TOTP};

/// A [TOTP] together with the labels an authenticator app displays next to its codes.
#[derive(Debug, Clone)]
pub struct OtpAuth<T = Vec<u8>> {
    pub totp: TOTP<T>,
    /// The "Github" part of "Github:constantoine@github.com". Must not contain a colon `:`
    /// For example, the name of your service/website.
    /// Not mandatory, but strongly recommended!
    pub issuer: Option<String>,
    /// The "constantoine@github.com" part of "Github:constantoine@github.com". Must not contain a colon `:`
    /// For example, the name of your user's account.
    pub account_name: String,
}

impl<T: AsRef<[u8]>> PartialEq for OtpAuth<T> {
    fn eq(&self, other: &Self) -> bool {
        self.totp == other.totp
            && self.issuer == other.issuer
            && self.account_name == other.account_name
    }
}

impl<T: AsRef<[u8]>> OtpAuth<T> {
    /// # Errors
    ///
    /// Will return an error in case issuer or account name contain the character ':'
    pub fn new(
        totp: TOTP<T>,
        issuer: Option<String>,
        account_name: String,
    ) -> Result<OtpAuth<T>, TotpUrlError> {
        if let Some(issuer) = issuer.as_ref().filter(|i| i.contains(':')) {
            return Err(TotpUrlError::Issuer(issuer.to_string()));
        }
        if account_name.contains(':') {
            return Err(TotpUrlError::AccountName(account_name));
        }
        Ok(OtpAuth {
            totp,
            issuer,
            account_name,
        })
    }

    /// Will generate a standard URL used to automatically add TOTP auths. Usually used with qr codes
    ///
    /// Label and issuer will be URL-encoded if needed be
    /// Secret will be base 32'd without padding, as per RFC.
    pub fn get_url(&self) -> String {
        let account_name = urlencoding::encode(self.account_name.as_str());
        let mut label = account_name.to_string();
        let mut issuer_param = String::new();
        if let Some(issuer) = self.issuer.as_ref() {
            let issuer = urlencoding::encode(issuer.as_str());
            label = format!("{}:{}", issuer, account_name);
            issuer_param = format!("&issuer={}", issuer);
        }

        format!(
            "otpauth://totp/{}?secret={}{}&algorithm={}&digits={}&period={}",
            label,
            self.totp.get_secret_base32(),
            issuer_param,
            self.totp.algorithm,
            self.totp.digits,
            self.totp.step,
        )
    }
}

impl OtpAuth<Vec<u8>> {
    /// Generate a TOTP from the standard otpauth URL
    ///
    /// Missing parameters fall back to SHA1, 6 digits and 30 seconds. The skew is not part of
    /// the URL and is always the default of 1.
    pub fn from_url<S: AsRef<str>>(url: S) -> Result<OtpAuth<Vec<u8>>, TotpUrlError> {
        let url = Url::parse(url.as_ref())?;
        if url.scheme() != "otpauth" {
            return Err(TotpUrlError::Scheme(url.scheme().to_string()));
        }
        if url.host() != Some(Host::Domain("totp")) {
            return Err(TotpUrlError::Host(
                url.host_str().unwrap_or_default().to_string(),
            ));
        }

        let mut algorithm = Algorithm::SHA1;
        let mut digits = DEFAULT_DIGITS;
        let mut step = DEFAULT_STEP;
        let mut secret = Vec::new();

        // an encoded "%3A" separates issuer and account as well as a literal colon
        let path = url.path().trim_start_matches('/');
        let path = urlencoding::decode(path)
            .map_err(|_| TotpUrlError::AccountNameDecoding(path.to_string()))?;
        let (mut issuer, account_name) = match path.split_once(':') {
            Some((issuer, account_name)) => {
                (Some(issuer.to_string()), account_name.trim_start().to_string())
            }
            None => (None, path.to_string()),
        };

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "algorithm" => {
                    algorithm = value
                        .parse::<Algorithm>()
                        .map_err(|_| TotpUrlError::Algorithm(value.to_string()))?;
                }
                "digits" => {
                    digits = value
                        .parse::<usize>()
                        .map_err(|_| TotpUrlError::Digits(value.to_string()))?;
                }
                "period" => {
                    step = value
                        .parse::<u64>()
                        .map_err(|_| TotpUrlError::Step(value.to_string()))?;
                }
                "secret" => {
                    secret = Secret::Encoded(value.to_string())
                        .to_bytes()
                        .map_err(|_| TotpUrlError::Secret(value.to_string()))?;
                }
                "issuer" => {
                    let param_issuer = value.into_owned();
                    if let Some(path_issuer) = issuer.as_ref() {
                        if path_issuer != &param_issuer {
                            return Err(TotpUrlError::IssuerMistmatch(
                                path_issuer.to_string(),
                                param_issuer,
                            ));
                        }
                    }
                    issuer = Some(param_issuer);
                }
                _ => {}
            }
        }

        if secret.is_empty() {
            return Err(TotpUrlError::Secret("".to_string()));
        }

        let totp = TOTP::new(algorithm, digits, DEFAULT_SKEW, step, secret)?;
        OtpAuth::new(totp, issuer, account_name)
    }
}
