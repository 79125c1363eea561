//! Checking a submitted code against every code valid around the current time step.
//!
//! A window of `n` steps accepts the codes of the current step and of the `n` steps on either
//! side. Each extra step adds two valid codes, which doubles the odds of a blind guess,
//! hence the [MAX_SKEW](crate::rfc::MAX_SKEW) cap.

use constant_time_eq::constant_time_eq;

use crate::counter::counter_for;
use crate::hotp::generate_raw;
use crate::rfc::{assert_digits, assert_skew, assert_step};
use crate::{Algorithm, OtpError, Secret};

/// Will check if `submitted` is the code of any step within `window_steps` of the one `now` falls in.
///
/// ```rust
/// use totp_engine::{verify, Algorithm, Secret};
///
/// let secret = Secret::Encoded("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ".to_string());
/// assert!(verify::is_valid(&secret, 30, Algorithm::SHA1, 8, "94287082", 59, 1).unwrap());
/// ```
///
/// # Errors
///
/// Malformed input is reported before any hashing happens:
/// - [OtpError::InvalidPeriod] when `period` is zero
/// - [OtpError::WindowTooLarge] when `window_steps` is above [MAX_SKEW](crate::rfc::MAX_SKEW)
/// - [OtpError::UnsupportedDigitLength] when `digits` is not between 6 and 8
/// - [OtpError::InvalidSecretFormat] when `secret` cannot be decoded
/// - [OtpError::InvalidCodeFormat] when `submitted` is not `digits` ASCII digits
/// - [OtpError::InvalidCounter] when `now` is before the UNIX epoch
///
/// A wrong code and a code from outside the window both give `Ok(false)`.
pub fn is_valid(
    secret: &Secret,
    period: u64,
    algorithm: Algorithm,
    digits: usize,
    submitted: &str,
    now: i64,
    window_steps: u8,
) -> Result<bool, OtpError> {
    assert_step(period)?;
    assert_skew(window_steps)?;
    assert_digits(&digits)?;
    let key = secret.to_bytes()?;
    check_window(&key, period, algorithm, digits, submitted, now, window_steps)
}

/// Window walk shared with [TOTP::check](crate::TOTP::check), for an already validated configuration.
pub(crate) fn check_window(
    key: &[u8],
    period: u64,
    algorithm: Algorithm,
    digits: usize,
    submitted: &str,
    now: i64,
    window_steps: u8,
) -> Result<bool, OtpError> {
    if !is_well_formed(submitted, digits) {
        tracing::debug!(digits, "submitted code is malformed");
        return Err(OtpError::InvalidCodeFormat);
    }

    let current = counter_for(now, period)?;
    if current < 0 {
        return Err(OtpError::InvalidCounter(current));
    }

    for offset in offsets(window_steps) {
        let counter = match current.checked_add(offset) {
            // steps before the epoch never had a code
            Some(counter) if counter >= 0 => counter,
            _ => continue,
        };
        let candidate = generate_raw(key, counter, algorithm, digits)?;
        if constant_time_eq(candidate.as_bytes(), submitted.as_bytes()) {
            tracing::debug!(offset, "code accepted");
            return Ok(true);
        }
    }

    tracing::debug!(window_steps, "code rejected");
    Ok(false)
}

fn is_well_formed(submitted: &str, digits: usize) -> bool {
    submitted.len() == digits && submitted.bytes().all(|b| b.is_ascii_digit())
}

/// 0, -1, +1, -2, +2, ...
fn offsets(window_steps: u8) -> impl Iterator<Item = i64> {
    std::iter::once(0).chain((1..=i64::from(window_steps)).flat_map(|d| [-d, d]))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::{is_valid, offsets};
    use crate::{Algorithm, OtpError, Secret};

    // Counter 5 of the RFC 4226 vectors
    const NOW: i64 = 5 * 30 + 12;

    fn rfc4226_secret() -> Secret {
        Secret::Encoded("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ".to_string())
    }

    fn check(code: &str, now: i64, window_steps: u8) -> Result<bool, OtpError> {
        is_valid(
            &rfc4226_secret(),
            30,
            Algorithm::SHA1,
            6,
            code,
            now,
            window_steps,
        )
    }

    #[test]
    fn offsets_try_current_step_first() {
        assert_eq!(offsets(0).collect::<Vec<_>>(), vec![0]);
        assert_eq!(offsets(2).collect::<Vec<_>>(), vec![0, -1, 1, -2, 2]);
    }

    #[test]
    fn accepts_current_code_without_window() {
        assert!(check("254676", NOW, 0).unwrap());
    }

    #[test]
    fn rejects_neighbour_without_window() {
        assert!(!check("338314", NOW, 0).unwrap());
        assert!(!check("287922", NOW, 0).unwrap());
    }

    #[rstest]
    #[case("338314", true)]
    #[case("254676", true)]
    #[case("287922", true)]
    #[case("969429", false)]
    #[case("162583", false)]
    #[case("000000", false)]
    fn window_of_one_step(#[case] code: &str, #[case] expected: bool) {
        assert_eq!(check(code, NOW, 1).unwrap(), expected);
    }

    #[test]
    fn window_of_two_steps_reaches_further() {
        assert!(check("969429", NOW, 2).unwrap());
        assert!(check("162583", NOW, 2).unwrap());
        assert!(!check("359152", NOW, 2).unwrap());
    }

    #[rstest]
    #[case("25467")]
    #[case("2546760")]
    #[case("25467a")]
    #[case(" 54676")]
    #[case("-54676")]
    #[case("")]
    fn malformed_code(#[case] code: &str) {
        assert!(matches!(check(code, NOW, 1), Err(OtpError::InvalidCodeFormat)));
    }

    #[test]
    fn malformed_secret_is_not_a_wrong_code() {
        let res = is_valid(
            &Secret::Encoded("GEZDGNBV!Y3TQOJQ".to_string()),
            30,
            Algorithm::SHA1,
            6,
            "254676",
            NOW,
            1,
        );
        assert!(matches!(res, Err(OtpError::InvalidSecretFormat)));
    }

    #[test]
    fn unsupported_digits() {
        let res = is_valid(&rfc4226_secret(), 30, Algorithm::SHA1, 9, "123456789", NOW, 1);
        assert!(matches!(res, Err(OtpError::UnsupportedDigitLength(9))));
    }

    #[test]
    fn configuration_is_checked_before_anything_else() {
        let bad_secret = Secret::Encoded("???".to_string());
        assert!(matches!(
            is_valid(&bad_secret, 0, Algorithm::SHA1, 4, "x", -1, 9),
            Err(OtpError::InvalidPeriod)
        ));
        assert!(matches!(
            is_valid(&bad_secret, 30, Algorithm::SHA1, 4, "x", -1, 9),
            Err(OtpError::WindowTooLarge(9))
        ));
        assert!(matches!(
            is_valid(&bad_secret, 30, Algorithm::SHA1, 4, "x", -1, 1),
            Err(OtpError::UnsupportedDigitLength(4))
        ));
        assert!(matches!(
            is_valid(&bad_secret, 30, Algorithm::SHA1, 6, "x", -1, 1),
            Err(OtpError::InvalidSecretFormat)
        ));
        assert!(matches!(
            is_valid(&rfc4226_secret(), 30, Algorithm::SHA1, 6, "x", -1, 1),
            Err(OtpError::InvalidCodeFormat)
        ));
    }

    #[test]
    fn largest_window_is_accepted() {
        assert!(check("359152", NOW, crate::rfc::MAX_SKEW).unwrap());
        assert!(!check("287082", NOW, crate::rfc::MAX_SKEW).unwrap());
    }

    #[test]
    fn window_stops_at_the_epoch() {
        // step 0 has no predecessor, -1 is skipped rather than refused
        assert!(check("755224", 10, 1).unwrap());
        assert!(check("287082", 10, 1).unwrap());
        assert!(!check("359152", 10, 1).unwrap());
    }

    #[test]
    fn time_before_epoch() {
        assert!(matches!(check("755224", -1, 1), Err(OtpError::InvalidCounter(-1))));
    }

    #[rstest]
    #[case("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ", Algorithm::SHA1, 59, "94287082")]
    #[case("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQGEZA", Algorithm::SHA256, 1111111109, "68084774")]
    #[case("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQGEZDGNA", Algorithm::SHA512, 20000000000, "47863826")]
    fn rfc6238_codes_are_accepted(
        #[case] secret: &str,
        #[case] algorithm: Algorithm,
        #[case] now: i64,
        #[case] code: &str,
    ) {
        let secret = Secret::Encoded(secret.to_string());
        assert!(is_valid(&secret, 30, algorithm, 8, code, now, 0).unwrap());
        // same secret, wrong algorithm
        let other = match algorithm {
            Algorithm::SHA1 => Algorithm::SHA256,
            _ => Algorithm::SHA1,
        };
        assert!(!is_valid(&secret, 30, other, 8, code, now, 1).unwrap());
    }
}
