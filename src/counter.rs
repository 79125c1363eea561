//! Mapping between wall-clock seconds and [rfc-6238](https://tools.ietf.org/html/rfc6238#section-4.2) time steps.

use crate::rfc::assert_step;
use crate::OtpError;

/// Number of whole steps of `period` seconds since the UNIX epoch.
///
/// Rounds toward negative infinity, so `-1` with a 30 second period is step `-1`, not `0`.
///
/// # Errors
///
/// Will return [OtpError::InvalidPeriod] when `period` is zero or does not fit an `i64`.
pub fn counter_for(timestamp: i64, period: u64) -> Result<i64, OtpError> {
    Ok(timestamp.div_euclid(step_seconds(period)?))
}

/// Returns the timestamp of the first second for the next step
/// given the provided timestamp in seconds
pub fn next_step(timestamp: i64, period: u64) -> Result<i64, OtpError> {
    let period = step_seconds(period)?;
    let counter = timestamp.div_euclid(period);
    Ok(counter.saturating_add(1).saturating_mul(period))
}

/// Seconds left before the code for `timestamp` expires, between 1 and `period`.
pub fn ttl(timestamp: i64, period: u64) -> Result<u64, OtpError> {
    let elapsed = timestamp.rem_euclid(step_seconds(period)?);
    // rem_euclid is never negative
    Ok(period - elapsed as u64)
}

fn step_seconds(period: u64) -> Result<i64, OtpError> {
    assert_step(period)?;
    i64::try_from(period).map_err(|_| OtpError::InvalidPeriod)
}
