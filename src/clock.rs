use std::time::{SystemTime, UNIX_EPOCH};

use crate::OtpError;

/// Source of the current time, in whole seconds since the UNIX epoch.
///
/// Implementations are read-only and safe to share between threads. Nothing guarantees the
/// value never goes backward; the verification window absorbs small adjustments.
pub trait Clock {
    /// Seconds since the UNIX epoch, negative before it.
    fn now(&self) -> Result<i64, OtpError>;
}

/// Reads [SystemTime].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Result<i64, OtpError> {
        let elapsed = SystemTime::now().duration_since(UNIX_EPOCH).map_err(|e| {
            tracing::warn!(error = %e, "system clock is set before the UNIX epoch");
            e
        })?;
        // Seconds beyond i64::MAX are out of reach for any real clock
        Ok(i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX))
    }
}

/// Always returns the same instant. Handy for replaying a verification or for tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> Result<i64, OtpError> {
        Ok(self.0)
    }
}

pub(crate) fn system_time() -> Result<i64, OtpError> {
    SystemClock.now()
}
