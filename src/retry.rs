//! Retry policy for transient transport failures.
//!
//! Retries are blind: the same request is repeated verbatim after an
//! exponentially growing delay, and only transport-level failures (timeouts,
//! network errors) are retried. Non-2xx HTTP responses are surfaced
//! immediately and never re-attempted.

use http::Method;
use std::time::Duration;

/// Exponential backoff between retry attempts.
///
/// The delay before retry `n` (0-indexed) is `base * 2^n`: with the default
/// 100 ms base, attempts are separated by 100 ms, 200 ms, 400 ms, and so on.
/// There is no jitter and no upper cap; attempt counts are small enough that
/// neither matters.
///
/// # Examples
///
/// ```
/// use backstop::retry::Backoff;
/// use std::time::Duration;
///
/// let backoff = Backoff::default();
/// assert_eq!(backoff.delay_for(0), Duration::from_millis(100));
/// assert_eq!(backoff.delay_for(2), Duration::from_millis(400));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Backoff {
    /// The delay before the first retry.
    pub base: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            base: Duration::from_millis(100),
        }
    }
}

impl Backoff {
    /// Returns the delay to sleep after the failed attempt with the given
    /// 0-indexed number.
    pub fn delay_for(&self, attempt: usize) -> Duration {
        let multiplier = 2u64.saturating_pow(attempt.min(u32::MAX as usize) as u32);
        self.base
            .saturating_mul(multiplier.try_into().unwrap_or(u32::MAX))
    }
}

/// Returns the default number of transport attempts for a verb.
///
/// Reads (GET) are repeated up to 3 times; mutating verbs (POST, PUT, PATCH,
/// DELETE) get a single attempt unless the caller overrides, since the layer
/// has no idempotency-key mechanism and a blind replay could double-apply.
pub fn default_attempts(method: &Method) -> usize {
    if *method == Method::GET {
        3
    } else {
        1
    }
}
