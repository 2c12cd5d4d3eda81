use std::time::Duration;

use rand::Rng;

/// Bounded exponential backoff with jitter for connection retries.
///
/// Delays double from `base` up to `cap`; each delay is jittered uniformly
/// within `[d/2, d]` so a fleet of producers does not reconnect in lockstep.
/// Call [`reset`](Backoff::reset) after a successful connection.
#[derive(Debug)]
pub struct Backoff {
    base: Duration,
    cap: Duration,
    attempt: u32,
}

impl Backoff {
    pub fn new(base: Duration, cap: Duration) -> Self {
        Self {
            base,
            cap,
            attempt: 0,
        }
    }

    /// Next delay to sleep before retrying.
    pub fn next(&mut self) -> Duration {
        let exp = self
            .base
            .saturating_mul(2u32.saturating_pow(self.attempt.min(16)))
            .min(self.cap);
        self.attempt = self.attempt.saturating_add(1);

        let millis = exp.as_millis() as u64;
        if millis == 0 {
            return Duration::ZERO;
        }
        let half = millis / 2;
        let jittered = half + rand::rng().random_range(0..=millis - half);
        Duration::from_millis(jittered)
    }

    /// Forget accumulated failures after a successful connection.
    pub fn reset(&mut self) {
        self.attempt = 0;
    }
}
