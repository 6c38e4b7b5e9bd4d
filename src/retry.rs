//! Poll policies for asynchronous task resolution.
//!
//! Some Sentry mutations return a task handle instead of the finished
//! resource. The client resolves the handle by checking the task status
//! repeatedly; a [`PollPolicy`] decides how long to wait before each check
//! and how many checks to make before giving up.

use rand::Rng;
use std::time::Duration;

/// Defines the wait before each task status check and the check budget.
///
/// # Examples
///
/// ```
/// use sentry_api::PollPolicy;
/// use std::time::Duration;
///
/// // Five checks, five seconds apart
/// let fixed = PollPolicy::default();
/// assert_eq!(fixed.max_attempts(), 5);
///
/// // Exponential backoff: 1s, 2s, 4s, 8s...
/// let exponential = PollPolicy::ExponentialBackoff {
///     initial_delay: Duration::from_secs(1),
///     max_delay: Duration::from_secs(30),
///     max_attempts: 6,
///     jitter: true,
/// };
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PollPolicy {
    /// Wait the same delay before every check.
    Fixed {
        /// The delay before each status check.
        delay: Duration,
        /// The maximum number of status checks.
        max_attempts: usize,
    },

    /// Wait exponentially increasing delays.
    ///
    /// Check `n` waits for `initial_delay * 2^(n - 1)` (capped at `max_delay`).
    /// Optional jitter scales each delay to between 50% and 100%.
    ExponentialBackoff {
        /// The delay before the first check.
        initial_delay: Duration,
        /// The maximum delay between checks.
        max_delay: Duration,
        /// The maximum number of status checks.
        max_attempts: usize,
        /// Whether to add random jitter to delays.
        jitter: bool,
    },
}

impl Default for PollPolicy {
    fn default() -> Self {
        PollPolicy::Fixed {
            delay: Duration::from_secs(5),
            max_attempts: 5,
        }
    }
}

impl PollPolicy {
    /// Returns the delay before the given check, or `None` if the budget is spent.
    ///
    /// # Arguments
    ///
    /// * `attempt` - The check number (1-indexed)
    pub fn delay_for_attempt(&self, attempt: usize) -> Option<Duration> {
        if attempt == 0 || attempt > self.max_attempts() {
            return None;
        }

        match self {
            PollPolicy::Fixed { delay, .. } => Some(*delay),
            PollPolicy::ExponentialBackoff {
                initial_delay,
                max_delay,
                jitter,
                ..
            } => {
                let multiplier = 2u64.saturating_pow(attempt.saturating_sub(1) as u32);
                let base_delay =
                    initial_delay.saturating_mul(multiplier.try_into().unwrap_or(u32::MAX));
                let delay = base_delay.min(*max_delay);

                if *jitter {
                    let jitter_factor = rand::thread_rng().gen_range(0.5..=1.0);
                    Some(delay.mul_f64(jitter_factor))
                } else {
                    Some(delay)
                }
            }
        }
    }

    /// Returns the maximum number of status checks.
    pub fn max_attempts(&self) -> usize {
        match self {
            PollPolicy::Fixed { max_attempts, .. } => *max_attempts,
            PollPolicy::ExponentialBackoff { max_attempts, .. } => *max_attempts,
        }
    }
}
