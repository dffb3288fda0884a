//! Retry policy for single-file store attempts.
//!
//! The policy is a pure function of the attempt count and the error, kept
//! apart from the I/O loop that applies it.

use std::time::Duration;

use crate::storage::StorageError;

/// What to do after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Wait for the delay, then attempt again.
    RetryAfter(Duration),
    /// Stop and report the last error.
    GiveUp,
}

/// Fixed-delay retry policy with a bounded number of attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Default total attempts, including the first.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    /// Default delay between attempts.
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

    /// Create a policy. `max_attempts` is clamped to at least 1.
    #[must_use]
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: if max_attempts == 0 { 1 } else { max_attempts },
            delay,
        }
    }

    /// Total attempts allowed per file.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay between attempts.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Decide what follows failed attempt number `attempt` (1-based).
    #[must_use]
    pub const fn decide(&self, attempt: u32, error: &StorageError) -> RetryDecision {
        if !error.is_retryable() || attempt >= self.max_attempts {
            RetryDecision::GiveUp
        } else {
            RetryDecision::RetryAfter(self.delay)
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS, Self::DEFAULT_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, RetryDecision::RetryAfter(Duration::from_secs(1)))]
    #[case(2, RetryDecision::RetryAfter(Duration::from_secs(1)))]
    #[case(3, RetryDecision::GiveUp)]
    #[case(4, RetryDecision::GiveUp)]
    fn test_default_policy_allows_three_attempts(
        #[case] attempt: u32,
        #[case] expected: RetryDecision,
    ) {
        let policy = RetryPolicy::default();
        let err = StorageError::operation("connection reset");
        assert_eq!(policy.decide(attempt, &err), expected);
    }

    #[test]
    fn test_invalid_key_never_retried() {
        let policy = RetryPolicy::default();
        let err = StorageError::invalid_key("orders//x");
        assert_eq!(policy.decide(1, &err), RetryDecision::GiveUp);
    }

    #[test]
    fn test_zero_attempts_clamped() {
        let policy = RetryPolicy::new(0, Duration::ZERO);
        assert_eq!(policy.max_attempts(), 1);
        assert_eq!(
            policy.decide(1, &StorageError::operation("x")),
            RetryDecision::GiveUp
        );
    }

    proptest! {
        /// Retryable errors are retried with the fixed delay until the budget is spent.
        #[test]
        fn prop_fixed_delay_until_budget_spent(
            max_attempts in 1u32..10,
            attempt in 1u32..20,
            delay_ms in 0u64..5_000,
        ) {
            let delay = Duration::from_millis(delay_ms);
            let policy = RetryPolicy::new(max_attempts, delay);
            let decision = policy.decide(attempt, &StorageError::operation("503"));

            if attempt < max_attempts {
                prop_assert_eq!(decision, RetryDecision::RetryAfter(delay));
            } else {
                prop_assert_eq!(decision, RetryDecision::GiveUp);
            }
        }
    }
}
