//! Fixed-delay bounded retry policy.

use std::time::Duration;

/// Attempt bound plus the fixed pause between attempts. The same shape
/// drives photo selection and caption generation; there is no backoff.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// 1-based attempt numbers.
    pub fn attempts(&self) -> impl Iterator<Item = u32> {
        1..=self.max_attempts
    }

    /// Sleep the fixed delay.
    pub async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempts_are_one_based_and_bounded() {
        let policy = RetryPolicy::new(3, Duration::ZERO);
        let attempts: Vec<u32> = policy.attempts().collect();
        assert_eq!(attempts, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_zero_delay_pause_returns_immediately() {
        let policy = RetryPolicy::new(1, Duration::ZERO);
        let start = std::time::Instant::now();
        policy.pause().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
