//! Exponential backoff for remote model calls.

use std::future::Future;
use std::time::Duration;

use tracing::warn;
use uuid::Uuid;

use crate::config::Config;
use crate::llm_client::LlmError;

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub backoff_factor: f64,
    pub max_delay: Duration,
    /// Scales each delay by a random factor in [0.5, 1.0).
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_secs(1),
            backoff_factor: 2.0,
            max_delay: Duration::from_secs(60),
            jitter: true,
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_delay: Duration::from_millis(config.retry_initial_delay_ms),
            max_delay: Duration::from_millis(config.retry_max_delay_ms),
            ..Self::default()
        }
    }

    /// Un-jittered delay before retry number `retry` (0-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        let base = self.initial_delay.as_secs_f64() * self.backoff_factor.powi(retry as i32);
        let capped = base.min(self.max_delay.as_secs_f64());
        Duration::from_secs_f64(capped.max(0.0))
    }

    fn jittered(&self, delay: Duration) -> Duration {
        if self.jitter {
            delay.mul_f64(0.5 + unit_random() * 0.5)
        } else {
            delay
        }
    }

    /// Runs `op` until it succeeds, fails with a non-transient error, or
    /// `max_retries` retries have been spent.
    pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> Result<T, LlmError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, LlmError>>,
    {
        let mut retry = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && retry < self.max_retries => {
                    let delay = self.jittered(self.delay_for(retry));
                    retry += 1;
                    warn!(
                        "{label}: transient failure ({e}), retry {retry}/{} in {}ms",
                        self.max_retries,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Uniform value in [0, 1) taken from a v4 UUID's random bits.
fn unit_random() -> f64 {
    let bits = (Uuid::new_v4().as_u128() & ((1u128 << 53) - 1)) as u64;
    bits as f64 / (1u64 << 53) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            jitter: false,
            ..RetryPolicy::default()
        }
    }

    fn rate_limited() -> LlmError {
        LlmError::Api {
            status: 429,
            message: "quota exceeded".into(),
        }
    }

    #[test]
    fn test_delay_grows_and_caps() {
        let policy = RetryPolicy {
            max_delay: Duration::from_secs(5),
            ..fast_policy(10)
        };
        assert_eq!(policy.delay_for(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for(2), Duration::from_secs(4));
        assert_eq!(policy.delay_for(3), Duration::from_secs(5));
    }

    #[test]
    fn test_jitter_stays_in_range() {
        let policy = RetryPolicy::default();
        for _ in 0..100 {
            let d = policy.jittered(Duration::from_secs(10));
            assert!(d >= Duration::from_secs(5) && d < Duration::from_secs(10));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_transient_then_succeeds() {
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();

        let result = fast_policy(3)
            .run("test", || {
                let counter = counter.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err(rate_limited())
                    } else {
                        Ok("done")
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_retries() {
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();

        let result: Result<(), _> = fast_policy(2)
            .run("test", || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(rate_limited())
                }
            })
            .await;

        assert!(matches!(result, Err(LlmError::Api { status: 429, .. })));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_transient_not_retried() {
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();

        let result: Result<(), _> = fast_policy(3)
            .run("test", || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(LlmError::Api {
                        status: 400,
                        message: "bad request".into(),
                    })
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
