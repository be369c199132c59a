//! Bounded, backoff-aware retry for resource loads
//!
//! [`ResourceErrorHandler`] never performs I/O itself. It records failures,
//! decides whether another attempt is allowed, and schedules a caller
//! supplied reload callback after the backoff delay. All state is exposed
//! through a [`Signal`] so views can render a retry affordance.

use crate::error::{ChatfrontError, Result};
use crate::reactive::Signal;
use std::fmt;
use std::time::Duration;

/// Upper bound on any single backoff delay
pub const MAX_RETRY_DELAY: Duration = Duration::from_secs(300);

/// Retry configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of recorded failures before retries stop
    pub max_attempts: u32,
    /// Delay before the first retry
    pub base_delay: Duration,
    /// Growth factor applied per additional attempt
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Delay before retrying after `attempt` recorded failures
    ///
    /// `base_delay * backoff_multiplier^(attempt - 1)`, with attempt 0
    /// treated like attempt 1, capped at [`MAX_RETRY_DELAY`].
    ///
    /// # Examples
    ///
    /// ```
    /// use chatfront::reactive::RetryPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = RetryPolicy {
    ///     max_attempts: 3,
    ///     base_delay: Duration::from_millis(100),
    ///     backoff_multiplier: 2.0,
    /// };
    /// assert_eq!(policy.delay_for(1), Duration::from_millis(100));
    /// assert_eq!(policy.delay_for(3), Duration::from_millis(400));
    /// ```
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let seconds = self.base_delay.as_secs_f64() * self.backoff_multiplier.powi(exponent);
        Duration::try_from_secs_f64(seconds)
            .unwrap_or(MAX_RETRY_DELAY)
            .min(MAX_RETRY_DELAY)
    }

    /// Reject policies that could never retry or would shrink the delay
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(
                ChatfrontError::Config("retry.max_attempts must be at least 1".to_string()).into(),
            );
        }
        if !self.backoff_multiplier.is_finite() || self.backoff_multiplier < 1.0 {
            return Err(ChatfrontError::Config(
                "retry.backoff_multiplier must be a finite number >= 1.0".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

/// Observable failure bookkeeping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetryState {
    /// Consecutive failures since the last successful load
    pub attempt: u32,
    pub last_error: Option<String>,
}

/// Result of asking for another attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryOutcome {
    /// The reload callback will run after this delay
    Scheduled(Duration),
    /// `max_attempts` failures have been recorded; nothing was scheduled
    Exhausted,
}

/// Failure tracker and retry scheduler for one resource
#[derive(Clone)]
pub struct ResourceErrorHandler {
    name: String,
    policy: RetryPolicy,
    state: Signal<RetryState>,
}

impl fmt::Debug for ResourceErrorHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceErrorHandler")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .field("state", &self.state.get())
            .finish()
    }
}

impl ResourceErrorHandler {
    /// Create a handler for the resource called `name`
    pub fn new(name: impl Into<String>, policy: RetryPolicy) -> Self {
        Self {
            name: name.into(),
            policy,
            state: Signal::new(RetryState::default()),
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Snapshot of the current state
    pub fn state(&self) -> RetryState {
        self.state.get()
    }

    /// Signal carrying the state, for views
    pub fn state_signal(&self) -> &Signal<RetryState> {
        &self.state
    }

    /// Record a failure. Does not retry.
    pub fn handle_error(&self, error: impl fmt::Display) {
        let message = error.to_string();
        self.state.update(|state| {
            state.attempt = state.attempt.saturating_add(1);
            state.last_error = Some(message.clone());
        });
        let attempt = self.state.with(|s| s.attempt);
        tracing::warn!(
            resource = %self.name,
            attempt,
            max_attempts = self.policy.max_attempts,
            "Resource load failed: {}",
            message
        );
    }

    /// Schedule `reload` after the backoff delay unless retries are exhausted
    pub fn retry<F>(&self, reload: F) -> RetryOutcome
    where
        F: FnOnce() + Send + 'static,
    {
        let attempt = self.state.with(|s| s.attempt);
        if attempt >= self.policy.max_attempts {
            tracing::warn!(
                resource = %self.name,
                attempt,
                "Retries exhausted, not scheduling another load"
            );
            return RetryOutcome::Exhausted;
        }

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                tracing::error!(resource = %self.name, "Cannot schedule retry: {}", e);
                return RetryOutcome::Exhausted;
            }
        };

        let delay = self.policy.delay_for(attempt);
        tracing::debug!(resource = %self.name, ?delay, "Scheduling retry");
        runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            reload();
        });
        RetryOutcome::Scheduled(delay)
    }

    /// Clear failures after a successful load
    pub fn reset(&self) {
        if self.state.with(|s| s.attempt == 0 && s.last_error.is_none()) {
            return;
        }
        self.state.set(RetryState::default());
    }

    pub fn is_exhausted(&self) -> bool {
        self.state.with(|s| s.attempt >= self.policy.max_attempts)
    }

    /// User-facing description of the failure, if any
    pub fn status_message(&self) -> Option<String> {
        let state = self.state.get();
        let error = state.last_error?;
        if state.attempt >= self.policy.max_attempts {
            Some(format!(
                "Failed to load {} after {} attempts: {}",
                self.name, state.attempt, error
            ))
        } else {
            Some(format!(
                "Failed to load {} (attempt {}/{}): {}",
                self.name, state.attempt, self.policy.max_attempts, error
            ))
        }
    }
}
