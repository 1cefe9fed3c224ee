//! Attempt throttling for the admin code exchange.
//!
//! The policy (ceiling and window) lives in [`AttemptThrottle`]; where the
//! counters are kept is behind the [`AttemptStore`] trait. The bundled
//! [`InMemoryAttemptStore`] is process-local: counters vanish on restart and
//! are not shared between instances, so it is only correct for a
//! single-instance deployment. Multi-instance deployments need a shared
//! store implementing the same trait.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use tokio::sync::Mutex;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Default number of attempts allowed inside one window.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default window length in minutes.
pub const DEFAULT_WINDOW_MINS: i64 = 15;

/// Attempt counter for one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptRecord {
    pub attempts: u32,
    /// When the first attempt of the current window happened.
    pub window_started_at: Timestamp,
}

/// Outcome of [`AttemptStore::reserve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reservation {
    /// The attempt was counted; `remaining` more fit in the window.
    Granted { remaining: u32 },
    /// The window is full; nothing was counted.
    Locked { retry_after: Duration },
}

impl AttemptRecord {
    /// Count one attempt against `record` (the stored counter, if any) and
    /// return the record to store back.
    ///
    /// A record whose window has elapsed is replaced by a fresh one. Stores
    /// call this while holding whatever lock makes the read and the write
    /// one step.
    pub fn reserve(
        record: Option<AttemptRecord>,
        now: Timestamp,
        max_attempts: u32,
        window: Duration,
    ) -> (AttemptRecord, Reservation) {
        let live = record.filter(|r| now - r.window_started_at < window);
        match live {
            Some(r) if r.attempts >= max_attempts => (
                r,
                Reservation::Locked {
                    retry_after: r.window_started_at + window - now,
                },
            ),
            Some(r) => {
                let next = AttemptRecord {
                    attempts: r.attempts + 1,
                    ..r
                };
                (
                    next,
                    Reservation::Granted {
                        remaining: max_attempts - next.attempts,
                    },
                )
            }
            None => {
                let next = AttemptRecord {
                    attempts: 1,
                    window_started_at: now,
                };
                (
                    next,
                    Reservation::Granted {
                        remaining: max_attempts.saturating_sub(1),
                    },
                )
            }
        }
    }
}

/// Storage for attempt counters.
///
/// `reserve` must be atomic per key: two concurrent calls may never both
/// see the same count.
#[async_trait]
pub trait AttemptStore: Send + Sync {
    async fn reserve(
        &self,
        key: &str,
        now: Timestamp,
        max_attempts: u32,
        window: Duration,
    ) -> Result<Reservation, CoreError>;

    async fn clear(&self, key: &str) -> Result<(), CoreError>;
}

/// Process-local attempt store.
#[derive(Debug, Default)]
pub struct InMemoryAttemptStore {
    records: Mutex<HashMap<String, AttemptRecord>>,
}

impl InMemoryAttemptStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttemptStore for InMemoryAttemptStore {
    async fn reserve(
        &self,
        key: &str,
        now: Timestamp,
        max_attempts: u32,
        window: Duration,
    ) -> Result<Reservation, CoreError> {
        let mut records = self.records.lock().await;
        let (record, reservation) =
            AttemptRecord::reserve(records.get(key).copied(), now, max_attempts, window);
        records.insert(key.to_string(), record);
        Ok(reservation)
    }

    async fn clear(&self, key: &str) -> Result<(), CoreError> {
        self.records.lock().await.remove(key);
        Ok(())
    }
}

/// Ceiling/window policy applied over an [`AttemptStore`].
#[derive(Clone)]
pub struct AttemptThrottle {
    store: Arc<dyn AttemptStore>,
    max_attempts: u32,
    window: Duration,
}

impl std::fmt::Debug for AttemptThrottle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttemptThrottle")
            .field("max_attempts", &self.max_attempts)
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

impl AttemptThrottle {
    pub fn new(store: Arc<dyn AttemptStore>, max_attempts: u32, window: Duration) -> Self {
        Self {
            store,
            max_attempts,
            window,
        }
    }

    /// Throttle with the default ceiling (5) and window (15 minutes) over a
    /// fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryAttemptStore::new()),
            DEFAULT_MAX_ATTEMPTS,
            Duration::minutes(DEFAULT_WINDOW_MINS),
        )
    }

    /// Claim one attempt for `key` before the credential is checked.
    ///
    /// Returns the attempts left after this one, or
    /// [`CoreError::TooManyAttempts`] once the window is full. A locked-out
    /// caller is refused whether or not the code is right. The claimed
    /// attempt stays counted unless [`record_success`](Self::record_success)
    /// clears it.
    pub async fn reserve(&self, key: &str, now: Timestamp) -> Result<u32, CoreError> {
        match self
            .store
            .reserve(key, now, self.max_attempts, self.window)
            .await?
        {
            Reservation::Granted { remaining } => Ok(remaining),
            Reservation::Locked { retry_after } => Err(CoreError::TooManyAttempts {
                retry_after_secs: retry_after.num_seconds().max(1),
            }),
        }
    }

    /// Reset the counter after a successful attempt.
    pub async fn record_success(&self, key: &str) -> Result<(), CoreError> {
        self.store.clear(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;

    const KEY: &str = "203.0.113.9";

    #[tokio::test]
    async fn sixth_attempt_is_refused() {
        let throttle = AttemptThrottle::in_memory();
        let now = Utc::now();

        for i in 0..DEFAULT_MAX_ATTEMPTS {
            let left = throttle.reserve(KEY, now).await.expect("attempt should be allowed");
            assert_eq!(left, DEFAULT_MAX_ATTEMPTS - i - 1);
        }

        assert_matches!(
            throttle.reserve(KEY, now).await,
            Err(CoreError::TooManyAttempts { retry_after_secs }) if retry_after_secs > 0
        );
    }

    #[tokio::test]
    async fn window_expiry_resets_counter() {
        let throttle = AttemptThrottle::in_memory();
        let start = Utc::now();

        for _ in 0..DEFAULT_MAX_ATTEMPTS {
            throttle.reserve(KEY, start).await.unwrap();
        }
        assert!(throttle.reserve(KEY, start).await.is_err());

        let later = start + Duration::minutes(DEFAULT_WINDOW_MINS);
        let left = throttle.reserve(KEY, later).await.unwrap();
        assert_eq!(left, DEFAULT_MAX_ATTEMPTS - 1);
    }

    #[tokio::test]
    async fn locked_attempts_are_not_counted() {
        let throttle = AttemptThrottle::in_memory();
        let start = Utc::now();

        for _ in 0..DEFAULT_MAX_ATTEMPTS {
            throttle.reserve(KEY, start).await.unwrap();
        }
        let near_end = start + Duration::minutes(DEFAULT_WINDOW_MINS) - Duration::seconds(10);
        assert_matches!(
            throttle.reserve(KEY, near_end).await,
            Err(CoreError::TooManyAttempts { retry_after_secs: 10 })
        );
    }

    #[tokio::test]
    async fn success_resets_counter() {
        let throttle = AttemptThrottle::in_memory();
        let now = Utc::now();

        for _ in 0..DEFAULT_MAX_ATTEMPTS - 1 {
            throttle.reserve(KEY, now).await.unwrap();
        }
        throttle.record_success(KEY).await.unwrap();

        let left = throttle.reserve(KEY, now).await.unwrap();
        assert_eq!(left, DEFAULT_MAX_ATTEMPTS - 1);
    }

    #[tokio::test]
    async fn keys_are_independent() {
        let throttle = AttemptThrottle::in_memory();
        let now = Utc::now();

        for _ in 0..DEFAULT_MAX_ATTEMPTS {
            throttle.reserve(KEY, now).await.unwrap();
        }
        assert!(throttle.reserve(KEY, now).await.is_err());
        assert!(throttle.reserve("198.51.100.1", now).await.is_ok());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_attempts_never_exceed_the_ceiling() {
        let throttle = AttemptThrottle::in_memory();
        let now = Utc::now();

        let handles: Vec<_> = (0..24)
            .map(|_| {
                let throttle = throttle.clone();
                tokio::spawn(async move { throttle.reserve(KEY, now).await })
            })
            .collect();

        let mut granted = 0;
        let mut locked = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => granted += 1,
                Err(CoreError::TooManyAttempts { .. }) => locked += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!(granted, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(locked, 24 - DEFAULT_MAX_ATTEMPTS);
    }
}
