use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::RngCore;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::follow::FollowChecker;
use crate::leaderboard::LeaderboardStore;
use crate::models::{CheckOutcome, PresentCheckError, Result, RewardResult, RewardTier};
use crate::reward::RewardGenerator;

/// Strips the leading `@` and surrounding whitespace from user input.
pub fn normalize_handle(input: &str) -> String {
    input.trim().trim_start_matches('@').to_string()
}

/// Runs one check to completion: duplicate gate, follow check, draw,
/// record. Checks are sequential per session; the mutexes only serialize
/// the UI task against its own spawned check.
pub struct CheckEngine<R: RngCore + Send> {
    checker: Arc<dyn FollowChecker>,
    generator: Mutex<RewardGenerator<R>>,
    store: Mutex<LeaderboardStore>,
    target_handle: String,
}

impl<R: RngCore + Send> CheckEngine<R> {
    pub fn new(
        checker: Arc<dyn FollowChecker>,
        generator: RewardGenerator<R>,
        store: LeaderboardStore,
        target_handle: impl Into<String>,
    ) -> Self {
        Self {
            checker,
            generator: Mutex::new(generator),
            store: Mutex::new(store),
            target_handle: target_handle.into(),
        }
    }

    /// Runs the full check flow for a handle.
    ///
    /// The duplicate gate runs before anything else so a repeated handle
    /// never consumes entropy or hits the follow-check collaborator.
    pub async fn run_check(&self, handle: &str) -> Result<CheckOutcome> {
        let handle = normalize_handle(handle);
        if handle.is_empty() {
            return Err(PresentCheckError::ConfigError("empty handle".to_string()));
        }

        {
            let store = self.store.lock().await;
            if store.contains(&handle) {
                info!(handle, "duplicate check rejected");
                return Err(PresentCheckError::DuplicateHandle { handle });
            }
        }

        info!(handle, checker = self.checker.name(), "running follow check");
        let following = self.checker.is_following(&handle).await?;
        if !following {
            warn!(handle, "not following target");
            return Err(PresentCheckError::NotFollowing {
                handle,
                target: self.target_handle.clone(),
            });
        }

        let reward = self.generator.lock().await.draw();
        let tier = RewardTier::from_reward(reward);
        info!(handle, reward, tier = ?tier, "reward drawn");

        let now = Utc::now();
        let mut store = self.store.lock().await;
        let leaderboard = store.record(&handle, reward, now)?.to_vec();
        let result = RewardResult::new(handle, reward, now);

        Ok(CheckOutcome {
            result,
            tier,
            leaderboard,
        })
    }

    /// Current board, sorted for display.
    pub async fn leaderboard(&self) -> Vec<RewardResult> {
        self.store.lock().await.entries().to_vec()
    }

    pub fn target_handle(&self) -> &str {
        &self.target_handle
    }
}

/// Cancellable one-shot timer for the reveal-to-leaderboard transition.
///
/// The deferred callback is tied to the flow's lifetime: dropping or
/// cancelling the timer aborts the task so it cannot fire after a reset.
pub struct RevealTimer {
    handle: JoinHandle<()>,
}

impl RevealTimer {
    pub fn spawn<F>(delay: Duration, on_elapsed: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_elapsed();
        });
        Self { handle }
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for RevealTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::follow::MockFollowChecker;
    use crate::leaderboard::{LeaderboardStore, MemoryStore, DEFAULT_KEY};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// RNG wrapper that counts how many raw draws were consumed.
    struct CountingRng {
        inner: StdRng,
        calls: Arc<AtomicUsize>,
    }

    impl RngCore for CountingRng {
        fn next_u32(&mut self) -> u32 {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.next_u32()
        }

        fn next_u64(&mut self) -> u64 {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.next_u64()
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.fill_bytes(dest)
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.try_fill_bytes(dest)
        }
    }

    fn engine_with(
        checker: MockFollowChecker,
    ) -> (CheckEngine<CountingRng>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let rng = CountingRng {
            inner: StdRng::seed_from_u64(99),
            calls: calls.clone(),
        };
        let store = LeaderboardStore::load(Box::new(MemoryStore::new()), DEFAULT_KEY);
        let engine = CheckEngine::new(
            Arc::new(checker),
            RewardGenerator::new(rng),
            store,
            "santa",
        );
        (engine, calls)
    }

    #[tokio::test]
    async fn test_granted_check_records_result() {
        let mut checker = MockFollowChecker::new();
        checker.expect_name().return_const("mock");
        checker.expect_is_following().returning(|_| Ok(true));

        let (engine, _) = engine_with(checker);
        let outcome = engine.run_check("@alice").await.unwrap();

        assert_eq!(outcome.result.handle, "alice");
        assert!(outcome.result.reward < 1_000_000);
        assert_eq!(outcome.tier, RewardTier::from_reward(outcome.result.reward));
        assert_eq!(outcome.leaderboard.len(), 1);
        assert_eq!(engine.leaderboard().await.len(), 1);
    }

    #[tokio::test]
    async fn test_not_following_draws_nothing() {
        let mut checker = MockFollowChecker::new();
        checker.expect_name().return_const("mock");
        checker.expect_is_following().returning(|_| Ok(false));

        let (engine, calls) = engine_with(checker);
        let err = engine.run_check("bob").await.unwrap_err();

        assert!(matches!(err, PresentCheckError::NotFollowing { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0, "denied check must not draw");
        assert!(engine.leaderboard().await.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_handle_draws_nothing() {
        let mut checker = MockFollowChecker::new();
        checker.expect_name().return_const("mock");
        // The duplicate attempt must not even reach the follow check.
        checker.expect_is_following().times(1).returning(|_| Ok(true));

        let (engine, calls) = engine_with(checker);
        engine.run_check("alice").await.unwrap();

        let drawn = calls.load(Ordering::SeqCst);
        let err = engine.run_check("ALICE").await.unwrap_err();

        assert!(matches!(err, PresentCheckError::DuplicateHandle { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), drawn, "duplicate must not draw");
        assert_eq!(engine.leaderboard().await.len(), 1);
    }

    #[tokio::test]
    async fn test_checker_failure_surfaces_and_keeps_board() {
        let mut checker = MockFollowChecker::new();
        checker.expect_name().return_const("mock");
        checker.expect_is_following().returning(|_| {
            Err(PresentCheckError::FollowCheckFailed {
                checker: "mock".to_string(),
                message: "timeout".to_string(),
            })
        });

        let (engine, _) = engine_with(checker);
        let err = engine.run_check("carol").await.unwrap_err();

        assert!(err.is_retryable());
        assert!(engine.leaderboard().await.is_empty());
    }

    #[tokio::test]
    async fn test_reveal_timer_fires() {
        let fired = Arc::new(AtomicUsize::new(0));
        let f = fired.clone();
        let _timer = RevealTimer::spawn(Duration::from_millis(10), move || {
            f.fetch_add(1, Ordering::SeqCst);
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_reveal_timer_cancel_prevents_firing() {
        let fired = Arc::new(AtomicUsize::new(0));
        let f = fired.clone();
        let timer = RevealTimer::spawn(Duration::from_millis(10), move || {
            f.fetch_add(1, Ordering::SeqCst);
        });
        timer.cancel();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
