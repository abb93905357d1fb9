// File: testing-framework/src/orchestrator/clock.rs
//
// Clock abstraction
//
// Anything that waits on the ledger reads time and sleeps through this trait,
// so tests can drive it with tokio's paused virtual time.

use std::future::Future;
use std::pin::Pin;
use tokio::time::{self, Duration, Instant};

/// Source of the current instant and of sleeps.
///
/// The confirmation poller and the provider only ever see `&dyn Clock`, so a
/// test can swap real time for [`PausedClock`] without touching them.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use tokio::time::Duration;
/// use spl_testing_framework::orchestrator::clock::{Clock, SystemClock};
///
/// #[tokio::main]
/// async fn main() {
///     let clock: Arc<dyn Clock> = Arc::new(SystemClock);
///     let start = clock.now();
///     clock.sleep(Duration::from_millis(10)).await;
///     assert!(clock.now() - start >= Duration::from_millis(10));
/// }
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    ///
    /// Real time for [`SystemClock`], tokio's virtual time for [`PausedClock`].
    fn now(&self) -> Instant;

    /// Suspends the caller for `d`.
    fn sleep(&self, d: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}

/// Wall-clock time, used by providers talking to a real cluster.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        time::Instant::now()
    }

    fn sleep(&self, d: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(time::sleep(d))
    }
}

/// Virtual time for tests.
///
/// Built on `tokio::time::pause()`: while the runtime is idle, pending sleeps
/// complete immediately and the virtual clock jumps to their deadline, so a
/// 30 second confirmation timeout runs in microseconds of real time.
///
/// # Important Notes
///
/// 1. Requires a current-thread runtime (plain `#[tokio::test]`).
/// 2. [`PausedClock::new`] pauses time itself; do not combine it with
///    `start_paused = true`, tokio panics when time is frozen twice.
///    Use [`PausedClock::already_paused`] in that case.
#[derive(Debug, Clone, Copy)]
pub struct PausedClock {
    _private: (),
}

impl PausedClock {
    /// Freezes tokio time and returns a clock reading it.
    ///
    /// # Panics
    ///
    /// Panics if time is already paused or the runtime is multi-threaded.
    pub fn new() -> Self {
        time::pause();
        Self { _private: () }
    }

    /// Clock for a runtime started with `start_paused = true`.
    pub fn already_paused() -> Self {
        Self { _private: () }
    }

    /// Moves virtual time forward by `d`, waking any sleep that expires.
    pub async fn advance(&self, d: Duration) {
        time::advance(d).await;
    }
}

impl Default for PausedClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for PausedClock {
    fn now(&self) -> Instant {
        time::Instant::now()
    }

    fn sleep(&self, d: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(time::sleep(d))
    }
}
