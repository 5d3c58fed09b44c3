// Rate limiter for classifier API calls.
//
// Each acquire reserves the next free time slot under the lock, then
// sleeps until that slot outside it. Concurrent callers therefore queue
// up back-to-back slots instead of re-checking after waking, and the
// first caller always proceeds immediately.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::{sleep_until, Duration, Instant};

/// Spaces requests at least `interval` apart across concurrent callers.
#[derive(Clone)]
pub struct RateLimiter {
    interval: Duration,
    /// The earliest instant the next caller may proceed.
    next_slot: Arc<Mutex<Option<Instant>>>,
}

impl RateLimiter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Wait until a request is allowed, then return.
    pub async fn acquire(&self) {
        let slot = {
            let mut next = self.next_slot.lock().await;
            let now = Instant::now();
            let slot = match *next {
                Some(at) if at > now => at,
                _ => now,
            };
            *next = Some(slot + self.interval);
            slot
        };
        sleep_until(slot).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_acquire_is_immediate() {
        let limiter = RateLimiter::new(Duration::from_secs(1));
        let start = Instant::now();
        limiter.acquire().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn acquires_are_spaced_by_the_interval() {
        let limiter = RateLimiter::new(Duration::from_millis(100));
        limiter.acquire().await;
        let start = Instant::now();
        limiter.acquire().await;
        let elapsed = start.elapsed();
        assert!(
            elapsed >= Duration::from_millis(80),
            "Expected ~100ms delay, got {:?}",
            elapsed
        );
    }

    #[tokio::test]
    async fn concurrent_acquires_reserve_successive_slots() {
        let limiter = RateLimiter::new(Duration::from_millis(50));
        let start = Instant::now();
        tokio::join!(limiter.acquire(), limiter.acquire(), limiter.acquire());
        // Three callers occupy slots 0ms, 50ms, 100ms
        assert!(
            start.elapsed() >= Duration::from_millis(90),
            "Expected ~100ms for the third slot, got {:?}",
            start.elapsed()
        );
    }
}
