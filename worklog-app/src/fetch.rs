//! In-flight request tracking.
//!
//! Each page owns one slot per request kind. Starting a new fetch aborts
//! the in-flight predecessor, so a stale response can never land on top
//! of a newer one; the superseded caller sees a quiet outcome instead of
//! an error.

use std::future::Future;
use std::sync::Mutex;

use tokio::task::AbortHandle;

/// Result of a slotted fetch.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    Done(T),
    /// A newer request of the same kind replaced this one, or the page
    /// was torn down. Callers treat this as a no-op.
    Superseded,
}

impl<T> FetchOutcome<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            FetchOutcome::Done(value) => Some(value),
            FetchOutcome::Superseded => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, FetchOutcome::Superseded)
    }
}

#[derive(Debug, Default)]
pub struct RequestSlot {
    in_flight: Mutex<Option<AbortHandle>>,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a fetch in this slot, aborting whatever was in flight.
    pub async fn run<F, T>(&self, fut: F) -> FetchOutcome<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let handle = tokio::spawn(fut);
        {
            let mut in_flight = self.in_flight.lock().unwrap();
            if let Some(prev) = in_flight.replace(handle.abort_handle()) {
                prev.abort();
            }
        }

        match handle.await {
            Ok(value) => FetchOutcome::Done(value),
            // Only aborts cancel the task; propagate real panics.
            Err(err) if err.is_cancelled() => FetchOutcome::Superseded,
            Err(err) => std::panic::resume_unwind(err.into_panic()),
        }
    }

    /// Aborts any outstanding request. Called on page teardown.
    pub fn cancel(&self) {
        if let Some(handle) = self.in_flight.lock().unwrap().take() {
            handle.abort();
        }
    }
}

impl Drop for RequestSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_completed_fetch_returns_value() {
        let slot = RequestSlot::new();
        let outcome = slot.run(async { 42 }).await;
        assert_eq!(outcome.into_option(), Some(42));
    }

    #[tokio::test]
    async fn test_new_fetch_supersedes_in_flight_one() {
        let slot = Arc::new(RequestSlot::new());

        let slow = {
            let slot = slot.clone();
            tokio::spawn(async move {
                slot.run(async {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    "slow"
                })
                .await
            })
        };
        // Give the slow request time to occupy the slot.
        tokio::time::sleep(Duration::from_millis(20)).await;

        let fast = slot.run(async { "fast" }).await;
        assert_eq!(fast.into_option(), Some("fast"));

        let slow = slow.await.unwrap();
        assert!(slow.is_superseded());
    }

    #[tokio::test]
    async fn test_cancel_aborts_outstanding_request() {
        let slot = Arc::new(RequestSlot::new());
        let pending = {
            let slot = slot.clone();
            tokio::spawn(async move {
                slot.run(async {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                })
                .await
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        slot.cancel();
        assert!(pending.await.unwrap().is_superseded());
    }
}
