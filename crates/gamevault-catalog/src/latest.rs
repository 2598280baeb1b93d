use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use tokio::task::AbortHandle;

/// Runs requests so that only the most recently issued one delivers a result.
///
/// Each call to [`LatestOnly::run`] takes the next sequence number and aborts
/// the task of the request before it. A result is returned only if no newer
/// request was issued while it was in flight.
#[derive(Default)]
pub struct LatestOnly {
    issued: AtomicU64,
    in_flight: Mutex<Option<AbortHandle>>,
}

impl LatestOnly {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence number of the newest request issued so far.
    pub fn latest(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, seq: u64) -> bool {
        self.latest() == seq
    }

    /// Run `fut` as the current request. `None` means it was superseded.
    pub async fn run<F, T>(&self, fut: F) -> Option<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let handle = tokio::spawn(fut);
        let previous = self
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .replace(handle.abort_handle());
        if let Some(previous) = previous {
            previous.abort();
        }

        match handle.await {
            Ok(value) if self.is_current(seq) => Some(value),
            Ok(_) => {
                tracing::debug!("discarding stale response for request #{seq}");
                None
            }
            Err(e) if e.is_cancelled() => {
                tracing::debug!("request #{seq} superseded before completing");
                None
            }
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        }
    }
}
