//! Newest-request-wins cancellation for a single panel.
//!
//! Each panel that refetches on filter changes owns a `RequestSlot`. Running
//! a fetch through the slot aborts whatever fetch it was still waiting on, so
//! a slow, superseded response can never overwrite a newer one.

use futures::future::{AbortHandle, Abortable};
use std::future::Future;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default, Debug)]
pub struct RequestSlot {
    current: Arc<Mutex<Option<AbortHandle>>>,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `fetch`, aborting the previous fetch on this slot.
    ///
    /// Returns `None` when this fetch was itself superseded or cancelled
    /// before it finished.
    pub async fn run<F: Future>(&self, fetch: F) -> Option<F::Output> {
        let (handle, registration) = AbortHandle::new_pair();
        if let Ok(mut current) = self.current.lock() {
            if let Some(previous) = current.replace(handle) {
                log::debug!("superseding in-flight request");
                previous.abort();
            }
        }
        Abortable::new(fetch, registration).await.ok()
    }

    /// Aborts the in-flight fetch, if any (page teardown).
    pub fn cancel(&self) {
        if let Ok(mut current) = self.current.lock() {
            if let Some(previous) = current.take() {
                previous.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use futures::join;

    #[test]
    fn test_newer_request_supersedes_older() {
        let slot = RequestSlot::new();
        let (tx_old, rx_old) = oneshot::channel::<u32>();
        let (tx_new, rx_new) = oneshot::channel::<u32>();

        let (old, new, _) = block_on(async {
            join!(slot.run(rx_old), slot.run(rx_new), async {
                // Resolve the old request last, as a slow server would.
                tx_new.send(2).ok();
                tx_old.send(1).ok();
            })
        });

        assert_eq!(old, None);
        assert_eq!(new, Some(Ok(2)));
    }

    #[test]
    fn test_sequential_requests_both_complete() {
        let slot = RequestSlot::new();
        let first = block_on(slot.run(async { 1 }));
        let second = block_on(slot.run(async { 2 }));
        assert_eq!(first, Some(1));
        assert_eq!(second, Some(2));
    }

    #[test]
    fn test_cancel_aborts_in_flight() {
        let slot = RequestSlot::new();
        let (tx, rx) = oneshot::channel::<u32>();
        let (result, _) = block_on(async {
            join!(slot.run(rx), async {
                slot.cancel();
                tx.send(7).ok();
            })
        });
        assert_eq!(result, None);
    }
}
