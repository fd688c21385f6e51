use std::future::Future;

use tokio::task::JoinHandle;

/// Keeps only the most recently issued request alive.
///
/// Issuing a new request aborts the one still in flight, and every result is
/// tagged with the sequence number it was issued under. Callers compare that
/// number with [`LatestRequest::current`] before applying a result.
#[derive(Debug)]
pub struct LatestRequest<T> {
    seq: u64,
    inflight: Option<(u64, JoinHandle<T>)>,
}

impl<T: Send + 'static> LatestRequest<T> {
    pub fn new() -> Self {
        Self {
            seq: 0,
            inflight: None,
        }
    }

    /// Spawns `request`, superseding (and aborting) the previous one.
    pub fn issue<F>(&mut self, request: F) -> u64
    where
        F: Future<Output = T> + Send + 'static,
    {
        self.cancel();
        self.seq += 1;
        self.inflight = Some((self.seq, tokio::spawn(request)));
        self.seq
    }

    pub fn cancel(&mut self) {
        if let Some((seq, handle)) = self.inflight.take() {
            tracing::debug!(seq, "superseded request aborted");
            handle.abort();
        }
    }

    pub fn current(&self) -> u64 {
        self.seq
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.seq
    }

    pub fn is_pending(&self) -> bool {
        self.inflight.is_some()
    }

    /// Waits for the in-flight request. `None` when nothing is pending or the
    /// task was aborted.
    ///
    /// Cancel-safe: dropping the returned future leaves the request in flight.
    pub async fn settle(&mut self) -> Option<(u64, T)> {
        let (seq, handle) = self.inflight.as_mut()?;
        let seq = *seq;
        let outcome = handle.await;
        self.inflight = None;
        outcome.ok().map(|value| (seq, value))
    }
}

impl<T: Send + 'static> Default for LatestRequest<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for LatestRequest<T> {
    fn drop(&mut self) {
        if let Some((_, handle)) = self.inflight.take() {
            handle.abort();
        }
    }
}
