//! Single-flight request slot.
//!
//! A `LatestRequest` owns at most one in-flight task. Starting a new request
//! aborts the previous task and bumps a revision counter; a completion is
//! only committed if its revision is still the latest one, so a stale
//! response that races past the abort can never overwrite newer state.
//!
//! State lives in a `tokio::sync::watch` channel so views can observe every
//! transition. Tasks are spawned with `tokio::spawn`, so `start` must be
//! called from inside a Tokio runtime.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub struct LatestRequest<S> {
    state: Arc<watch::Sender<S>>,
    latest: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
}

impl<S> LatestRequest<S>
where
    S: Send + Sync + 'static,
{
    pub fn new(initial: S) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            state: Arc::new(tx),
            latest: Arc::new(AtomicU64::new(0)),
            handle: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> S
    where
        S: Clone,
    {
        self.state.borrow().clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Abort the in-flight task (if any) and invalidate its revision
    fn supersede(&mut self) -> u64 {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Cancel whatever is in flight, then apply `f` to the state
    pub fn cancel(&mut self, f: impl FnOnce(&mut S)) {
        self.supersede();
        self.state.send_modify(f);
    }

    /// Supersede the current request, apply `prepare` to the state, then run
    /// `work` in the background and hand its output to `commit` if nothing
    /// newer has started in the meantime.
    pub fn start<F, T, C>(&mut self, prepare: impl FnOnce(&mut S), work: F, commit: C) -> u64
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
        C: FnOnce(&mut S, T) + Send + 'static,
    {
        let revision = self.supersede();
        self.state.send_modify(prepare);

        let state = Arc::clone(&self.state);
        let latest = Arc::clone(&self.latest);
        self.handle = Some(tokio::spawn(async move {
            let output = work.await;
            commit_if_current(&state, &latest, revision, move |s| commit(s, output));
        }));
        revision
    }
}

/// Apply `f` only while `revision` is still the latest one. The check and the
/// write happen under the channel's lock.
fn commit_if_current<S>(
    state: &watch::Sender<S>,
    latest: &AtomicU64,
    revision: u64,
    f: impl FnOnce(&mut S),
) -> bool {
    state.send_if_modified(|s| {
        if latest.load(Ordering::SeqCst) != revision {
            return false;
        }
        f(s);
        true
    })
}

impl<S> Drop for LatestRequest<S> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
