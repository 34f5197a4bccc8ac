//! The fetch state machine that drives the display.
//!
//! One machine per screen session. It owns the published [`UiState`],
//! triggers an eager first fetch at construction, and exposes `reload()`
//! for user-triggered refreshes. State lives in a `tokio::sync::watch`
//! channel, so new subscribers always see the latest value immediately.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use std::time::Duration;

use tokio::sync::watch;

use crate::{client::ForecastClient, model::ForecastPayload};

/// The one user-facing failure kind. Every client failure collapses into
/// it; the underlying cause is logged, not surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    #[error("no internet connection")]
    NoInternet,
}

/// What the view layer should render. Exactly one case is active at any
/// time.
#[derive(Debug, Clone, PartialEq)]
pub enum UiState {
    Loading,
    Success(ForecastPayload),
    Error(ErrorKind),
}

struct Inner {
    client: Arc<dyn ForecastClient>,
    tx: watch::Sender<UiState>,
    /// Monotonic reload counter. A fetch only publishes its result while
    /// its own number is still current, so the most recently started
    /// reload always wins; superseded fetches run to completion and are
    /// discarded at publish time.
    seq: AtomicU64,
    loading_delay: Duration,
}

impl Inner {
    fn publish_if_current(&self, seq: u64, next: UiState) {
        self.tx.send_if_modified(|state| {
            if self.seq.load(Ordering::SeqCst) == seq {
                *state = next;
                true
            } else {
                false
            }
        });
    }
}

/// Owns the current [`UiState`] and is its sole writer.
///
/// Cloning yields another handle to the same machine.
#[derive(Clone)]
pub struct ForecastStateMachine {
    inner: Arc<Inner>,
}

impl ForecastStateMachine {
    /// Create the machine in the `Loading` state and trigger the first
    /// fetch immediately. Must be called from within a tokio runtime.
    ///
    /// `loading_delay` is a display affordance: the minimum time the
    /// loading state stays visible before a fetch settles. Pass
    /// `Duration::ZERO` to disable it.
    pub fn new(client: Arc<dyn ForecastClient>, loading_delay: Duration) -> Self {
        let (tx, _rx) = watch::channel(UiState::Loading);

        let machine =
            Self { inner: Arc::new(Inner { client, tx, seq: AtomicU64::new(0), loading_delay }) };
        machine.reload();
        machine
    }

    /// Snapshot of the most recently published state.
    pub fn current_state(&self) -> UiState {
        self.inner.tx.borrow().clone()
    }

    /// Subscribe to state transitions. The receiver's initial value is the
    /// latest published state (replay-latest).
    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.inner.tx.subscribe()
    }

    /// Reset to `Loading` and start a new fetch. No coalescing: calling
    /// this while already loading re-publishes `Loading` and starts
    /// another fetch. In-flight fetches are not cancelled; their results
    /// are discarded when they settle.
    pub fn reload(&self) {
        let inner = Arc::clone(&self.inner);
        let my_seq = inner.seq.fetch_add(1, Ordering::SeqCst) + 1;

        inner.tx.send_replace(UiState::Loading);

        tokio::spawn(async move {
            if !inner.loading_delay.is_zero() {
                tokio::time::sleep(inner.loading_delay).await;
            }

            let next = match inner.client.fetch().await {
                Ok(payload) => UiState::Success(payload),
                Err(err) => {
                    log::warn!("forecast fetch failed: {err:#}");
                    UiState::Error(ErrorKind::NoInternet)
                }
            };

            inner.publish_if_current(my_seq, next);
        });
    }
}

impl std::fmt::Debug for ForecastStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastStateMachine").field("state", &self.current_state()).finish()
    }
}
