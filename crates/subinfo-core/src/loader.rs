// ── Subscription loader ──
//
// One info request per `load()`. State is published through a `watch`
// channel so observers always see a whole snapshot. A generation counter
// keeps a slow, superseded response from overwriting a newer one, and a
// drop guard clears `loading` even if the load future is cancelled.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::backend::PanelBackend;
use crate::error::CoreError;
use crate::model::SubscriptionInfo;

/// Observable loader state.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadState {
    /// True until the latest load settles.
    pub loading: bool,
    /// Payload of the latest successful load; cleared by a failure.
    pub data: Option<Arc<SubscriptionInfo>>,
}

impl Default for LoadState {
    fn default() -> Self {
        Self {
            loading: true,
            data: None,
        }
    }
}

/// A successful load and the generation that produced it.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub generation: u64,
    pub info: Arc<SubscriptionInfo>,
}

pub struct SubscriptionLoader<B> {
    backend: Arc<B>,
    state: watch::Sender<LoadState>,
    generation: AtomicU64,
}

impl<B: PanelBackend> SubscriptionLoader<B> {
    pub fn new(backend: Arc<B>) -> Self {
        let (state, _) = watch::channel(LoadState::default());
        Self {
            backend,
            state,
            generation: AtomicU64::new(0),
        }
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    pub fn current(&self) -> LoadState {
        self.state.borrow().clone()
    }

    /// Whether `generation` is still the most recent load.
    pub fn is_latest(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Fetch subscription info once and publish the outcome.
    ///
    /// Returns [`CoreError::Superseded`] without touching state when a
    /// newer `load()` started while this one was in flight.
    pub async fn load(&self) -> Result<Loaded, CoreError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|s| s.loading = true);
        let guard = SettleGuard {
            loader: self,
            generation,
        };

        let result = self.backend.fetch_info().await;

        if !self.is_latest(generation) {
            debug!(generation, "discarding superseded load");
            drop(guard);
            return Err(CoreError::Superseded);
        }

        let outcome = match result {
            Ok(info) => {
                let info = Arc::new(info);
                debug!(generation, status = %info.status, "subscription loaded");
                self.state.send_replace(LoadState {
                    loading: false,
                    data: Some(Arc::clone(&info)),
                });
                Ok(Loaded { generation, info })
            }
            Err(e) => {
                warn!(error = %e, "failed to load subscription info");
                self.state.send_replace(LoadState {
                    loading: false,
                    data: None,
                });
                Err(e)
            }
        };
        drop(guard);
        outcome
    }
}

/// Clears `loading` when a load ends by any path, including cancellation,
/// unless a newer load has taken over.
struct SettleGuard<'a, B> {
    loader: &'a SubscriptionLoader<B>,
    generation: u64,
}

impl<B> Drop for SettleGuard<'_, B> {
    fn drop(&mut self) {
        if self.loader.generation.load(Ordering::SeqCst) == self.generation {
            self.loader.state.send_if_modified(|s| {
                let was_loading = s.loading;
                s.loading = false;
                was_loading
            });
        }
    }
}
