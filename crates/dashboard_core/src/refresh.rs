use std::{panic::AssertUnwindSafe, sync::Arc, time::Duration};

use futures::FutureExt;
use tokio::{
    sync::{broadcast, Mutex, RwLock},
    task::JoinHandle,
};
use tracing::{debug, error, info};

use crate::{
    http::ApiClient,
    loader,
    state::{DashboardState, ResourceKind},
    stats,
};

/// Published after a refresh settles, so the presentation layer can re-render
/// without polling the state itself.
#[derive(Debug, Clone)]
pub enum RefreshEvent {
    /// A full cycle finished: all three loaders settled and stats were
    /// recomputed.
    CycleCompleted,
    /// A targeted reload (post-submission) finished, stats included.
    ResourceRefreshed(ResourceKind),
}

/// Owns the refresh cycle: runs the three loaders concurrently, joins them,
/// then recomputes stats exactly once. Also owns the periodic-poll task; the
/// handle is aborted on `stop_periodic` or drop so no timer outlives its
/// orchestrator.
pub struct RefreshOrchestrator {
    api: ApiClient,
    state: Arc<RwLock<DashboardState>>,
    events: broadcast::Sender<RefreshEvent>,
    periodic: Mutex<Option<JoinHandle<()>>>,
}

impl RefreshOrchestrator {
    pub fn new(api: ApiClient) -> Arc<Self> {
        Self::with_state(api, Arc::new(RwLock::new(DashboardState::default())))
    }

    /// Builds an orchestrator over existing shared state. Sequence numbers
    /// live in the state's slots, so orchestrators sharing state also share
    /// the stale-response guard.
    pub fn with_state(api: ApiClient, state: Arc<RwLock<DashboardState>>) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            api,
            state,
            events,
            periodic: Mutex::new(None),
        })
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn state(&self) -> Arc<RwLock<DashboardState>> {
        Arc::clone(&self.state)
    }

    pub async fn snapshot(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<RefreshEvent> {
        self.events.subscribe()
    }

    /// One full refresh cycle. Loader failures are isolated: each settles
    /// into its own slot, and aggregation runs once after all three settle
    /// regardless of their outcomes.
    pub async fn refresh_all(&self) {
        tokio::join!(
            self.refresh_users(),
            self.refresh_products(),
            self.refresh_orders()
        );
        self.refresh_stats().await;
        debug!("refresh cycle completed");
        let _ = self.events.send(RefreshEvent::CycleCompleted);
    }

    /// Targeted reload of one resource plus a stats recomputation. Used after
    /// an accepted submission.
    pub async fn refresh_resource(&self, kind: ResourceKind) {
        match kind {
            ResourceKind::Users => self.refresh_users().await,
            ResourceKind::Products => self.refresh_products().await,
            ResourceKind::Orders => self.refresh_orders().await,
        }
        self.refresh_stats().await;
        let _ = self.events.send(RefreshEvent::ResourceRefreshed(kind));
    }

    async fn refresh_users(&self) {
        let seq = self.state.write().await.users.begin_load();
        let outcome = loader::load_list(&self.api, ResourceKind::Users).await;
        if !self.state.write().await.users.apply(seq, outcome) {
            debug!(resource = "users", seq, "discarded stale load result");
        }
    }

    async fn refresh_products(&self) {
        let seq = self.state.write().await.products.begin_load();
        let outcome = loader::load_list(&self.api, ResourceKind::Products).await;
        if !self.state.write().await.products.apply(seq, outcome) {
            debug!(resource = "products", seq, "discarded stale load result");
        }
    }

    async fn refresh_orders(&self) {
        let seq = self.state.write().await.orders.begin_load();
        let outcome = loader::load_list(&self.api, ResourceKind::Orders).await;
        if !self.state.write().await.orders.apply(seq, outcome) {
            debug!(resource = "orders", seq, "discarded stale load result");
        }
    }

    async fn refresh_stats(&self) {
        let snapshot = stats::compute_stats(&self.api).await;
        self.state.write().await.stats = snapshot;
    }

    /// Spawns the periodic poll task, replacing any previous one. The first
    /// refresh fires one full interval after the call; callers run their own
    /// initial load.
    pub async fn start_periodic(self: &Arc<Self>, interval: Duration) {
        let mut guard = self.periodic.lock().await;
        if let Some(previous) = guard.take() {
            previous.abort();
        }

        info!(interval_secs = interval.as_secs(), "starting periodic refresh");
        // Weak reference so the timer task cannot keep its orchestrator alive.
        let orchestrator = Arc::downgrade(self);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick of a tokio interval fires immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(orchestrator) = orchestrator.upgrade() else {
                    break;
                };
                // Last-resort net: a panicking cycle must not kill the timer.
                if AssertUnwindSafe(orchestrator.refresh_all())
                    .catch_unwind()
                    .await
                    .is_err()
                {
                    error!("refresh cycle panicked; periodic timer kept alive");
                }
            }
        });
        *guard = Some(handle);
    }

    pub async fn stop_periodic(&self) {
        if let Some(handle) = self.periodic.lock().await.take() {
            handle.abort();
            info!("stopped periodic refresh");
        }
    }
}

impl Drop for RefreshOrchestrator {
    fn drop(&mut self) {
        if let Some(handle) = self.periodic.get_mut().take() {
            handle.abort();
        }
    }
}
