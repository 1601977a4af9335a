//! # Dashboard View
//!
//! Per-view lifecycle around a facade: load state machine, latest model, periodic
//! refresh timer, and disposal.
//!
//! ## State machine
//!
//! ```text
//! Idle ──► Loading ──► Populated ──────────┐
//!              ▲   ├─► PartiallyPopulated ─┤ refresh
//!              │   └─► FullyDemo (terminal) │
//!              └────────────────────────────┘
//! ```
//!
//! Overlapping refreshes are not serialized: each result is applied when it resolves,
//! so the displayed model is whichever load finished last, not whichever was issued last.
//! Results that resolve after [`DashboardView::dispose`] are dropped.

use std::sync::Arc;
use std::time::Duration;

use async_channel::{Receiver, Sender};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::app::model::{DashboardModel, LoadStatus};
use crate::debug::spawn_tracked;
use crate::facades::ServiceFacade;

const EVENT_BUFFER: usize = 64;

/// View load state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    Idle,
    Loading,
    Populated,
    PartiallyPopulated,
    FullyDemo,
}

impl From<LoadStatus> for LoadState {
    fn from(status: LoadStatus) -> Self {
        match status {
            LoadStatus::Populated => LoadState::Populated,
            LoadStatus::PartiallyPopulated => LoadState::PartiallyPopulated,
            LoadStatus::FullyDemo => LoadState::FullyDemo,
        }
    }
}

/// Updates published to presentation code
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    /// A refresh started
    Loading,
    /// A load resolved and its model is now displayed
    Updated(Arc<DashboardModel>),
}

struct ViewState {
    load: LoadState,
    model: Option<Arc<DashboardModel>>,
    disposed: bool,
}

struct ViewInner {
    facade: ServiceFacade,
    state: RwLock<ViewState>,
    events_tx: Sender<DashboardEvent>,
    events_rx: Receiver<DashboardEvent>,
}

impl ViewInner {
    fn publish(&self, event: DashboardEvent) {
        if let Err(e) = self.events_tx.try_send(event) {
            tracing::debug!(error = %e, "Dashboard event dropped");
        }
    }

    /// Returns false if the view is gone.
    fn begin(&self) -> bool {
        {
            let mut state = self.state.write();
            if state.disposed {
                return false;
            }
            if state.load != LoadState::FullyDemo {
                state.load = LoadState::Loading;
            }
        }
        self.publish(DashboardEvent::Loading);
        true
    }

    fn apply(&self, model: DashboardModel) -> Option<Arc<DashboardModel>> {
        let model = Arc::new(model);
        {
            let mut state = self.state.write();
            if state.disposed {
                tracing::debug!(
                    generation = model.generation,
                    "View disposed before load resolved, discarding result"
                );
                return None;
            }
            if state.load != LoadState::FullyDemo {
                state.load = model.status.into();
            }
            state.model = Some(Arc::clone(&model));
        }
        self.publish(DashboardEvent::Updated(Arc::clone(&model)));
        Some(model)
    }

    async fn refresh(&self) -> Option<Arc<DashboardModel>> {
        if !self.begin() {
            return None;
        }
        let model = self.facade.load_dashboard().await;
        self.apply(model)
    }

    fn is_disposed(&self) -> bool {
        self.state.read().disposed
    }
}

/// One mounted dashboard.
pub struct DashboardView {
    inner: Arc<ViewInner>,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

impl DashboardView {
    pub fn new(facade: ServiceFacade) -> Self {
        let (events_tx, events_rx) = async_channel::bounded(EVENT_BUFFER);
        Self {
            inner: Arc::new(ViewInner {
                facade,
                state: RwLock::new(ViewState {
                    load: LoadState::Idle,
                    model: None,
                    disposed: false,
                }),
                events_tx,
                events_rx,
            }),
            ticker: Mutex::new(None),
        }
    }

    /// Create the view and start the facade's declared periodic refresh, if any.
    ///
    /// Must be called inside a Tokio runtime when the facade declares an interval.
    pub fn mount(facade: ServiceFacade) -> Self {
        let interval = facade.spec().refresh_interval;
        let view = Self::new(facade);
        if let Some(interval) = interval {
            view.start_periodic(interval);
        }
        view
    }

    pub fn load_state(&self) -> LoadState {
        self.inner.state.read().load
    }

    /// Currently displayed model
    pub fn model(&self) -> Option<Arc<DashboardModel>> {
        self.inner.state.read().model.clone()
    }

    pub fn facade(&self) -> &ServiceFacade {
        &self.inner.facade
    }

    /// Subscribe to view updates
    pub fn events(&self) -> Receiver<DashboardEvent> {
        self.inner.events_rx.clone()
    }

    /// Re-issue the full fan-out. Returns the model if it was applied to the view.
    pub async fn refresh(&self) -> Option<Arc<DashboardModel>> {
        self.inner.refresh().await
    }

    /// Refresh every `interval` until disposed. Replaces any running timer.
    pub fn start_periodic(&self, interval: Duration) {
        if self.inner.is_disposed() {
            return;
        }

        let inner = Arc::clone(&self.inner);
        let handle = spawn_tracked("dashboard_refresh", async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if inner.is_disposed() {
                    break;
                }
                inner.refresh().await;
            }
        });

        if let Some(previous) = self.ticker.lock().replace(handle) {
            previous.abort();
        }
        tracing::debug!(
            role = %self.inner.facade.role(),
            interval_ms = interval.as_millis(),
            "Periodic refresh started"
        );
    }

    pub fn is_refreshing_periodically(&self) -> bool {
        self.ticker
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Tear the view down: stop the timer and ignore any in-flight results.
    pub fn dispose(&self) {
        let was_disposed = std::mem::replace(&mut self.inner.state.write().disposed, true);
        if let Some(handle) = self.ticker.lock().take() {
            handle.abort();
        }
        if !was_disposed {
            tracing::debug!(role = %self.inner.facade.role(), "Dashboard view disposed");
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.is_disposed()
    }
}

impl Drop for DashboardView {
    fn drop(&mut self) {
        self.dispose();
    }
}
