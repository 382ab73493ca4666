pub mod event;
pub mod hydrate;
pub mod reducer;
pub mod state;

use crate::backend::AnalysisBackend;
use crate::dashboard::event::Event;
use crate::dashboard::reducer::reduce;
use crate::dashboard::state::DashboardState;
use crate::search::normalize_query;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Owns one dashboard state tree. Every mutation goes through [`reduce`]; views observe
/// snapshots through [`Dashboard::subscribe`].
pub struct Dashboard {
    backend: Arc<dyn AnalysisBackend>,
    state: watch::Sender<DashboardState>,
    generation: AtomicU64,
}

impl Dashboard {
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        let (state, _) = watch::channel(DashboardState::default());
        Self {
            backend,
            state,
            generation: AtomicU64::new(0),
        }
    }

    pub fn backend(&self) -> &dyn AnalysisBackend {
        self.backend.as_ref()
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    pub fn apply(&self, event: Event) {
        tracing::trace!(event = event.name(), generation = ?event.generation(), "apply");
        self.state.send_modify(|state| *state = reduce(state, &event));
    }

    /// Submits a query and hydrates the results. Blank queries are ignored without any
    /// network call and return `None`.
    pub async fn search(&self, raw_query: &str) -> Option<u64> {
        let (generation, query) = self.begin_search(raw_query)?;
        self.run_search(generation, &query).await;
        Some(generation)
    }

    /// Allocates a generation for a new search and records it, without touching the network.
    pub fn begin_search(&self, raw_query: &str) -> Option<(u64, String)> {
        let query = normalize_query(raw_query)?.to_string();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.apply(Event::SearchStarted {
            generation,
            query: query.clone(),
        });
        Some((generation, query))
    }

    pub async fn run_search(&self, generation: u64, query: &str) {
        let session = match self.backend.submit_query(query).await {
            Ok(session) => session,
            Err(error) => {
                tracing::warn!(generation, query, error = %error, "query submission failed; skipping hydration");
                self.apply(Event::SubmitFailed { generation, error });
                return;
            }
        };

        tracing::info!(generation, query, %session, "session acquired");
        let chart_url = match self.backend.chart_url(&session) {
            Ok(url) => Some(url),
            Err(err) => {
                tracing::warn!(generation, %session, error = %err, "could not build chart url");
                None
            }
        };
        self.apply(Event::SessionAcquired {
            generation,
            session: session.clone(),
            chart_url,
            at: Instant::now(),
        });

        hydrate::hydrate(self.backend.as_ref(), &session, generation, |event| {
            self.apply(event)
        })
        .await;
        tracing::info!(generation, %session, "hydration finished");
    }

    /// Loads validation sources for the carousel. Independent of the search flow; the current
    /// session id is passed along when one exists.
    pub async fn load_validations(&self) {
        self.apply(Event::ValidationsRequested);
        let session = self.state.borrow().session.clone();
        let outcome = self
            .backend
            .validations(session.as_ref())
            .await
            .map(|res| res.into_sources());
        if let Err(err) = &outcome {
            tracing::warn!(error = %err, "validation sources fetch failed");
        }
        self.apply(Event::ValidationsLoaded { outcome });
    }
}
