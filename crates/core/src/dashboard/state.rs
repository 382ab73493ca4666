use crate::domain::recommendation::{InsightText, Recommendation};
use crate::domain::sentiment::SentimentLabel;
use crate::domain::session::SessionId;
use crate::domain::validation::ValidationSource;
use serde::Serialize;
use std::time::Instant;

/// Load status of one slice of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum SliceStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

impl SliceStatus {
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Which response last wrote the sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelSource {
    #[default]
    Initial,
    SentimentEndpoint,
    Recommendation,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SentimentState {
    pub label: SentimentLabel,
    pub strength: f64,
    pub label_source: LabelSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Slices {
    pub submit: SliceStatus,
    pub analysis: SliceStatus,
    pub sentiment: SliceStatus,
    pub insights: SliceStatus,
    pub recommendation: SliceStatus,
    pub validations: SliceStatus,
}

/// Immutable snapshot of everything the views render.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DashboardState {
    /// Generation of the latest accepted search; 0 before the first one.
    pub generation: u64,
    pub query: Option<String>,
    pub session: Option<SessionId>,
    pub chart_url: Option<String>,
    #[serde(skip)]
    pub session_acquired_at: Option<Instant>,
    pub sentiment: SentimentState,
    pub insight: Option<InsightText>,
    pub recommendation: Option<Recommendation>,
    pub validations: Vec<ValidationSource>,
    pub slices: Slices,
}

impl DashboardState {
    /// Result sections are shown once a session exists.
    pub fn show_results(&self) -> bool {
        self.session.is_some()
    }
}
