use crate::backend::error::BackendError;
use crate::backend::types::RecommendationReply;
use crate::domain::recommendation::InsightText;
use crate::domain::sentiment::SentimentResult;
use crate::domain::session::SessionId;
use crate::domain::validation::ValidationSource;
use std::time::Instant;

pub type Outcome<T> = Result<T, BackendError>;

/// State transitions. Session-scoped events carry the generation of the search that
/// produced them.
#[derive(Debug, Clone)]
pub enum Event {
    SearchStarted {
        generation: u64,
        query: String,
    },
    SubmitFailed {
        generation: u64,
        error: BackendError,
    },
    SessionAcquired {
        generation: u64,
        session: SessionId,
        chart_url: Option<String>,
        at: Instant,
    },
    AnalysisTriggered {
        generation: u64,
        outcome: Outcome<()>,
    },
    SentimentLoaded {
        generation: u64,
        outcome: Outcome<Option<SentimentResult>>,
    },
    InsightsLoaded {
        generation: u64,
        outcome: Outcome<Option<InsightText>>,
    },
    RecommendationLoaded {
        generation: u64,
        outcome: Outcome<RecommendationReply>,
    },
    ValidationsRequested,
    ValidationsLoaded {
        outcome: Outcome<Vec<ValidationSource>>,
    },
}

impl Event {
    pub fn generation(&self) -> Option<u64> {
        match self {
            Self::SearchStarted { generation, .. }
            | Self::SubmitFailed { generation, .. }
            | Self::SessionAcquired { generation, .. }
            | Self::AnalysisTriggered { generation, .. }
            | Self::SentimentLoaded { generation, .. }
            | Self::InsightsLoaded { generation, .. }
            | Self::RecommendationLoaded { generation, .. } => Some(*generation),
            Self::ValidationsRequested | Self::ValidationsLoaded { .. } => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SearchStarted { .. } => "search_started",
            Self::SubmitFailed { .. } => "submit_failed",
            Self::SessionAcquired { .. } => "session_acquired",
            Self::AnalysisTriggered { .. } => "analysis_triggered",
            Self::SentimentLoaded { .. } => "sentiment_loaded",
            Self::InsightsLoaded { .. } => "insights_loaded",
            Self::RecommendationLoaded { .. } => "recommendation_loaded",
            Self::ValidationsRequested => "validations_requested",
            Self::ValidationsLoaded { .. } => "validations_loaded",
        }
    }
}
