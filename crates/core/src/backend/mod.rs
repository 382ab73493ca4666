pub mod error;
pub mod http;
pub mod types;

use crate::backend::error::BackendError;
use crate::backend::types::{
    ChartDocument, InsightsResponse, RecommendationResponse, SentimentResponse,
    ValidationsResponse,
};
use crate::domain::session::SessionId;

/// Calls exposed by the analysis backend. All reads after `submit_query` are scoped to the
/// returned session.
#[async_trait::async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Address of the chart document for embedding.
    fn chart_url(&self, session: &SessionId) -> Result<String, BackendError>;

    async fn submit_query(&self, query: &str) -> Result<SessionId, BackendError>;

    /// Starts the backend's news collection for the session. The response body is ignored.
    async fn trigger_analysis(&self, session: &SessionId) -> Result<(), BackendError>;

    async fn sentiment(&self, session: &SessionId) -> Result<SentimentResponse, BackendError>;

    async fn insights(&self, session: &SessionId) -> Result<InsightsResponse, BackendError>;

    async fn recommendation(
        &self,
        session: &SessionId,
    ) -> Result<RecommendationResponse, BackendError>;

    async fn validations(
        &self,
        session: Option<&SessionId>,
    ) -> Result<ValidationsResponse, BackendError>;

    async fn chart(&self, session: &SessionId) -> Result<ChartDocument, BackendError>;
}
