use crate::backend::error::{BackendError, Endpoint};
use crate::backend::types::{
    ChartDocument, InsightsResponse, RecommendationResponse, SentimentResponse,
    SubmitQueryRequest, SubmitQueryResponse, ValidationsResponse,
};
use crate::backend::AnalysisBackend;
use crate::config::Settings;
use crate::domain::session::SessionId;
use anyhow::Context;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct HttpAnalysisBackend {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpAnalysisBackend {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        // Trailing slash so relative joins keep any path prefix on the base URL.
        let raw = format!("{}/", settings.backend_base_url.trim_end_matches('/'));
        let base_url = Url::parse(&raw)
            .with_context(|| format!("BACKEND_BASE_URL is not a valid URL: {raw}"))?;

        let http = reqwest::Client::builder()
            .timeout(settings.backend_timeout)
            .build()
            .context("failed to build backend http client")?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, BackendError> {
        self.base_url
            .join(endpoint.path())
            .map_err(|e| BackendError::transport(endpoint, e))
    }

    async fn send(
        &self,
        endpoint: Endpoint,
        req: reqwest::RequestBuilder,
    ) -> Result<(Option<String>, String), BackendError> {
        let res = req
            .send()
            .await
            .map_err(|e| BackendError::transport(endpoint, e))?;

        let status = res.status();
        let content_type = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = res
            .text()
            .await
            .map_err(|e| BackendError::transport(endpoint, e))?;

        if !status.is_success() {
            return Err(BackendError::status(endpoint, status.as_u16(), text));
        }
        Ok((content_type, text))
    }

    async fn get_text(
        &self,
        endpoint: Endpoint,
        session: Option<&SessionId>,
    ) -> Result<(Option<String>, String), BackendError> {
        let url = self.endpoint_url(endpoint)?;
        let mut req = self.http.get(url);
        if let Some(session) = session {
            req = req.query(&[("session_id", session.as_str())]);
        }
        tracing::debug!(endpoint = endpoint.path(), session = ?session.map(SessionId::as_str), "backend GET");
        self.send(endpoint, req).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        session: Option<&SessionId>,
    ) -> Result<T, BackendError> {
        let (_, text) = self.get_text(endpoint, session).await?;
        decode(endpoint, text)
    }
}

fn decode<T: DeserializeOwned>(endpoint: Endpoint, text: String) -> Result<T, BackendError> {
    match serde_json::from_str::<T>(&text) {
        Ok(parsed) => Ok(parsed),
        Err(e) => Err(BackendError::decode(endpoint, e, text)),
    }
}

#[async_trait::async_trait]
impl AnalysisBackend for HttpAnalysisBackend {
    fn chart_url(&self, session: &SessionId) -> Result<String, BackendError> {
        let mut url = self.endpoint_url(Endpoint::Graphs)?;
        url.query_pairs_mut()
            .append_pair("session_id", session.as_str());
        Ok(url.into())
    }

    async fn submit_query(&self, query: &str) -> Result<SessionId, BackendError> {
        let url = self.endpoint_url(Endpoint::Query)?;
        tracing::debug!(query, "backend POST /query");
        let req = self.http.post(url).json(&SubmitQueryRequest { query });
        let (_, text) = self.send(Endpoint::Query, req).await?;

        let parsed: SubmitQueryResponse = decode(Endpoint::Query, text.clone())?;
        parsed
            .session_id
            .and_then(SessionId::new)
            .ok_or_else(|| BackendError::missing_session(text))
    }

    async fn trigger_analysis(&self, session: &SessionId) -> Result<(), BackendError> {
        self.get_text(Endpoint::QueryConcurrent, Some(session))
            .await
            .map(|_| ())
    }

    async fn sentiment(&self, session: &SessionId) -> Result<SentimentResponse, BackendError> {
        self.get_json(Endpoint::Sentiment, Some(session)).await
    }

    async fn insights(&self, session: &SessionId) -> Result<InsightsResponse, BackendError> {
        let (_, text) = self.get_text(Endpoint::OutputText, Some(session)).await?;
        let parsed: InsightsResponse = decode(Endpoint::OutputText, text.clone())?;
        if let Some(message) = parsed.reported_error() {
            return Err(BackendError::reported(Endpoint::OutputText, message, text));
        }
        Ok(parsed)
    }

    async fn recommendation(
        &self,
        session: &SessionId,
    ) -> Result<RecommendationResponse, BackendError> {
        self.get_json(Endpoint::Recommendation, Some(session)).await
    }

    async fn validations(
        &self,
        session: Option<&SessionId>,
    ) -> Result<ValidationsResponse, BackendError> {
        self.get_json(Endpoint::Validations, session).await
    }

    async fn chart(&self, session: &SessionId) -> Result<ChartDocument, BackendError> {
        let (content_type, body) = self.get_text(Endpoint::Graphs, Some(session)).await?;
        Ok(ChartDocument { content_type, body })
    }
}
