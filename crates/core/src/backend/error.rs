use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Query,
    QueryConcurrent,
    Sentiment,
    OutputText,
    Recommendation,
    Validations,
    Graphs,
}

impl Endpoint {
    /// Path relative to the backend base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::QueryConcurrent => "query_concurrent",
            Self::Sentiment => "sentiment",
            Self::OutputText => "output_text",
            Self::Recommendation => "recommendation",
            Self::Validations => "validations",
            Self::Graphs => "graphs",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendErrorKind {
    /// Connection refused, timeout, body read failure.
    Transport,
    Status(u16),
    Decode,
    /// A 2xx reply whose body carries `"status": "error"`.
    Reported,
    MissingSession,
}

#[derive(Debug, Clone)]
pub struct BackendError {
    pub endpoint: Endpoint,
    pub kind: BackendErrorKind,
    pub detail: String,
    pub raw_body: Option<String>,
}

impl BackendError {
    pub fn transport(endpoint: Endpoint, err: impl fmt::Display) -> Self {
        Self {
            endpoint,
            kind: BackendErrorKind::Transport,
            detail: err.to_string(),
            raw_body: None,
        }
    }

    pub fn status(endpoint: Endpoint, status: u16, body: String) -> Self {
        Self {
            endpoint,
            kind: BackendErrorKind::Status(status),
            detail: format!("status={status}"),
            raw_body: Some(body),
        }
    }

    pub fn decode(endpoint: Endpoint, err: impl fmt::Display, body: String) -> Self {
        Self {
            endpoint,
            kind: BackendErrorKind::Decode,
            detail: err.to_string(),
            raw_body: Some(body),
        }
    }

    pub fn reported(endpoint: Endpoint, message: &str, body: String) -> Self {
        Self {
            endpoint,
            kind: BackendErrorKind::Reported,
            detail: message.to_string(),
            raw_body: Some(body),
        }
    }

    pub fn missing_session(body: String) -> Self {
        Self {
            endpoint: Endpoint::Query,
            kind: BackendErrorKind::MissingSession,
            detail: "response carried no session_id".to_string(),
            raw_body: Some(body),
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "backend error (endpoint=/{}, kind={:?}): {}",
            self.endpoint.path(),
            self.kind,
            self.detail
        )
    }
}

impl std::error::Error for BackendError {}
