use crate::domain::recommendation::{InsightText, Recommendation};
use crate::domain::sentiment::{SentimentLabel, SentimentResult};
use crate::domain::validation::ValidationSource;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct SubmitQueryRequest<'a> {
    pub query: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitQueryResponse {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SentimentResponse {
    #[serde(default)]
    pub result: Option<Vec<SentimentScore>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SentimentScore {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

impl SentimentResponse {
    /// Reads the first scored label. An empty list or an unknown label yields `None`.
    pub fn first_result(&self) -> Option<SentimentResult> {
        let first = self.result.as_ref()?.first()?;
        let label = SentimentLabel::parse(first.label.as_deref()?)?;
        Some(SentimentResult::from_scored(label, first.score.unwrap_or(0.0)))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsightsResponse {
    #[serde(default)]
    pub insights: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl InsightsResponse {
    /// The backend answers insight failures with a 200 and an error envelope.
    pub fn reported_error(&self) -> Option<&str> {
        let status = self.status.as_deref()?;
        if !status.trim().eq_ignore_ascii_case("error") {
            return None;
        }
        Some(
            self.message
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or("backend reported an error"),
        )
    }

    pub fn into_insight(self) -> Option<InsightText> {
        self.insights.map(InsightText)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationResponse {
    #[serde(default)]
    pub result: Option<RecommendationSections>,
    #[serde(default)]
    pub sentiment: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationSections {
    #[serde(rename = "Financial Health", default)]
    pub financial_health: Option<String>,
    #[serde(rename = "Market Sentiment", default)]
    pub market_sentiment: Option<String>,
    #[serde(rename = "Recommendation", default)]
    pub recommendation: Option<String>,
}

/// Decoded `/recommendation` payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationReply {
    pub recommendation: Option<Recommendation>,
    pub sentiment_label: Option<SentimentLabel>,
}

impl RecommendationResponse {
    pub fn into_reply(self) -> RecommendationReply {
        let recommendation = self.result.and_then(|s| {
            Recommendation::from_sections(s.financial_health, s.market_sentiment, s.recommendation)
        });
        let sentiment_label = self.sentiment.as_deref().and_then(SentimentLabel::parse);
        RecommendationReply {
            recommendation,
            sentiment_label,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidationsResponse {
    #[serde(default)]
    pub result: Option<Vec<ValidationSourceItem>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidationSourceItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
}

impl ValidationsResponse {
    /// Items without a URL cannot be linked and are dropped.
    pub fn into_sources(self) -> Vec<ValidationSource> {
        self.result
            .unwrap_or_default()
            .into_iter()
            .filter_map(|item| {
                let url = item.url.filter(|u| !u.trim().is_empty())?;
                Some(ValidationSource {
                    title: item.title.unwrap_or_default(),
                    url,
                    snippet: item.snippet.unwrap_or_default(),
                })
            })
            .collect()
    }
}

/// Chart document served by `/graphs`, usually a self-contained HTML page.
#[derive(Debug, Clone)]
pub struct ChartDocument {
    pub content_type: Option<String>,
    pub body: String,
}
