use serde::{Deserialize, Serialize};

/// Narrative investment summary. Each field is markdown produced by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub financial_health: String,
    pub market_sentiment: String,
    pub recommendation: String,
}

impl Recommendation {
    /// Returns `None` unless all three sections are present.
    pub fn from_sections(
        financial_health: Option<String>,
        market_sentiment: Option<String>,
        recommendation: Option<String>,
    ) -> Option<Self> {
        Some(Self {
            financial_health: financial_health?,
            market_sentiment: market_sentiment?,
            recommendation: recommendation?,
        })
    }
}

/// Latest narrative insight; replaces any earlier one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InsightText(pub String);

impl InsightText {
    pub fn as_markdown(&self) -> &str {
        &self.0
    }
}
