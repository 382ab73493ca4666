use crate::dashboard::state::DashboardState;
use serde::Serialize;

pub const EMPTY_ANALYSIS_PLACEHOLDER: &str = "No analysis data yet. Search for a company to begin.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Panel<'a> {
    pub title: &'static str,
    pub markdown: &'a str,
}

/// The three recommendation panels, or `None` while the recommendation is absent.
pub fn recommendation_panels(state: &DashboardState) -> Option<[Panel<'_>; 3]> {
    let rec = state.recommendation.as_ref()?;
    Some([
        Panel {
            title: "Financial Health",
            markdown: &rec.financial_health,
        },
        Panel {
            title: "Market Sentiment",
            markdown: &rec.market_sentiment,
        },
        Panel {
            title: "Recommendation",
            markdown: &rec.recommendation,
        },
    ])
}

/// Narrative text for the analysis panel.
pub fn analysis_text(state: &DashboardState) -> &str {
    state
        .insight
        .as_ref()
        .map(|i| i.as_markdown())
        .unwrap_or(EMPTY_ANALYSIS_PLACEHOLDER)
}
