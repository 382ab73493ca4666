use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

impl SentimentLabel {
    /// Case-insensitive match against the three known labels.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("bullish") {
            Some(Self::Bullish)
        } else if raw.eq_ignore_ascii_case("bearish") {
            Some(Self::Bearish)
        } else if raw.eq_ignore_ascii_case("neutral") {
            Some(Self::Neutral)
        } else {
            None
        }
    }

    /// Maps a classifier score onto the bearish-to-bullish axis.
    ///
    /// The score is not range-checked; whatever the backend sends is carried through.
    /// A zero bearish score yields `0.0`, never `-0.0`.
    pub fn signed_strength(self, score: f64) -> f64 {
        match self {
            Self::Bullish => score,
            Self::Bearish => 0.0 - score,
            Self::Neutral => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bullish => "bullish",
            Self::Bearish => "bearish",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    pub strength: f64,
}

impl SentimentResult {
    pub fn from_scored(label: SentimentLabel, score: f64) -> Self {
        Self {
            label,
            strength: label.signed_strength(score),
        }
    }
}
