use serde::{Deserialize, Serialize};

/// External reference shown as supporting evidence. Not tied to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSource {
    pub title: String,
    pub url: String,
    pub snippet: String,
}
