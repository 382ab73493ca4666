use crate::dashboard::state::DashboardState;
use serde::Serialize;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ChartFrame {
    /// No session yet.
    Empty,
    Loading,
    Ready { url: String },
}

/// The chart shows a loading indicator for `delay` after the session is acquired, then the
/// document addressed by session id.
pub fn chart_frame(state: &DashboardState, now: Instant, delay: Duration) -> ChartFrame {
    let (Some(url), Some(acquired_at)) = (&state.chart_url, state.session_acquired_at) else {
        return ChartFrame::Empty;
    };
    if now.saturating_duration_since(acquired_at) < delay {
        return ChartFrame::Loading;
    }
    ChartFrame::Ready { url: url.clone() }
}
