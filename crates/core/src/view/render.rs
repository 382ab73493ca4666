use crate::dashboard::state::{DashboardState, SliceStatus};
use crate::view::carousel::Carousel;
use crate::view::chart::{chart_frame, ChartFrame};
use crate::view::gauge::gauge;
use crate::view::panels::{analysis_text, recommendation_panels};
use std::fmt::{self, Write};
use std::time::{Duration, Instant};

/// Plain-text rendition of the dashboard for terminals. Markdown is passed through untouched.
pub fn render_dashboard(
    state: &DashboardState,
    carousel: &Carousel,
    now: Instant,
    chart_delay: Duration,
) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    if write_dashboard(&mut out, state, carousel, now, chart_delay).is_err() {
        tracing::error!("failed to render dashboard text");
    }
    out
}

fn write_dashboard(
    out: &mut String,
    state: &DashboardState,
    carousel: &Carousel,
    now: Instant,
    chart_delay: Duration,
) -> fmt::Result {
    writeln!(out, "Validation Sources")?;
    if let Some(reason) = state.slices.validations.failure() {
        writeln!(out, "  unavailable: {reason}")?;
    } else if state.validations.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for source in carousel.window(&state.validations) {
        writeln!(out, "  - {} <{}>", source.title, source.url)?;
        if !source.snippet.is_empty() {
            writeln!(out, "    {}", source.snippet)?;
        }
    }

    if let Some(reason) = state.slices.submit.failure() {
        writeln!(out)?;
        writeln!(out, "Search failed: {reason}")?;
    }

    if !state.show_results() {
        return Ok(());
    }

    let query = state.query.as_deref().unwrap_or_default();

    writeln!(out)?;
    writeln!(out, "Analysis Process")?;
    write_status(out, &state.slices.insights)?;
    writeln!(out, "{}", analysis_text(state))?;

    writeln!(out)?;
    let g = gauge(state.sentiment.strength);
    writeln!(out, "Market Sentiment")?;
    write_status(out, &state.slices.sentiment)?;
    writeln!(
        out,
        "  {} [label: {}, needle {:+.0} deg]",
        g.caption, state.sentiment.label, g.needle_degrees
    )?;

    writeln!(out)?;
    writeln!(out, "Stock Performance for {query}")?;
    match chart_frame(state, now, chart_delay) {
        ChartFrame::Empty => writeln!(out, "  (no chart)")?,
        ChartFrame::Loading => writeln!(out, "  loading...")?,
        ChartFrame::Ready { url } => writeln!(out, "  {url}")?,
    }

    writeln!(out)?;
    writeln!(out, "Investment Recommendation Summary")?;
    write_status(out, &state.slices.recommendation)?;
    if let Some(panels) = recommendation_panels(state) {
        for panel in panels {
            writeln!(out, "## {}", panel.title)?;
            writeln!(out, "{}", panel.markdown)?;
        }
    }

    Ok(())
}

fn write_status(out: &mut String, status: &SliceStatus) -> fmt::Result {
    match status {
        SliceStatus::Loading => writeln!(out, "  (loading)"),
        SliceStatus::Failed(reason) => writeln!(out, "  (failed: {reason})"),
        SliceStatus::Idle | SliceStatus::Ready => Ok(()),
    }
}
