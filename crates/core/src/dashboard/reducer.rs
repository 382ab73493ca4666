use crate::dashboard::event::Event;
use crate::dashboard::state::{DashboardState, LabelSource, SentimentState, SliceStatus, Slices};

/// Computes the next snapshot. Events from a superseded search are dropped.
pub fn reduce(state: &DashboardState, event: &Event) -> DashboardState {
    if let Some(generation) = event.generation() {
        let stale = match event {
            Event::SearchStarted { .. } => generation <= state.generation,
            _ => generation != state.generation,
        };
        if stale {
            tracing::debug!(
                event = event.name(),
                generation,
                current = state.generation,
                "dropping event from superseded search"
            );
            return state.clone();
        }
    }

    let mut next = state.clone();
    match event {
        Event::SearchStarted { generation, query } => {
            next.generation = *generation;
            next.query = Some(query.clone());
            next.session = None;
            next.chart_url = None;
            next.session_acquired_at = None;
            next.sentiment = SentimentState::default();
            next.insight = None;
            next.recommendation = None;
            next.slices = Slices {
                submit: SliceStatus::Loading,
                validations: state.slices.validations.clone(),
                ..Slices::default()
            };
        }
        Event::SubmitFailed { error, .. } => {
            next.slices.submit = SliceStatus::Failed(error.to_string());
        }
        Event::SessionAcquired {
            session,
            chart_url,
            at,
            ..
        } => {
            next.session = Some(session.clone());
            next.chart_url = chart_url.clone();
            next.session_acquired_at = Some(*at);
            next.slices.submit = SliceStatus::Ready;
            next.slices.analysis = SliceStatus::Loading;
            next.slices.sentiment = SliceStatus::Loading;
            next.slices.insights = SliceStatus::Loading;
            next.slices.recommendation = SliceStatus::Loading;
        }
        Event::AnalysisTriggered { outcome, .. } => {
            next.slices.analysis = match outcome {
                Ok(()) => SliceStatus::Ready,
                Err(err) => SliceStatus::Failed(err.to_string()),
            };
        }
        Event::SentimentLoaded { outcome, .. } => match outcome {
            Ok(result) => {
                if let Some(result) = result {
                    next.sentiment.strength = result.strength;
                    // The recommendation's label wins regardless of arrival order.
                    if next.sentiment.label_source != LabelSource::Recommendation {
                        next.sentiment.label = result.label;
                        next.sentiment.label_source = LabelSource::SentimentEndpoint;
                    }
                }
                next.slices.sentiment = SliceStatus::Ready;
            }
            Err(err) => next.slices.sentiment = SliceStatus::Failed(err.to_string()),
        },
        Event::InsightsLoaded { outcome, .. } => match outcome {
            Ok(insight) => {
                if let Some(insight) = insight {
                    next.insight = Some(insight.clone());
                }
                next.slices.insights = SliceStatus::Ready;
            }
            Err(err) => next.slices.insights = SliceStatus::Failed(err.to_string()),
        },
        Event::RecommendationLoaded { outcome, .. } => match outcome {
            Ok(reply) => {
                if let Some(recommendation) = &reply.recommendation {
                    next.recommendation = Some(recommendation.clone());
                }
                if let Some(label) = reply.sentiment_label {
                    next.sentiment.label = label;
                    next.sentiment.label_source = LabelSource::Recommendation;
                }
                next.slices.recommendation = SliceStatus::Ready;
            }
            Err(err) => next.slices.recommendation = SliceStatus::Failed(err.to_string()),
        },
        Event::ValidationsRequested => {
            next.slices.validations = SliceStatus::Loading;
        }
        Event::ValidationsLoaded { outcome } => match outcome {
            Ok(sources) => {
                next.validations = sources.clone();
                next.slices.validations = SliceStatus::Ready;
            }
            Err(err) => next.slices.validations = SliceStatus::Failed(err.to_string()),
        },
    }
    next
}
