use crate::backend::error::BackendError;
use crate::backend::AnalysisBackend;
use crate::dashboard::event::Event;
use crate::domain::session::SessionId;

/// Populates the session-scoped slices.
///
/// The analysis trigger is awaited first because the backend derives its sentiment input from
/// it. Sentiment, insights and recommendation then run concurrently and each emits its own
/// event on completion, so a failure in one never blocks or clears the others.
pub async fn hydrate<F>(backend: &dyn AnalysisBackend, session: &SessionId, generation: u64, emit: F)
where
    F: Fn(Event) + Send + Sync,
{
    let outcome = backend.trigger_analysis(session).await;
    log_failure("query_concurrent", generation, session, &outcome);
    emit(Event::AnalysisTriggered {
        generation,
        outcome,
    });

    let sentiment = async {
        let outcome = backend
            .sentiment(session)
            .await
            .map(|res| res.first_result());
        log_failure("sentiment", generation, session, &outcome);
        if matches!(outcome, Ok(None)) {
            tracing::info!(generation, %session, "sentiment response had no usable result");
        }
        emit(Event::SentimentLoaded {
            generation,
            outcome,
        });
    };

    let insights = async {
        let outcome = backend
            .insights(session)
            .await
            .map(|res| res.into_insight());
        log_failure("output_text", generation, session, &outcome);
        emit(Event::InsightsLoaded {
            generation,
            outcome,
        });
    };

    let recommendation = async {
        let outcome = backend
            .recommendation(session)
            .await
            .map(|res| res.into_reply());
        log_failure("recommendation", generation, session, &outcome);
        emit(Event::RecommendationLoaded {
            generation,
            outcome,
        });
    };

    tokio::join!(sentiment, insights, recommendation);
}

fn log_failure<T>(
    step: &'static str,
    generation: u64,
    session: &SessionId,
    outcome: &Result<T, BackendError>,
) {
    if let Err(err) = outcome {
        tracing::warn!(step, generation, %session, error = %err, "hydration step failed");
    }
}
