use std::sync::Arc;
use std::time::Duration;

use indovate_core::backend::http::HttpAnalysisBackend;
use indovate_core::backend::AnalysisBackend;
use indovate_core::config::Settings;
use indovate_core::dashboard::state::{LabelSource, SliceStatus};
use indovate_core::dashboard::Dashboard;
use indovate_core::domain::sentiment::SentimentLabel;
use indovate_core::domain::session::SessionId;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn dashboard_for(server: &MockServer) -> Dashboard {
    let settings = Settings {
        backend_base_url: server.uri(),
        ..Settings::default()
    };
    let backend = match HttpAnalysisBackend::from_settings(&settings) {
        Ok(b) => b,
        Err(e) => panic!("failed to build backend: {e:#}"),
    };
    Dashboard::new(Arc::new(backend))
}

async fn mount_session(server: &MockServer, query: &str, session: &str) {
    Mock::given(method("POST"))
        .and(path("/query"))
        .and(body_partial_json(json!({ "query": query })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "Query processed successfully.",
            "session_id": session,
        })))
        .mount(server)
        .await;
}

async fn mount_get(server: &MockServer, route: &str, session: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(query_param("session_id", session))
        .respond_with(template)
        .mount(server)
        .await;
}

fn ok_json(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

async fn mount_hydration(server: &MockServer, session: &str, delay: Duration, label: &str) {
    mount_get(
        server,
        "/query_concurrent",
        session,
        ok_json(json!({"result": {"news": {"articles": []}}})).set_delay(delay),
    )
    .await;
    mount_get(
        server,
        "/sentiment",
        session,
        ok_json(json!({"result": [{"label": label, "score": 0.7}]})).set_delay(delay),
    )
    .await;
    mount_get(
        server,
        "/output_text",
        session,
        ok_json(json!({"insights": format!("insights for {session}")})).set_delay(delay),
    )
    .await;
    mount_get(
        server,
        "/recommendation",
        session,
        ok_json(json!({
            "sentiment": "bearish",
            "result": {
                "Financial Health": format!("health for {session}"),
                "Market Sentiment": "cautious",
                "Recommendation": "Sell"
            }
        }))
        .set_delay(delay),
    )
    .await;
}

async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|reqs| reqs.len())
        .unwrap_or_default()
}

#[tokio::test]
async fn blank_query_never_reaches_backend() {
    let server = MockServer::start().await;
    let dashboard = dashboard_for(&server);

    assert_eq!(dashboard.search("").await, None);
    assert_eq!(dashboard.search("   \t").await, None);

    assert_eq!(request_count(&server).await, 0);
    assert_eq!(dashboard.snapshot().generation, 0);
}

#[tokio::test]
async fn search_hydrates_every_slice() {
    let server = MockServer::start().await;
    mount_session(&server, "Infosys Ltd", "s-1").await;
    mount_hydration(&server, "s-1", Duration::ZERO, "Bullish").await;

    let dashboard = dashboard_for(&server);
    let generation = dashboard.search("  Infosys Ltd ").await;
    assert_eq!(generation, Some(1));

    let state = dashboard.snapshot();
    assert_eq!(state.query.as_deref(), Some("Infosys Ltd"));
    assert_eq!(state.session, SessionId::new("s-1"));
    assert_eq!(
        state.chart_url.as_deref(),
        Some(format!("{}/graphs?session_id=s-1", server.uri()).as_str())
    );

    // Recommendation label is authoritative, strength comes from /sentiment.
    assert_eq!(state.sentiment.label, SentimentLabel::Bearish);
    assert_eq!(state.sentiment.strength, 0.7);
    assert_eq!(state.sentiment.label_source, LabelSource::Recommendation);

    assert_eq!(
        state.insight.as_ref().map(|i| i.as_markdown()),
        Some("insights for s-1")
    );
    let rec = state.recommendation.expect("recommendation present");
    assert_eq!(rec.financial_health, "health for s-1");
    assert_eq!(rec.recommendation, "Sell");

    for status in [
        &state.slices.submit,
        &state.slices.analysis,
        &state.slices.sentiment,
        &state.slices.insights,
        &state.slices.recommendation,
    ] {
        assert_eq!(status, &SliceStatus::Ready);
    }
}

#[tokio::test]
async fn failed_insights_leave_other_slices_intact() {
    let server = MockServer::start().await;
    mount_session(&server, "TCS", "s-9").await;
    mount_get(&server, "/query_concurrent", "s-9", ok_json(json!({}))).await;
    mount_get(
        &server,
        "/sentiment",
        "s-9",
        ok_json(json!({"result": [{"label": "BEARISH", "score": 0.4}]})),
    )
    .await;
    mount_get(
        &server,
        "/output_text",
        "s-9",
        ResponseTemplate::new(500).set_body_string("groq unavailable"),
    )
    .await;
    mount_get(
        &server,
        "/recommendation",
        "s-9",
        ok_json(json!({
            "sentiment": null,
            "result": {
                "Financial Health": "a",
                "Market Sentiment": "b",
                "Recommendation": "c"
            }
        })),
    )
    .await;

    let dashboard = dashboard_for(&server);
    dashboard.search("TCS").await;
    let state = dashboard.snapshot();

    assert!(state.slices.insights.failure().is_some());
    assert_eq!(state.insight, None);
    assert_eq!(state.sentiment.label, SentimentLabel::Bearish);
    assert_eq!(state.sentiment.strength, -0.4);
    assert_eq!(state.slices.sentiment, SliceStatus::Ready);
    assert!(state.recommendation.is_some());
    assert_eq!(state.slices.recommendation, SliceStatus::Ready);
}

#[tokio::test]
async fn failed_trigger_does_not_abort_hydration() {
    let server = MockServer::start().await;
    mount_session(&server, "ITC Ltd", "s-3").await;
    mount_get(
        &server,
        "/query_concurrent",
        "s-3",
        ResponseTemplate::new(400).set_body_json(json!({"error": "No session found."})),
    )
    .await;
    mount_get(
        &server,
        "/sentiment",
        "s-3",
        ok_json(json!({"result": [{"label": "neutral", "score": 0.0}]})),
    )
    .await;
    mount_get(&server, "/output_text", "s-3", ok_json(json!({"insights": "flat"}))).await;
    mount_get(&server, "/recommendation", "s-3", ok_json(json!({}))).await;

    let dashboard = dashboard_for(&server);
    dashboard.search("ITC Ltd").await;
    let state = dashboard.snapshot();

    assert!(state.slices.analysis.failure().unwrap().contains("status=400"));
    assert_eq!(state.slices.sentiment, SliceStatus::Ready);
    assert_eq!(state.sentiment.label, SentimentLabel::Neutral);
    assert_eq!(state.insight.as_ref().map(|i| i.as_markdown()), Some("flat"));
    // Empty recommendation payload: section stays hidden.
    assert_eq!(state.recommendation, None);
}

#[tokio::test]
async fn submit_failure_skips_hydration() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Query not provided"})))
        .expect(1)
        .mount(&server)
        .await;

    let dashboard = dashboard_for(&server);
    assert_eq!(dashboard.search("HDFC Bank Ltd").await, Some(1));

    let state = dashboard.snapshot();
    assert!(state.slices.submit.failure().is_some());
    assert_eq!(state.session, None);
    assert_eq!(state.slices.sentiment, SliceStatus::Idle);
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn response_without_session_id_skips_hydration() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ok_json(json!({"result": "Query processed successfully."})))
        .mount(&server)
        .await;

    let dashboard = dashboard_for(&server);
    dashboard.search("Wipro Ltd").await;

    let state = dashboard.snapshot();
    assert!(state
        .slices
        .submit
        .failure()
        .unwrap()
        .contains("MissingSession"));
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn responses_from_superseded_search_are_discarded() {
    let server = MockServer::start().await;
    mount_session(&server, "Infosys Ltd", "slow").await;
    mount_session(&server, "Wipro Ltd", "fast").await;
    mount_hydration(&server, "slow", Duration::from_millis(400), "Bullish").await;
    mount_hydration(&server, "fast", Duration::ZERO, "Bearish").await;

    let dashboard = dashboard_for(&server);
    let (first, second) = tokio::join!(dashboard.search("Infosys Ltd"), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        dashboard.search("Wipro Ltd").await
    });
    assert_eq!(first, Some(1));
    assert_eq!(second, Some(2));

    let state = dashboard.snapshot();
    assert_eq!(state.generation, 2);
    assert_eq!(state.query.as_deref(), Some("Wipro Ltd"));
    assert_eq!(state.session, SessionId::new("fast"));
    assert_eq!(
        state.insight.as_ref().map(|i| i.as_markdown()),
        Some("insights for fast")
    );
    assert_eq!(
        state.recommendation.map(|r| r.financial_health),
        Some("health for fast".to_string())
    );
    // The slow search's bullish 0.7 never lands; the fast one's bearish 0.7 is signed.
    assert_eq!(state.sentiment.strength, -0.7);
}

#[tokio::test]
async fn validations_load_independently_of_search() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/validations"))
        .respond_with(ok_json(json!({"result": [
            {"title": "Moneycontrol", "url": "https://www.moneycontrol.com", "snippet": "quotes"},
            {"title": "LiveMint", "url": "https://www.livemint.com/market", "snippet": "news"}
        ]})))
        .expect(1)
        .mount(&server)
        .await;

    let dashboard = dashboard_for(&server);
    dashboard.load_validations().await;

    let state = dashboard.snapshot();
    assert_eq!(state.slices.validations, SliceStatus::Ready);
    assert_eq!(state.validations.len(), 2);
    assert_eq!(state.validations[1].title, "LiveMint");
    assert!(!state.show_results());
}

#[tokio::test]
async fn chart_document_is_fetched_by_session() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/graphs",
        "s-1",
        ResponseTemplate::new(200).set_body_raw("<html>chart</html>", "text/html"),
    )
    .await;

    let dashboard = dashboard_for(&server);
    let session = SessionId::new("s-1").expect("valid session");
    let doc = dashboard
        .backend()
        .chart(&session)
        .await
        .expect("chart fetched");
    assert_eq!(doc.body, "<html>chart</html>");
    assert_eq!(doc.content_type.as_deref(), Some("text/html"));
}

#[tokio::test]
async fn slices_update_as_each_step_completes() {
    let server = MockServer::start().await;
    mount_session(&server, "Titan Company Ltd", "s-5").await;
    mount_get(&server, "/query_concurrent", "s-5", ok_json(json!({}))).await;
    mount_get(
        &server,
        "/sentiment",
        "s-5",
        ok_json(json!({"result": [{"label": "Bullish", "score": 0.6}]})),
    )
    .await;
    mount_get(&server, "/output_text", "s-5", ok_json(json!({"insights": "steady"}))).await;
    mount_get(
        &server,
        "/recommendation",
        "s-5",
        ok_json(json!({
            "sentiment": "bullish",
            "result": {
                "Financial Health": "strong",
                "Market Sentiment": "upbeat",
                "Recommendation": "Buy"
            }
        }))
        .set_delay(Duration::from_millis(300)),
    )
    .await;

    let dashboard = dashboard_for(&server);
    let mut rx = dashboard.subscribe();

    let observe = async {
        let mut saw_partial = false;
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            if state.slices.sentiment == SliceStatus::Ready
                && state.insight.is_some()
                && state.slices.recommendation == SliceStatus::Loading
                && state.recommendation.is_none()
            {
                saw_partial = true;
            }
            if state.session.is_some() && state.slices.recommendation != SliceStatus::Loading {
                break;
            }
        }
        saw_partial
    };

    let (generation, saw_partial) = tokio::join!(dashboard.search("Titan Company Ltd"), observe);
    assert_eq!(generation, Some(1));
    assert!(saw_partial, "sentiment and insights never showed before the recommendation");

    let state = dashboard.snapshot();
    assert_eq!(state.slices.recommendation, SliceStatus::Ready);
    assert_eq!(state.sentiment.strength, 0.6);
}

#[tokio::test]
async fn insights_error_envelope_marks_slice_failed() {
    let server = MockServer::start().await;
    mount_session(&server, "Tata Motors", "s-7").await;
    mount_get(&server, "/query_concurrent", "s-7", ok_json(json!({}))).await;
    mount_get(
        &server,
        "/sentiment",
        "s-7",
        ok_json(json!({"result": [{"label": "Bullish", "score": 0.2}]})),
    )
    .await;
    mount_get(
        &server,
        "/output_text",
        "s-7",
        ok_json(json!({"status": "error", "message": "rate limited"})),
    )
    .await;
    mount_get(&server, "/recommendation", "s-7", ok_json(json!({}))).await;

    let dashboard = dashboard_for(&server);
    dashboard.search("Tata Motors").await;
    let state = dashboard.snapshot();

    let reason = state.slices.insights.failure().expect("insights failed");
    assert!(reason.contains("rate limited"));
    assert!(reason.contains("Reported"));
    assert_eq!(state.insight, None);
    assert_eq!(state.slices.sentiment, SliceStatus::Ready);
}
