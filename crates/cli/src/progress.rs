use indovate_core::dashboard::state::{DashboardState, SliceStatus, Slices};
use tokio::sync::watch;

/// Logs each slice as it changes status, until the dashboard is dropped or the task aborted.
pub async fn log_progress(mut rx: watch::Receiver<DashboardState>) {
    let mut last = rx.borrow_and_update().slices.clone();
    while rx.changed().await.is_ok() {
        let current = rx.borrow_and_update().slices.clone();
        for (name, before, after) in pairs(&last, &current) {
            if before == after {
                continue;
            }
            match after {
                SliceStatus::Failed(reason) => {
                    tracing::warn!(slice = name, %reason, "slice failed")
                }
                status => tracing::info!(slice = name, ?status, "slice updated"),
            }
        }
        last = current;
    }
}

fn pairs<'a>(a: &'a Slices, b: &'a Slices) -> [(&'static str, &'a SliceStatus, &'a SliceStatus); 6] {
    [
        ("submit", &a.submit, &b.submit),
        ("analysis", &a.analysis, &b.analysis),
        ("sentiment", &a.sentiment, &b.sentiment),
        ("insights", &a.insights, &b.insights),
        ("recommendation", &a.recommendation, &b.recommendation),
        ("validations", &a.validations, &b.validations),
    ]
}
