use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use indovate_core::backend::http::HttpAnalysisBackend;
use indovate_core::backend::AnalysisBackend;
use indovate_core::config::Settings;
use indovate_core::dashboard::Dashboard;
use indovate_core::view::carousel::Carousel;
use indovate_core::view::render::render_dashboard;

mod progress;

#[derive(Debug, Parser)]
#[command(name = "indovate")]
struct Args {
    /// Analysis backend base URL. Overrides BACKEND_BASE_URL.
    #[arg(long, global = true)]
    backend: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Submit a company query and print the hydrated dashboard.
    Search {
        query: String,

        /// Print the final state as JSON instead of text.
        #[arg(long)]
        json: bool,

        /// Also download the chart document to this path.
        #[arg(long)]
        chart_out: Option<PathBuf>,
    },
    /// List validation sources, one carousel page at a time.
    Validations {
        #[arg(long, default_value_t = 0)]
        page: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    if let Some(backend) = args.backend {
        settings.backend_base_url = backend;
    }

    let backend = HttpAnalysisBackend::from_settings(&settings)?;
    let dashboard = Dashboard::new(Arc::new(backend));

    let res = match args.command {
        Command::Search {
            query,
            json,
            chart_out,
        } => run_search(&dashboard, &settings, &query, json, chart_out).await,
        Command::Validations { page } => run_validations(&dashboard, &settings, page).await,
    };

    if let Err(err) = &res {
        sentry_anyhow::capture_anyhow(err);
    }
    res
}

async fn run_search(
    dashboard: &Dashboard,
    settings: &Settings,
    query: &str,
    json: bool,
    chart_out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let watcher = tokio::spawn(progress::log_progress(dashboard.subscribe()));

    let Some(generation) = dashboard.search(query).await else {
        watcher.abort();
        tracing::info!("empty query ignored");
        return Ok(());
    };
    // Loaded after the search so the session id can ride along.
    dashboard.load_validations().await;
    watcher.abort();

    let state = dashboard.snapshot();
    tracing::info!(generation, session = ?state.session, "search finished");

    if let (Some(path), Some(session)) = (chart_out, state.session.as_ref()) {
        let doc = dashboard
            .backend()
            .chart(session)
            .await
            .context("chart download failed")?;
        std::fs::write(&path, doc.body)
            .with_context(|| format!("failed to write chart to {}", path.display()))?;
        tracing::info!(path = %path.display(), "chart saved");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    // The chart frame follows its loading delay, so hold off printing until it is ready.
    if let Some(acquired_at) = state.session_acquired_at {
        let ready_at = acquired_at + settings.chart_delay;
        tokio::time::sleep_until(ready_at.into()).await;
    }

    let carousel = Carousel::new(state.validations.len(), settings.carousel_page_size);
    print!(
        "{}",
        render_dashboard(&state, &carousel, Instant::now(), settings.chart_delay)
    );
    Ok(())
}

async fn run_validations(
    dashboard: &Dashboard,
    settings: &Settings,
    page: usize,
) -> anyhow::Result<()> {
    dashboard.load_validations().await;
    let state = dashboard.snapshot();
    if let Some(reason) = state.slices.validations.failure() {
        anyhow::bail!("validation sources unavailable: {reason}");
    }

    let mut carousel = Carousel::new(state.validations.len(), settings.carousel_page_size);
    carousel.jump_to_page(page);
    if state.validations.is_empty() {
        println!("no validation sources");
        return Ok(());
    }
    let range = carousel.visible();
    println!(
        "sources {}-{} of {}",
        range.start + 1,
        range.end,
        state.validations.len()
    );
    for source in carousel.window(&state.validations) {
        println!("- {}\n  {}\n  {}", source.title, source.url, source.snippet);
    }
    Ok(())
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
