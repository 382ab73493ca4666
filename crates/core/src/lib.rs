pub mod backend;
pub mod dashboard;
pub mod domain;
pub mod search;
pub mod view;

pub mod config {
    use anyhow::Context;
    use std::time::Duration;

    pub const DEFAULT_BACKEND_BASE_URL: &str = "http://127.0.0.1:5000";
    const DEFAULT_TIMEOUT_SECS: u64 = 60;
    const DEFAULT_CHART_DELAY_MS: u64 = 1500;
    const DEFAULT_CAROUSEL_PAGE_SIZE: usize = 3;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub backend_base_url: String,
        pub backend_timeout: Duration,
        pub chart_delay: Duration,
        pub carousel_page_size: usize,
        pub sentry_dsn: Option<String>,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                backend_base_url: DEFAULT_BACKEND_BASE_URL.to_string(),
                backend_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
                chart_delay: Duration::from_millis(DEFAULT_CHART_DELAY_MS),
                carousel_page_size: DEFAULT_CAROUSEL_PAGE_SIZE,
                sentry_dsn: None,
            }
        }
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let backend_base_url = std::env::var("BACKEND_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BACKEND_BASE_URL.to_string());

            let backend_timeout = Duration::from_secs(
                parse_env::<u64>("BACKEND_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS),
            );
            let chart_delay = Duration::from_millis(
                parse_env::<u64>("CHART_DELAY_MS")?.unwrap_or(DEFAULT_CHART_DELAY_MS),
            );
            let carousel_page_size =
                parse_env::<usize>("CAROUSEL_PAGE_SIZE")?.unwrap_or(DEFAULT_CAROUSEL_PAGE_SIZE);
            anyhow::ensure!(
                carousel_page_size > 0,
                "CAROUSEL_PAGE_SIZE must be at least 1"
            );

            Ok(Self {
                backend_base_url,
                backend_timeout,
                chart_delay,
                carousel_page_size,
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }
    }

    fn parse_env<T>(key: &str) -> anyhow::Result<Option<T>>
    where
        T: std::str::FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match std::env::var(key) {
            Ok(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse::<T>()
                .map(Some)
                .with_context(|| format!("{key} is not valid: {raw}")),
            _ => Ok(None),
        }
    }
}
