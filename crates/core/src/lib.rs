pub mod dashboard;
pub mod domain;
pub mod scores;
pub mod ui;

pub mod config {
    use anyhow::Context;

    pub const DEFAULT_SCORES_API_BASE_URL: &str = "http://127.0.0.1:8000";
    pub const DEFAULT_PORT: u16 = 3000;
    pub const DEFAULT_SESSION_IDLE_SECS: u64 = 15 * 60;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub scores_api_base_url: String,
        pub port: u16,
        pub session_idle_secs: u64,
        pub sentry_dsn: Option<String>,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                scores_api_base_url: DEFAULT_SCORES_API_BASE_URL.to_string(),
                port: DEFAULT_PORT,
                session_idle_secs: DEFAULT_SESSION_IDLE_SECS,
                sentry_dsn: None,
            }
        }
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let defaults = Self::default();

            let scores_api_base_url = std::env::var("SCORES_API_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.scores_api_base_url);

            let port = match std::env::var("PORT") {
                Ok(s) => s
                    .trim()
                    .parse::<u16>()
                    .with_context(|| format!("PORT must be a valid port number (got {s:?})"))?,
                Err(_) => defaults.port,
            };

            let session_idle_secs = match std::env::var("SESSION_IDLE_SECS") {
                Ok(s) => s.trim().parse::<u64>().with_context(|| {
                    format!("SESSION_IDLE_SECS must be a number of seconds (got {s:?})")
                })?,
                Err(_) => defaults.session_idle_secs,
            };
            anyhow::ensure!(session_idle_secs >= 1, "SESSION_IDLE_SECS must be >= 1");

            Ok(Self {
                scores_api_base_url,
                port,
                session_idle_secs,
                sentry_dsn: std::env::var("SENTRY_DSN").ok().filter(|s| !s.is_empty()),
            })
        }

        pub fn session_idle(&self) -> std::time::Duration {
            std::time::Duration::from_secs(self.session_idle_secs)
        }
    }
}
