use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use credtech_core::config::Settings;
use credtech_core::scores::http::HttpScoreClient;
use credtech_web::{router, sessions::DashboardSessions, AppState};

#[derive(Debug, Parser)]
#[command(name = "credtech-web")]
struct Args {
    /// Port to listen on (overrides PORT).
    #[arg(long)]
    port: Option<u16>,

    /// Base URL of the scoring backend (overrides SCORES_API_BASE_URL).
    #[arg(long)]
    scores_api_base_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut settings = Settings::from_env()?;
    if let Some(port) = args.port {
        settings.port = port;
    }
    if let Some(url) = args.scores_api_base_url {
        settings.scores_api_base_url = url;
    }
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let client = HttpScoreClient::from_settings(&settings).inspect_err(|e| {
        sentry_anyhow::capture_anyhow(e);
    })?;
    tracing::info!(base_url = client.base_url(), "scores backend configured");

    let state = AppState::new(Arc::new(client));
    let sweeper = tokio::spawn(sweep_idle_sessions(
        Arc::clone(&state.sessions),
        settings.session_idle(),
    ));

    let app = router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], settings.port));

    tracing::info!(%addr, "web listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    Ok(())
}

async fn sweep_idle_sessions(sessions: Arc<DashboardSessions>, max_idle: Duration) {
    let mut ticker = tokio::time::interval(max_idle.min(Duration::from_secs(60)));
    loop {
        ticker.tick().await;
        let evicted = sessions.evict_idle(max_idle).await;
        let live = sessions.len().await;
        if evicted > 0 {
            tracing::info!(evicted, live, "evicted idle dashboard sessions");
        } else {
            tracing::debug!(live, "dashboard session sweep");
        }
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
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
