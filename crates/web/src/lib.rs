use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use credtech_core::scores::ScoreSource;

mod pages;
pub mod sessions;

use sessions::DashboardSessions;

#[derive(Clone)]
pub struct AppState {
    pub scores: Arc<dyn ScoreSource>,
    pub sessions: Arc<DashboardSessions>,
}

impl AppState {
    pub fn new(scores: Arc<dyn ScoreSource>) -> Self {
        Self {
            scores,
            sessions: Arc::new(DashboardSessions::new()),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route(
            "/dashboard",
            get(pages::dashboard).post(pages::submit_query),
        )
        .route("/dashboard/close", post(pages::close_dashboard))
        .route("/healthz", get(healthz))
        .fallback(pages::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}
