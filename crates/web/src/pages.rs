use askama::Template;
use axum::{
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use credtech_core::dashboard::QueryState;
use credtech_core::ui::faq::FaqAccordion;
use credtech_core::ui::navbar::{nav_links, NavLinkView, NavbarState, BRAND, SCROLL_THRESHOLD_PX};
use credtech_core::ui::route::Route;
use credtech_core::ui::score_card::{build_cards, ScoreCardView};

use crate::AppState;

/// Seconds between automatic reloads while a query is in flight.
const LOADING_REFRESH_SECS: u32 = 1;

fn render_template<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "template render failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong rendering this page.",
            )
                .into_response()
        }
    }
}

/// Navbar, footer and document head shared by every page.
pub struct Shell {
    pub title: &'static str,
    pub brand: &'static str,
    pub nav: Vec<NavLinkView>,
    pub navbar: NavbarState,
    pub scroll_threshold: f64,
    pub refresh_secs: Option<u32>,
}

impl Shell {
    pub fn for_path(path: &str) -> Self {
        Self {
            title: Route::from_path(path)
                .map(Route::title)
                .unwrap_or("Page not found"),
            brand: BRAND,
            nav: nav_links(path),
            navbar: NavbarState::default(),
            scroll_threshold: SCROLL_THRESHOLD_PX,
            refresh_secs: None,
        }
    }

    pub fn refresh_content(&self) -> String {
        self.refresh_secs.map(|s| s.to_string()).unwrap_or_default()
    }
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage {
    pub shell: Shell,
    pub faq: FaqAccordion,
}

pub async fn home() -> Response {
    render_template(&HomePage {
        shell: Shell::for_path(Route::Home.path()),
        faq: FaqAccordion::default(),
    })
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub shell: Shell,
    pub session: String,
    pub input_text: String,
    pub is_loading: bool,
    pub error: Option<String>,
    pub cards: Vec<ScoreCardView>,
    pub fetched_at: Option<String>,
}

impl DashboardPage {
    pub fn new(session: Option<Uuid>, state: QueryState) -> Self {
        let mut shell = Shell::for_path(Route::Dashboard.path());
        if state.is_loading {
            shell.refresh_secs = Some(LOADING_REFRESH_SECS);
        }

        Self {
            shell,
            session: session.map(|id| id.to_string()).unwrap_or_default(),
            input_text: state.input_text,
            is_loading: state.is_loading,
            error: state.error,
            cards: build_cards(&state.results),
            fetched_at: state
                .fetched_at
                .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
        }
    }

    fn has_error(&self) -> bool {
        self.error.is_some()
    }

    fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or_default()
    }

    fn submit_label(&self) -> &'static str {
        if self.is_loading {
            "Analyzing..."
        } else {
            "Get Credit Scores"
        }
    }

    fn fetched_at_label(&self) -> &str {
        self.fetched_at.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub session: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QueryForm {
    #[serde(default)]
    pub session: Option<String>,
    #[serde(default)]
    pub tickers: String,
}

#[derive(Debug, Deserialize)]
pub struct CloseForm {
    #[serde(default)]
    pub session: Option<String>,
}

fn parse_session(raw: Option<&str>) -> Option<Uuid> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<Uuid>().ok())
}

/// GET /dashboard - renders the session's view, or a fresh one.
pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let live = match parse_session(query.session.as_deref()) {
        Some(id) => state.sessions.get(id).await.map(|entry| (id, entry)),
        None => None,
    };

    let page = match live {
        Some((id, entry)) => DashboardPage::new(Some(id), entry.view().snapshot().await),
        None => DashboardPage::new(None, QueryState::default()),
    };
    render_template(&page)
}

/// POST /dashboard - starts a query on the session's view and redirects back.
pub async fn submit_query(State(state): State<AppState>, Form(form): Form<QueryForm>) -> Response {
    let (id, entry) = state.sessions.open(parse_session(form.session.as_deref())).await;
    let submission = entry
        .view()
        .spawn_query(&form.tickers, Arc::clone(&state.scores))
        .await;
    tracing::info!(session = %id, ?submission, "dashboard query submitted");

    Redirect::to(&format!("{}?session={id}", Route::Dashboard.path())).into_response()
}

/// POST /dashboard/close - tears the session's view down.
pub async fn close_dashboard(
    State(state): State<AppState>,
    Form(form): Form<CloseForm>,
) -> Response {
    if let Some(id) = parse_session(form.session.as_deref()) {
        state.sessions.close(id).await;
    }
    Redirect::to(Route::Home.path()).into_response()
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundPage {
    pub shell: Shell,
    pub path: String,
}

pub async fn not_found(uri: Uri) -> Response {
    let page = NotFoundPage {
        shell: Shell::for_path(uri.path()),
        path: uri.path().to_string(),
    };
    let mut res = render_template(&page);
    if res.status() == StatusCode::OK {
        *res.status_mut() = StatusCode::NOT_FOUND;
    }
    res
}
