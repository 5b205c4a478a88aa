use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderName, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, warn};

use crate::fetcher::Fetcher;
use crate::news::{Category, NewsPage, NewsParams, NewsQuery};
use crate::view::ViewState;

const FETCH_FAILED: &str = "Failed to fetch news";

const CORS_HEADERS: [(header::HeaderName, &str); 3] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (
        header::ACCESS_CONTROL_ALLOW_METHODS,
        "GET, POST, PUT, DELETE, OPTIONS",
    ),
    (
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        "Content-Type, Authorization",
    ),
];

/// Tells htmx to skip the main swap and only apply out-of-band elements.
const HX_RESWAP: HeaderName = HeaderName::from_static("hx-reswap");

pub struct AppState {
    pub fetcher: Fetcher,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/results", get(results))
        .route("/api/news", get(news).options(news_preflight))
        .route("/health", get(health))
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Template structs
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub view: ViewState,
    pub categories: &'static [Category],
}

#[derive(Template)]
#[template(path = "results_fragment.html")]
pub struct ResultsTemplate {
    pub view: ViewState,
}

#[derive(Template)]
#[template(path = "failure_notice.html")]
pub struct FailureNoticeTemplate;

// Wrapper for HTML responses
struct HtmlTemplate<T>(T);

impl<T: Template> IntoResponse for HtmlTemplate<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {}", err),
            )
                .into_response(),
        }
    }
}

/// JSON body of `/api/news`, always sent with the CORS headers.
pub enum NewsResponse {
    Page(NewsPage),
    Failed,
}

impl IntoResponse for NewsResponse {
    fn into_response(self) -> Response {
        match self {
            NewsResponse::Page(page) => (StatusCode::OK, CORS_HEADERS, Json(page)).into_response(),
            NewsResponse::Failed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                CORS_HEADERS,
                Json(json!({ "error": FETCH_FAILED })),
            )
                .into_response(),
        }
    }
}

/// Malformed query strings (e.g. repeated keys) fall back to the defaults.
fn news_query(params: Result<Query<NewsParams>, QueryRejection>) -> NewsQuery {
    match params {
        Ok(Query(params)) => NewsQuery::from(params),
        Err(rejection) => {
            warn!("Ignoring unparseable query string: {}", rejection);
            NewsQuery::default()
        }
    }
}

// Route handlers
pub async fn news(
    State(state): State<Arc<AppState>>,
    params: Result<Query<NewsParams>, QueryRejection>,
) -> NewsResponse {
    let query = news_query(params);
    match state.fetcher.search(&query).await {
        Ok(page) => NewsResponse::Page(page),
        Err(e) => {
            error!("Error fetching news: {}", e);
            NewsResponse::Failed
        }
    }
}

pub async fn news_preflight() -> impl IntoResponse {
    (StatusCode::NO_CONTENT, CORS_HEADERS)
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    params: Result<Query<NewsParams>, QueryRejection>,
) -> impl IntoResponse {
    let view = load_view(&state, &news_query(params)).await;
    HtmlTemplate(IndexTemplate {
        view,
        categories: &Category::ALL,
    })
}

/// Results region for htmx swaps. On failure the current results stay on
/// screen and only the notice is updated.
pub async fn results(
    State(state): State<Arc<AppState>>,
    params: Result<Query<NewsParams>, QueryRejection>,
) -> Response {
    let view = load_view(&state, &news_query(params)).await;
    if view.has_failed() {
        return ([(HX_RESWAP, "none")], HtmlTemplate(FailureNoticeTemplate)).into_response();
    }
    HtmlTemplate(ResultsTemplate { view }).into_response()
}

async fn load_view(state: &AppState, query: &NewsQuery) -> ViewState {
    match state.fetcher.search(query).await {
        Ok(page) => ViewState::loaded(query, page),
        Err(e) => {
            error!("Error fetching news for page view: {}", e);
            ViewState::failed(query)
        }
    }
}

pub async fn health() -> impl IntoResponse {
    Html("OK")
}
