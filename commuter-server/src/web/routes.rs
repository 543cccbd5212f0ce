//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Local;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::mbta::{MbtaError, TransitGateway};
use crate::schedule::fetch_all;

use super::dto::*;
use super::state::AppState;

/// Header the polling script sends with its requests.
const REQUESTED_WITH: &str = "x-requested-with";

/// Create the application router.
pub fn create_router<G>(state: AppState<G>) -> Router
where
    G: TransitGateway + 'static,
{
    // The polling script posts to the trailing-slash form.
    let page_info_route = post(page_info::<G>).fallback(invalid_request);

    Router::new()
        .route("/health", get(health))
        .route("/page-info", page_info_route.clone())
        .route("/page-info/", page_info_route)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Check whether a request came from the page's polling script.
fn is_ajax(headers: &HeaderMap) -> bool {
    headers
        .get(REQUESTED_WITH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"))
}

/// Polling endpoint: current departures for both stations plus the clock.
async fn page_info<G>(
    State(state): State<AppState<G>>,
    headers: HeaderMap,
) -> Result<Json<PageInfoResponse>, AppError>
where
    G: TransitGateway + 'static,
{
    if !is_ajax(&headers) {
        return Err(AppError::InvalidRequest);
    }

    let departures = fetch_all(state.gateway.as_ref(), state.clock.as_ref()).await?;
    let now = state.clock.now().with_timezone(&Local);

    Ok(Json(PageInfoResponse::new(&departures, &now)))
}

/// Any method other than POST on the polling endpoint.
async fn invalid_request() -> AppError {
    AppError::InvalidRequest
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Wrong method or not an AJAX request
    InvalidRequest,
    /// Fetching or normalizing upstream data failed
    Upstream { message: String },
}

impl From<MbtaError> for AppError {
    fn from(e: MbtaError) -> Self {
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidRequest => (StatusCode::BAD_REQUEST, "Invalid Request".to_string()),
            AppError::Upstream { message } => {
                warn!(%message, "failed to fetch departures");
                (StatusCode::BAD_GATEWAY, message)
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
