use super::state::ApiState;
use axum::extract::State;
use axum::http::header;
use axum::{Json, response::IntoResponse};
use leadform_derive::{api_handler, api_model};
use leadform_domain::constants::SYSTEM_TAG;
use std::sync::LazyLock;
use std::time::Instant;

#[api_model]
/// Health check response
pub(super) struct HealthResponse {
    /// Always `up` while the process serves requests
    status: &'static str,
    /// Crate version
    version: &'static str,
    /// Uptime in seconds
    uptime: u64,
    /// Feature slices registered at startup, e.g. `registration`
    features: Vec<String>,
}

static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

#[api_handler(
    get,
    path = "/health",
    responses((status = OK, description = "Liveness and registered features", body = HealthResponse)),
    tag = SYSTEM_TAG,
)]
pub(super) async fn health_handler(State(state): State<ApiState>) -> impl IntoResponse {
    let body = HealthResponse {
        status: "up",
        version: env!("CARGO_PKG_VERSION"),
        uptime: START_TIME.elapsed().as_secs(),
        features: state.feature_names().into_iter().map(str::to_owned).collect(),
    };

    (
        [
            (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
            (header::PRAGMA, "no-cache"),
        ],
        Json(body),
    )
}
