use anyhow::{Context, Result};
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use leadform::domain::constants::DOCS_PATH;
use leadform::kernel::prelude::ApiState;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(info(
    title = "Lead registration relay",
    description = "Relays registration form submissions to the admissions inbox by email"
))]
struct ApiDoc;

#[allow(unreachable_pub)]
pub fn init(state: ApiState) -> Result<Router> {
    let cors = cors_layer(&state.config.server.cors_origins)?;

    // Separate the OpenAPI routes and the API documentation object
    let (openapi_routes, api_doc) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(leadform::server::router::system_router())
        .merge(leadform::server::router::registration_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
        .split_for_parts();

    let scalar_routes = Scalar::with_url(DOCS_PATH, api_doc);

    Ok(Router::new().merge(openapi_routes).merge(scalar_routes))
}

/// Any origin when the list is empty, otherwise exactly the listed ones.
fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    if origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }

    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin.trim()).with_context(|| format!("Invalid CORS origin '{origin}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]))
}
