//! API router.
//!
//! Returns a composable `Router` with every route under `/api/`.
//! Layers (outermost → innermost): CORS → Cache-Control → access log.

use std::sync::Arc;

use axum::http::header::CACHE_CONTROL;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the API router.
pub fn api_router(core: Arc<CoreState>) -> Router {
    build_router(ApiContext::new(core))
}

fn build_router(ctx: ApiContext) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/sessions", post(endpoints::sessions::create))
        .route(
            "/sessions/:id",
            get(endpoints::sessions::get).delete(endpoints::sessions::end),
        )
        .route("/sessions/:id/role", post(endpoints::sessions::select_role))
        .route("/sessions/:id/enter", post(endpoints::sessions::enter))
        .route("/sessions/:id/leave", post(endpoints::sessions::leave))
        .route("/sessions/:id/reset", post(endpoints::sessions::reset))
        .route("/sessions/:id/check", post(endpoints::checks::run))
        .route("/catalog/drugs", get(endpoints::catalog::drugs))
        .route(
            "/catalog/household-items",
            get(endpoints::catalog::household_items),
        )
        .route("/patients/:name", get(endpoints::patients::lookup))
        .with_state(ctx);

    Router::new()
        .nest("/api", api)
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        // Responses carry patient data.
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CorsLayer::permissive())
}
