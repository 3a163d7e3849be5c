//! Application router.
//!
//! Shell pages live at `/` and `/pages/:page`; the JSON API is nested under
//! `/api/`. Anything under `/api/` that no handler takes gets a JSON 404,
//! wrong methods on known paths included.
//!
//! Layers (outermost to innermost): no-store header → audit logger → handler.

use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::routing::{get, post};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the full router over a shared `CoreState`.
pub fn app_router(core: Arc<CoreState>) -> Router {
    build_router(ApiContext::new(core))
}

fn build_router(ctx: ApiContext) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    use endpoints::fallback::not_found;
    let api = Router::new()
        .route("/health", get(endpoints::health::check).fallback(not_found))
        .route("/vocabulary", get(endpoints::vocabulary::list).fallback(not_found))
        .route("/predict/:target", post(endpoints::predict::target).fallback(not_found))
        .route("/symptoms/predict", post(endpoints::predict::symptoms).fallback(not_found))
        .route("/medicines", get(endpoints::medicines::lookup).fallback(not_found))
        .route("/medicines/search", get(endpoints::medicines::search).fallback(not_found))
        .fallback(not_found);

    Router::new()
        .route("/", get(endpoints::pages::root))
        .route(
            "/pages/:page",
            get(endpoints::pages::show).post(endpoints::pages::submit),
        )
        .nest("/api", api)
        .with_state(ctx)
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}
