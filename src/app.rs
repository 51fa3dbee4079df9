use axum::{
    middleware::from_fn,
    routing::{get, patch, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config;
use crate::handlers::{companies, health::health, jobs, AppState};
use crate::middleware::{authenticate_jwt, ensure_admin};

/// Build the full router over the given state
pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(health))
        .merge(company_routes())
        .merge(job_routes())
        .layer(from_fn(authenticate_jwt));

    if config::config().api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    if config::config().security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router.with_state(state)
}

// `route_layer` only wraps the methods registered before it, so the
// trailing `get` stays public.
fn company_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/companies",
            post(companies::create)
                .route_layer(from_fn(ensure_admin))
                .get(companies::list),
        )
        .route(
            "/companies/:handle",
            patch(companies::update)
                .delete(companies::remove)
                .route_layer(from_fn(ensure_admin))
                .get(companies::get),
        )
}

fn job_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/jobs",
            post(jobs::create)
                .route_layer(from_fn(ensure_admin))
                .get(jobs::list),
        )
        .route(
            "/jobs/:id",
            patch(jobs::update)
                .delete(jobs::remove)
                .route_layer(from_fn(ensure_admin))
                .get(jobs::get),
        )
}
