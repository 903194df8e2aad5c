//! Axum router construction for the query API.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /` -- service info
/// - `GET /health` -- status and counts
/// - `GET /fighters` -- filter fighters
/// - `GET /abilities` -- filter abilities
/// - `GET /warbands` -- list warbands
/// - `GET /warbands/{name}` -- single warband
///
/// CORS allows any origin; the dataset is public.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/fighters", get(handlers::list_fighters))
        .route("/abilities", get(handlers::list_abilities))
        .route("/warbands", get(handlers::list_warbands))
        .route("/warbands/{name}", get(handlers::get_warband))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
