//! Route tables and the assembled application.

mod common;
mod garments;
mod products;

pub use common::common_routes;
pub use garments::garment_routes;
pub use products::product_routes;

use axum::{extract::DefaultBodyLimit, middleware, Router};
use tower_http::trace::TraceLayer;

use crate::middleware::method_override;
use crate::state::AppState;

/// Form bodies are small; larger ones are rejected by the extractors.
const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// The full application. Method override wraps the router from the outside so
/// the rewritten method is what routing sees.
pub fn app(state: AppState) -> Router {
    let routes = Router::new()
        .merge(common_routes())
        .merge(product_routes())
        .merge(garment_routes())
        .with_state(state);

    Router::new()
        .fallback_service(routes)
        .layer(middleware::from_fn(method_override))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
}
