//! Garment routes, including the nested product create.

use crate::handlers::garments;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn garment_routes() -> Router<AppState> {
    Router::new()
        .route("/garments", get(garments::index).post(garments::create))
        .route("/garments/create", get(garments::new_form))
        .route("/garments/:id", get(garments::show).delete(garments::delete))
        .route(
            "/garments/:id/products/create",
            get(garments::new_product_form),
        )
        .route("/garments/:id/products", post(garments::create_product))
}
