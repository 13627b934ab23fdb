//! Product routes.

use crate::handlers::products;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index).post(products::create))
        .route("/products/create", get(products::new_form))
        .route(
            "/products/:id",
            get(products::show)
                .put(products::update)
                .patch(products::update)
                .delete(products::delete),
        )
        .route("/products/:id/edit", get(products::edit_form))
}
