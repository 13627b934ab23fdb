//! Garment pages, the nested product form, and the cascading delete.

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form,
};

use crate::error::{AppError, Resource};
use crate::extractors::{Flash, Notice};
use crate::model::{GarmentForm, GarmentId, ProductForm};
use crate::response::{redirect_with, render};
use crate::service::GarmentService;
use crate::state::AppState;
use crate::views::{
    GarmentFormTemplate, GarmentShowTemplate, GarmentView, GarmentsIndexTemplate,
    ProductFormTemplate, ProductView,
};

fn parse_garment_id(raw: &str) -> Result<GarmentId, AppError> {
    raw.parse().map_err(AppError::cast(Resource::Garment))
}

/// GET /garments
pub async fn index(
    State(state): State<AppState>,
    flash: Flash,
) -> Result<Html<String>, AppError> {
    let garments = GarmentService::list(state.store()).await?;
    render(&GarmentsIndexTemplate {
        flash: flash.message(),
        garments: garments.iter().map(GarmentView::from).collect(),
    })
}

/// GET /garments/create
pub async fn new_form() -> Result<Html<String>, AppError> {
    render(&GarmentFormTemplate {})
}

/// POST /garments
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<GarmentForm>,
) -> Result<Redirect, AppError> {
    let garment = GarmentService::create(state.store(), &form).await?;
    Ok(redirect_with(&format!("/garments/{}", garment.id), Notice::GarmentCreated))
}

/// GET /garments/:id
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    flash: Flash,
) -> Result<Html<String>, AppError> {
    let id = parse_garment_id(&id)?;
    let found = GarmentService::get_with_products(state.store(), id).await?;
    render(&GarmentShowTemplate {
        flash: flash.message(),
        garment: GarmentView::from(&found.garment),
        products: found.products.iter().map(ProductView::from).collect(),
    })
}

/// GET /garments/:garment_id/products/create
pub async fn new_product_form(
    State(state): State<AppState>,
    Path(garment_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let garment_id = parse_garment_id(&garment_id)?;
    let garment = GarmentService::get(state.store(), garment_id).await?;
    render(&ProductFormTemplate::new(
        format!("New Product for {}", garment.name),
        format!("/garments/{}/products", garment.id),
        format!("/garments/{}", garment.id),
        &ProductForm::default(),
    ))
}

/// POST /garments/:garment_id/products
pub async fn create_product(
    State(state): State<AppState>,
    Path(garment_id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect, AppError> {
    let garment_id = parse_garment_id(&garment_id)?;
    GarmentService::add_product(state.store(), garment_id, &form).await?;
    Ok(redirect_with(&format!("/garments/{}", garment_id), Notice::ProductCreated))
}

/// DELETE /garments/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let id = parse_garment_id(&id)?;
    GarmentService::delete_garment_and_owned_products(state.store(), id).await?;
    Ok(redirect_with("/garments", Notice::GarmentDeleted))
}
