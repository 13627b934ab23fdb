//! Product pages: list, detail, create, edit, delete.

use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Form,
};
use serde::Deserialize;

use crate::error::{AppError, Resource};
use crate::extractors::{Flash, Notice};
use crate::model::{Category, ProductForm, ProductId};
use crate::response::{redirect_with, render};
use crate::service::ProductService;
use crate::state::AppState;
use crate::views::{
    category_options, GarmentView, ProductFormTemplate, ProductShowTemplate, ProductView,
    ProductsIndexTemplate,
};

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
}

fn parse_product_id(raw: &str) -> Result<ProductId, AppError> {
    raw.parse().map_err(AppError::cast(Resource::Product))
}

/// Heading for the list page: "All" when unfiltered, the category's label when
/// it is a known category, the raw value otherwise.
fn category_label(filter: Option<&str>) -> String {
    match filter {
        None => "All".to_string(),
        Some(raw) => raw
            .parse::<Category>()
            .map(|c| c.label().to_string())
            .unwrap_or_else(|_| raw.to_string()),
    }
}

/// Trimmed filter value. Known categories are folded to their stored form, so
/// `Shirt` lists shirts; unknown values pass through and match nothing.
fn normalize_category(raw: Option<&str>) -> Option<String> {
    let raw = raw.map(str::trim).filter(|c| !c.is_empty())?;
    Some(
        raw.parse::<Category>()
            .map(|c| c.as_str().to_string())
            .unwrap_or_else(|_| raw.to_string()),
    )
}

/// GET /products[?category=]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
    flash: Flash,
) -> Result<Html<String>, AppError> {
    let filter = normalize_category(query.category.as_deref());
    let filter = filter.as_deref();
    let products = ProductService::list(state.store(), filter).await?;
    render(&ProductsIndexTemplate {
        flash: flash.message(),
        category_label: category_label(filter),
        categories: category_options(filter),
        products: products.iter().map(ProductView::from).collect(),
    })
}

/// GET /products/create
pub async fn new_form() -> Result<Html<String>, AppError> {
    render(&ProductFormTemplate::new(
        "New Product".into(),
        "/products".into(),
        "/products".into(),
        &ProductForm::default(),
    ))
}

/// POST /products
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect, AppError> {
    let product = ProductService::create(state.store(), &form).await?;
    Ok(redirect_with(&format!("/products/{}", product.id), Notice::ProductCreated))
}

/// GET /products/:id
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    flash: Flash,
) -> Result<Html<String>, AppError> {
    let id = parse_product_id(&id)?;
    let found = ProductService::get_with_garment(state.store(), id).await?;
    render(&ProductShowTemplate {
        flash: flash.message(),
        product: ProductView::from(&found.product),
        garment: found.garment.as_ref().map(GarmentView::from),
    })
}

/// GET /products/:id/edit
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_product_id(&id)?;
    let product = ProductService::get(state.store(), id).await?;
    render(&ProductFormTemplate::new(
        format!("Edit {}", product.name),
        format!("/products/{}?_method=PUT", product.id),
        format!("/products/{}", product.id),
        &ProductForm::from(&product),
    ))
}

/// PUT /products/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect, AppError> {
    let id = parse_product_id(&id)?;
    let product = ProductService::update(state.store(), id, &form).await?;
    Ok(redirect_with(&format!("/products/{}", product.id), Notice::ProductUpdated))
}

/// DELETE /products/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let id = parse_product_id(&id)?;
    ProductService::delete(state.store(), id).await?;
    Ok(redirect_with("/products", Notice::ProductDeleted))
}
