//! Product operations: listing, the product→garment join, create/update/delete.

use tracing::instrument;

use crate::error::{AppError, Resource};
use crate::model::{Garment, Product, ProductForm, ProductId};
use crate::service::RequestValidator;
use crate::store::Store;

/// A product with its owning garment resolved for display.
#[derive(Debug, Clone)]
pub struct ProductWithGarment {
    pub product: Product,
    pub garment: Option<Garment>,
}

pub struct ProductService;

impl ProductService {
    /// List products, optionally restricted to one category. A blank filter means no filter.
    #[instrument(skip(store))]
    pub async fn list(store: &dyn Store, category: Option<&str>) -> Result<Vec<Product>, AppError> {
        let category = category.map(str::trim).filter(|c| !c.is_empty());
        store.list_products(category).await
    }

    pub async fn get(store: &dyn Store, id: ProductId) -> Result<Product, AppError> {
        store
            .find_product(id)
            .await?
            .ok_or(AppError::NotFound(Resource::Product))
    }

    /// Fetch a product and populate its garment back-reference. A dangling
    /// reference renders as no garment rather than failing the page.
    #[instrument(skip(store))]
    pub async fn get_with_garment(
        store: &dyn Store,
        id: ProductId,
    ) -> Result<ProductWithGarment, AppError> {
        let product = Self::get(store, id).await?;
        let garment = match product.garment_id {
            Some(gid) => store.find_garment(gid).await?,
            None => None,
        };
        Ok(ProductWithGarment { product, garment })
    }

    #[instrument(skip(store, form))]
    pub async fn create(store: &dyn Store, form: &ProductForm) -> Result<Product, AppError> {
        let draft = RequestValidator::product(form)?;
        let product = store.insert_product(draft).await?;
        tracing::info!(product_id = %product.id, "product created");
        Ok(product)
    }

    /// Validate and overwrite. Validation runs before the store is touched, so a
    /// rejected update leaves the stored product as it was.
    #[instrument(skip(store, form))]
    pub async fn update(
        store: &dyn Store,
        id: ProductId,
        form: &ProductForm,
    ) -> Result<Product, AppError> {
        let draft = RequestValidator::product(form)?;
        let product = store
            .update_product(id, draft)
            .await?
            .ok_or(AppError::NotFound(Resource::Product))?;
        tracing::info!(product_id = %product.id, "product updated");
        Ok(product)
    }

    /// Unconditional delete: removing an id that does not exist is not an error.
    #[instrument(skip(store))]
    pub async fn delete(store: &dyn Store, id: ProductId) -> Result<(), AppError> {
        if store.delete_product(id).await? {
            tracing::info!(product_id = %id, "product deleted");
        }
        Ok(())
    }
}
