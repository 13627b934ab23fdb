//! Garment operations, including the nested product create and the cascade delete.

use tracing::instrument;

use crate::error::{AppError, Resource};
use crate::model::{Garment, GarmentForm, GarmentId, Product, ProductForm};
use crate::service::RequestValidator;
use crate::store::Store;

/// A garment with its product references populated, in list order.
#[derive(Debug, Clone)]
pub struct GarmentWithProducts {
    pub garment: Garment,
    pub products: Vec<Product>,
}

pub struct GarmentService;

impl GarmentService {
    pub async fn list(store: &dyn Store) -> Result<Vec<Garment>, AppError> {
        store.list_garments().await
    }

    pub async fn get(store: &dyn Store, id: GarmentId) -> Result<Garment, AppError> {
        store
            .find_garment(id)
            .await?
            .ok_or(AppError::NotFound(Resource::Garment))
    }

    #[instrument(skip(store))]
    pub async fn get_with_products(
        store: &dyn Store,
        id: GarmentId,
    ) -> Result<GarmentWithProducts, AppError> {
        let garment = Self::get(store, id).await?;
        let products = store.find_products(&garment.products).await?;
        if products.len() != garment.products.len() {
            tracing::warn!(
                garment_id = %id,
                listed = garment.products.len(),
                found = products.len(),
                "garment lists products that no longer exist"
            );
        }
        Ok(GarmentWithProducts { garment, products })
    }

    #[instrument(skip(store, form))]
    pub async fn create(store: &dyn Store, form: &GarmentForm) -> Result<Garment, AppError> {
        let draft = RequestValidator::garment(form)?;
        let garment = store.insert_garment(draft).await?;
        tracing::info!(garment_id = %garment.id, "garment created");
        Ok(garment)
    }

    /// Create a product owned by the garment and append it to the garment's list.
    #[instrument(skip(store, form))]
    pub async fn add_product(
        store: &dyn Store,
        garment_id: GarmentId,
        form: &ProductForm,
    ) -> Result<Product, AppError> {
        let draft = RequestValidator::product(form)?;
        let product = store
            .insert_product_for_garment(garment_id, draft)
            .await?
            .ok_or(AppError::NotFound(Resource::Garment))?;
        tracing::info!(garment_id = %garment_id, product_id = %product.id, "product added to garment");
        Ok(product)
    }

    /// Delete the garment and every product it owns.
    #[instrument(skip(store))]
    pub async fn delete_garment_and_owned_products(
        store: &dyn Store,
        id: GarmentId,
    ) -> Result<Garment, AppError> {
        let garment = store
            .delete_garment_cascade(id)
            .await?
            .ok_or(AppError::NotFound(Resource::Garment))?;
        tracing::info!(
            garment_id = %id,
            products_deleted = garment.products.len(),
            "garment deleted with its products"
        );
        Ok(garment)
    }
}
