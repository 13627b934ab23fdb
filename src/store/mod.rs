//! Persistence for products and garments.
//!
//! `Store` is the seam between the service layer and a backend. Compound writes
//! (nested create, cascade delete, product delete with unlink) are single store
//! operations so each backend can make them atomic: `PgStore` wraps them in a
//! transaction, `MemoryStore` performs them under one write lock.

mod memory;
mod postgres;

use async_trait::async_trait;

use crate::error::AppError;
use crate::model::{Garment, GarmentDraft, GarmentId, Product, ProductDraft, ProductId};

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgStore};

#[async_trait]
pub trait Store: Send + Sync {
    /// All products, oldest first, optionally restricted to one category value.
    async fn list_products(&self, category: Option<&str>) -> Result<Vec<Product>, AppError>;

    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, AppError>;

    /// Products for the given ids, in the order of `ids`. Missing ids are skipped.
    async fn find_products(&self, ids: &[ProductId]) -> Result<Vec<Product>, AppError>;

    async fn insert_product(&self, draft: ProductDraft) -> Result<Product, AppError>;

    /// Insert a product owned by `garment_id` and append its id to the garment's
    /// list. Returns `None`, inserting nothing, when the garment does not exist.
    async fn insert_product_for_garment(
        &self,
        garment_id: GarmentId,
        draft: ProductDraft,
    ) -> Result<Option<Product>, AppError>;

    /// Overwrite the editable fields. `None` when no such product.
    async fn update_product(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<Option<Product>, AppError>;

    /// Delete a product and drop its id from any garment list. Returns whether a row was removed.
    async fn delete_product(&self, id: ProductId) -> Result<bool, AppError>;

    /// All garments, oldest first.
    async fn list_garments(&self) -> Result<Vec<Garment>, AppError>;

    async fn find_garment(&self, id: GarmentId) -> Result<Option<Garment>, AppError>;

    async fn insert_garment(&self, draft: GarmentDraft) -> Result<Garment, AppError>;

    /// Delete a garment together with every product it lists. Returns the deleted
    /// garment, or `None` when it did not exist.
    async fn delete_garment_cascade(&self, id: GarmentId) -> Result<Option<Garment>, AppError>;

    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;
}
