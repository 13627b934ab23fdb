//! In-process store. Used for local runs without PostgreSQL and by the test suite.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::Store;
use crate::error::AppError;
use crate::model::{Garment, GarmentDraft, GarmentId, Product, ProductDraft, ProductId};

#[derive(Default)]
struct Collections {
    products: Vec<Product>,
    garments: Vec<Garment>,
}

/// Both collections behind a single lock, so compound writes are atomic.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_products(&self, category: Option<&str>) -> Result<Vec<Product>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .products
            .iter()
            .filter(|p| category.map_or(true, |c| p.category.as_str() == c))
            .cloned()
            .collect())
    }

    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.products.iter().find(|p| p.id == id).cloned())
    }

    async fn find_products(&self, ids: &[ProductId]) -> Result<Vec<Product>, AppError> {
        let inner = self.inner.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| inner.products.iter().find(|p| p.id == *id).cloned())
            .collect())
    }

    async fn insert_product(&self, draft: ProductDraft) -> Result<Product, AppError> {
        let product = draft.into_product(None);
        self.inner.write().await.products.push(product.clone());
        Ok(product)
    }

    async fn insert_product_for_garment(
        &self,
        garment_id: GarmentId,
        draft: ProductDraft,
    ) -> Result<Option<Product>, AppError> {
        let mut inner = self.inner.write().await;
        let Some(garment) = inner.garments.iter_mut().find(|g| g.id == garment_id) else {
            return Ok(None);
        };
        let product = draft.into_product(Some(garment_id));
        garment.products.push(product.id);
        inner.products.push(product.clone());
        Ok(Some(product))
    }

    async fn update_product(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<Option<Product>, AppError> {
        let mut inner = self.inner.write().await;
        Ok(inner.products.iter_mut().find(|p| p.id == id).map(|p| {
            draft.apply_to(p);
            p.clone()
        }))
    }

    async fn delete_product(&self, id: ProductId) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;
        let before = inner.products.len();
        inner.products.retain(|p| p.id != id);
        for garment in &mut inner.garments {
            garment.products.retain(|p| *p != id);
        }
        Ok(inner.products.len() != before)
    }

    async fn list_garments(&self) -> Result<Vec<Garment>, AppError> {
        Ok(self.inner.read().await.garments.clone())
    }

    async fn find_garment(&self, id: GarmentId) -> Result<Option<Garment>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.garments.iter().find(|g| g.id == id).cloned())
    }

    async fn insert_garment(&self, draft: GarmentDraft) -> Result<Garment, AppError> {
        let garment = draft.into_garment();
        self.inner.write().await.garments.push(garment.clone());
        Ok(garment)
    }

    async fn delete_garment_cascade(&self, id: GarmentId) -> Result<Option<Garment>, AppError> {
        let mut inner = self.inner.write().await;
        let Some(pos) = inner.garments.iter().position(|g| g.id == id) else {
            return Ok(None);
        };
        let garment = inner.garments.remove(pos);
        inner.products.retain(|p| !garment.products.contains(&p.id));
        Ok(Some(garment))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Size};

    fn draft(name: &str, category: Category) -> ProductDraft {
        ProductDraft {
            name: name.into(),
            brand: "Acme".into(),
            price: 10.0,
            color: "black".into(),
            size: Size::S,
            category,
            description: None,
        }
    }

    fn garment() -> GarmentDraft {
        GarmentDraft {
            name: "Atelier".into(),
            location: None,
            contact: 1.0,
        }
    }

    #[tokio::test]
    async fn filters_by_category() {
        let store = MemoryStore::new();
        store.insert_product(draft("tee", Category::Shirt)).await.unwrap();
        store.insert_product(draft("chino", Category::Pants)).await.unwrap();

        let shirts = store.list_products(Some("shirt")).await.unwrap();
        assert_eq!(shirts.len(), 1);
        assert_eq!(shirts[0].name, "tee");
        assert!(store.list_products(Some("dress")).await.unwrap().is_empty());
        assert_eq!(store.list_products(None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn nested_insert_requires_existing_garment() {
        let store = MemoryStore::new();
        let missing = GarmentId::generate();
        let res = store
            .insert_product_for_garment(missing, draft("tee", Category::Shirt))
            .await
            .unwrap();
        assert!(res.is_none());
        assert!(store.list_products(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn cascade_removes_only_owned_products() {
        let store = MemoryStore::new();
        let g = store.insert_garment(garment()).await.unwrap();
        let owned = store
            .insert_product_for_garment(g.id, draft("tee", Category::Shirt))
            .await
            .unwrap()
            .unwrap();
        let loose = store.insert_product(draft("scarf", Category::Accessories)).await.unwrap();

        let deleted = store.delete_garment_cascade(g.id).await.unwrap().unwrap();
        assert_eq!(deleted.products, vec![owned.id]);
        assert!(store.find_product(owned.id).await.unwrap().is_none());
        assert!(store.find_product(loose.id).await.unwrap().is_some());
        assert!(store.find_garment(g.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deleting_a_product_unlinks_it() {
        let store = MemoryStore::new();
        let g = store.insert_garment(garment()).await.unwrap();
        let p = store
            .insert_product_for_garment(g.id, draft("tee", Category::Shirt))
            .await
            .unwrap()
            .unwrap();

        assert!(store.delete_product(p.id).await.unwrap());
        assert!(!store.delete_product(p.id).await.unwrap());
        assert!(store.find_garment(g.id).await.unwrap().unwrap().products.is_empty());
    }
}
