//! One-shot notices carried in the redirect URL (`?flash=product_created`).

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

/// Query parameter that carries the notice key.
pub const FLASH_PARAM: &str = "flash";

/// The fixed set of notices a redirect can announce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    ProductCreated,
    ProductUpdated,
    ProductDeleted,
    GarmentCreated,
    GarmentDeleted,
}

impl Notice {
    pub const fn key(self) -> &'static str {
        match self {
            Notice::ProductCreated => "product_created",
            Notice::ProductUpdated => "product_updated",
            Notice::ProductDeleted => "product_deleted",
            Notice::GarmentCreated => "garment_created",
            Notice::GarmentDeleted => "garment_deleted",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Notice::ProductCreated => "Product created",
            Notice::ProductUpdated => "Product updated",
            Notice::ProductDeleted => "Product deleted",
            Notice::GarmentCreated => "Garment created",
            Notice::GarmentDeleted => "Garment and its products deleted",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        [
            Notice::ProductCreated,
            Notice::ProductUpdated,
            Notice::ProductDeleted,
            Notice::GarmentCreated,
            Notice::GarmentDeleted,
        ]
        .into_iter()
        .find(|n| n.key() == key)
    }

    /// `path` with this notice appended as the flash parameter.
    pub fn attach(self, path: &str) -> String {
        format!("{}?{}={}", path, FLASH_PARAM, self.key())
    }
}

#[derive(Debug, Deserialize)]
struct FlashQuery {
    flash: Option<String>,
}

/// Extractor for the optional notice on this request. Unknown keys are ignored.
#[derive(Clone, Debug, Default)]
pub struct Flash(pub Option<Notice>);

impl Flash {
    pub fn message(&self) -> Option<&'static str> {
        self.0.map(Notice::message)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Flash
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let notice = Query::<FlashQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(q)| q.flash)
            .and_then(|key| Notice::from_key(&key));
        Ok(Flash(notice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(uri: &str) -> Flash {
        let (mut parts, ()) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        Flash::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn reads_known_keys() {
        let flash = extract("/products/1?flash=product_created").await;
        assert_eq!(flash.0, Some(Notice::ProductCreated));
        assert_eq!(flash.message(), Some("Product created"));
    }

    #[tokio::test]
    async fn ignores_unknown_or_missing_keys() {
        assert_eq!(extract("/products?flash=%3Cscript%3E").await.0, None);
        assert_eq!(extract("/products?flash=bogus").await.0, None);
        assert_eq!(extract("/products?category=shirt").await.0, None);
        assert_eq!(extract("/products").await.0, None);
    }

    #[tokio::test]
    async fn decodes_percent_encoded_keys() {
        let flash = extract("/products/1?category=shirt&flash=product%5Fcreated").await;
        assert_eq!(flash.0, Some(Notice::ProductCreated));
    }

    #[test]
    fn attaches_to_path() {
        assert_eq!(Notice::GarmentDeleted.attach("/garments"), "/garments?flash=garment_deleted");
    }
}
