//! Garments: named groups that own an ordered list of product references.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{GarmentId, ProductId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Garment {
    pub id: GarmentId,
    pub name: String,
    pub location: Option<String>,
    pub contact: f64,
    /// Owned products, in the order they were added.
    pub products: Vec<ProductId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GarmentDraft {
    pub name: String,
    pub location: Option<String>,
    pub contact: f64,
}

impl GarmentDraft {
    pub fn into_garment(self) -> Garment {
        Garment {
            id: GarmentId::generate(),
            name: self.name,
            location: self.location,
            contact: self.contact,
            products: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GarmentForm {
    pub name: Option<String>,
    pub location: Option<String>,
    pub contact: Option<String>,
}
