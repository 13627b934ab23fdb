//! Domain records: products, garments and their typed ids.

mod garment;
mod id;
mod product;

pub use garment::{Garment, GarmentDraft, GarmentForm};
pub use id::{CastError, GarmentId, ProductId};
pub use product::{Category, Product, ProductDraft, ProductForm, Size};
