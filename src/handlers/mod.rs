//! HTTP handlers for the product and garment pages.

pub mod garments;
pub mod products;
