//! Services between the handlers and the store.

mod garments;
mod products;
mod validation;
pub use garments::{GarmentService, GarmentWithProducts};
pub use products::{ProductService, ProductWithGarment};
pub use validation::RequestValidator;
