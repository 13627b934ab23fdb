//! Garment shop: a server-rendered inventory app for products grouped under garments.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod views;

pub use config::{AppConfig, StoreBackend};
pub use error::{AppError, ConfigError};
pub use routes::app;
pub use service::{GarmentService, ProductService};
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryStore, PgStore, Store};
