//! Request extractors.

pub mod flash;

pub use flash::{Flash, Notice};
