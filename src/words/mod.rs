pub mod catalog;
pub mod loader;

pub use catalog::{draw_word, WordCatalog, WordEntry};
pub use loader::{CatalogLoader, CatalogMetadata};
