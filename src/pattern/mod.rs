//! The pattern catalog.

pub use catalog::{Catalog, CatalogEntry, TEMPLATES};
pub use template::Template;

pub mod symmetry;

mod catalog;
mod template;
