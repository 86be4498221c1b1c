pub mod catalog;
pub mod postgres;

pub use catalog::{CatalogSource, InMemoryCatalog, PostgresCatalog};
pub use postgres::create_pool;
