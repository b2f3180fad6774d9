mod fakestore;
mod in_memory;

pub use fakestore::FakeStoreCatalog;
pub use in_memory::InMemoryCatalog;

use async_trait::async_trait;

use crate::{models::Product, Result};

/// Read-only access to the remote product catalog
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// `Ok(None)` when the catalog doesn't know the id
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>>;
    async fn find_all(&self) -> Result<Vec<Product>>;
}
