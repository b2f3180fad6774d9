use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};

use crate::{catalog::ProductCatalog, models::Product, Result, WishlistError};

/// Fixed set of products. Ids registered through `with_failing_ids` answer
/// with a `StoreFailure` instead of a product.
#[derive(Default)]
pub struct InMemoryCatalog {
    products: BTreeMap<i64, Product>,
    failing_ids: HashSet<i64>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
            failing_ids: HashSet::new(),
        }
    }

    pub fn with_failing_ids(mut self, ids: &[i64]) -> Self {
        self.failing_ids.extend(ids);
        self
    }
}

#[async_trait]
impl ProductCatalog for InMemoryCatalog {
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        if self.failing_ids.contains(&id) {
            return Err(WishlistError::StoreFailure(format!(
                "product {} could not be fetched",
                id
            )));
        }
        Ok(self.products.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Product>> {
        Ok(self.products.values().cloned().collect())
    }
}
