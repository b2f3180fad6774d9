use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    catalog::ProductCatalog,
    database::{CustomerRepository, FavoriteRepository},
    models::Customer,
    Result, WishlistError,
};

/// Owns the rules around favorites: both sides of the pair must exist and a
/// pair is stored at most once.
#[derive(Clone)]
pub struct FavoriteOrchestrator {
    customers: Arc<dyn CustomerRepository>,
    favorites: Arc<dyn FavoriteRepository>,
    catalog: Arc<dyn ProductCatalog>,
}

impl FavoriteOrchestrator {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        favorites: Arc<dyn FavoriteRepository>,
        catalog: Arc<dyn ProductCatalog>,
    ) -> Self {
        Self {
            customers,
            favorites,
            catalog,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn add_favorite(&self, customer_id: &str, product_id: i64) -> Result<()> {
        self.ensure_pair_exists(customer_id, product_id).await?;
        self.favorites.insert(customer_id, product_id).await?;
        info!("favorite added");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove_favorite(&self, customer_id: &str, product_id: i64) -> Result<()> {
        self.ensure_pair_exists(customer_id, product_id).await?;
        self.favorites.delete(customer_id, product_id).await?;
        info!("favorite removed");
        Ok(())
    }

    /// The customer with their favorites resolved against the catalog.
    ///
    /// Favorites the catalog can't produce right now are left out rather than
    /// failing the whole read.
    #[tracing::instrument(skip(self))]
    pub async fn enriched_customer(&self, customer_id: &str) -> Result<Option<Customer>> {
        let mut customer = match self.customers.find_by_id(customer_id).await? {
            Some(customer) => customer,
            None => return Ok(None),
        };

        let product_ids = self.favorites.list_product_ids(customer_id).await?;
        let mut favorites = Vec::with_capacity(product_ids.len());
        for product_id in product_ids {
            match self.catalog.find_by_id(product_id).await {
                Ok(Some(product)) => favorites.push(product),
                Ok(None) => warn!(product_id, "favorite product no longer in catalog, skipping"),
                Err(e) => warn!(product_id, err = ?e, "failed to fetch favorite product, skipping"),
            }
        }
        customer.favorites = favorites;
        Ok(Some(customer))
    }

    async fn ensure_pair_exists(&self, customer_id: &str, product_id: i64) -> Result<()> {
        if self.customers.find_by_id(customer_id).await?.is_none() {
            return Err(WishlistError::CustomerNotFound);
        }
        if self.catalog.find_by_id(product_id).await?.is_none() {
            return Err(WishlistError::ProductNotFound);
        }
        Ok(())
    }
}
