//! In-process stores backing the tests and local runs without PostgreSQL.
//!
//! Each one can be built `unavailable()`, in which case every call answers
//! with a `StoreFailure`.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    database::{CredentialRepository, CustomerRepository, FavoriteRepository},
    models::{Customer, Identity},
    Result, WishlistError,
};

fn unavailable() -> WishlistError {
    WishlistError::StoreFailure("store is unavailable".to_string())
}

#[derive(Default)]
pub struct InMemoryUsers {
    users: RwLock<HashMap<String, Identity>>,
    failing: bool,
}

impl InMemoryUsers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub async fn remove(&self, id: &str) {
        self.users.write().await.remove(id);
    }
}

#[async_trait]
impl CredentialRepository for InMemoryUsers {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>> {
        if self.failing {
            return Err(unavailable());
        }
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>> {
        if self.failing {
            return Err(unavailable());
        }
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn insert(&self, identity: &Identity) -> Result<()> {
        if self.failing {
            return Err(unavailable());
        }
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == identity.email) {
            return Err(WishlistError::DuplicateEmail);
        }
        users.insert(identity.id.clone(), identity.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryFavorites {
    favorites: RwLock<HashMap<String, Vec<i64>>>,
    failing: bool,
}

impl InMemoryFavorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    async fn forget_customer(&self, customer_id: &str) {
        self.favorites.write().await.remove(customer_id);
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryFavorites {
    async fn list_product_ids(&self, customer_id: &str) -> Result<Vec<i64>> {
        if self.failing {
            return Err(unavailable());
        }
        let favorites = self.favorites.read().await;
        Ok(favorites.get(customer_id).cloned().unwrap_or_default())
    }

    async fn insert(&self, customer_id: &str, product_id: i64) -> Result<()> {
        if self.failing {
            return Err(unavailable());
        }
        // check and insert under the same write guard
        let mut favorites = self.favorites.write().await;
        let products = favorites.entry(customer_id.to_string()).or_default();
        if products.contains(&product_id) {
            return Err(WishlistError::DuplicateFavorite);
        }
        products.push(product_id);
        Ok(())
    }

    async fn delete(&self, customer_id: &str, product_id: i64) -> Result<()> {
        if self.failing {
            return Err(unavailable());
        }
        if let Some(products) = self.favorites.write().await.get_mut(customer_id) {
            products.retain(|id| *id != product_id);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCustomers {
    customers: RwLock<HashMap<String, Customer>>,
    favorites: Option<Arc<InMemoryFavorites>>,
    failing: bool,
}

impl InMemoryCustomers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Deleting a customer will also drop their entries in `favorites`
    pub fn cascading_to(favorites: Arc<InMemoryFavorites>) -> Self {
        Self {
            favorites: Some(favorites),
            ..Self::default()
        }
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomers {
    async fn find_by_id(&self, id: &str) -> Result<Option<Customer>> {
        if self.failing {
            return Err(unavailable());
        }
        Ok(self.customers.read().await.get(id).cloned())
    }

    async fn insert(&self, customer: &Customer) -> Result<()> {
        if self.failing {
            return Err(unavailable());
        }
        let mut customers = self.customers.write().await;
        if customers.values().any(|c| c.email == customer.email) {
            return Err(WishlistError::DuplicateEmail);
        }
        let mut stored = customer.clone();
        stored.favorites.clear();
        customers.insert(stored.id.clone(), stored);
        Ok(())
    }

    async fn update(&self, customer: &Customer) -> Result<()> {
        if self.failing {
            return Err(unavailable());
        }
        let mut customers = self.customers.write().await;
        if customers
            .values()
            .any(|c| c.email == customer.email && c.id != customer.id)
        {
            return Err(WishlistError::DuplicateEmail);
        }
        match customers.get_mut(&customer.id) {
            Some(stored) => {
                stored.name = customer.name.clone();
                stored.email = customer.email.clone();
                Ok(())
            }
            None => Err(WishlistError::CustomerNotFound),
        }
    }

    async fn delete(&self, id: &str) -> Result<()> {
        if self.failing {
            return Err(unavailable());
        }
        self.customers.write().await.remove(id);
        if let Some(favorites) = &self.favorites {
            favorites.forget_customer(id).await;
        }
        Ok(())
    }
}
