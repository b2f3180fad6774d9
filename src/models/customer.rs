use uuid::Uuid;

use crate::{
    models::{normalize_whitespace, Product},
    Result, WishlistError,
};

/// A customer profile.
///
/// `favorites` is never persisted with the record, it is only populated by
/// the enriched read in `FavoriteOrchestrator::enriched_customer`.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub favorites: Vec<Product>,
}

impl Customer {
    /// Builds a brand new customer with a time-ordered id
    pub fn new(name: &str, email: &str) -> Result<Self> {
        Self::with_id(&Uuid::now_v7().to_string(), name, email)
    }

    pub fn with_id(id: &str, name: &str, email: &str) -> Result<Self> {
        let customer = Self {
            id: id.to_string(),
            name: normalize_whitespace(name),
            email: email.trim().to_string(),
            favorites: Vec::new(),
        };
        customer.validate()?;
        Ok(customer)
    }

    fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(WishlistError::Validation("id cannot be empty".to_string()));
        }
        if self.name.is_empty() {
            return Err(WishlistError::Validation("name cannot be empty".to_string()));
        }
        if self.email.is_empty() {
            return Err(WishlistError::Validation("email cannot be empty".to_string()));
        }
        if !validator::validate_email(&self.email) {
            return Err(WishlistError::Validation("email is invalid".to_string()));
        }
        Ok(())
    }
}
