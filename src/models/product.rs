use crate::{Result, WishlistError};

/// Read-only reference data proxied from the remote catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub image_url: String,
    pub price: f64,
    pub rate: f64,
    pub rate_count: i64,
}

impl Product {
    pub fn new(
        id: i64,
        title: &str,
        image_url: &str,
        price: f64,
        rate: f64,
        rate_count: i64,
    ) -> Result<Self> {
        let product = Self {
            id,
            title: title.to_string(),
            image_url: image_url.to_string(),
            price,
            rate,
            rate_count,
        };
        product.validate()?;
        Ok(product)
    }

    fn validate(&self) -> Result<()> {
        if self.id <= 0 {
            return Err(WishlistError::Validation(
                "id must be greater than 0".to_string(),
            ));
        }
        if self.title.is_empty() {
            return Err(WishlistError::Validation("title cannot be empty".to_string()));
        }
        if self.image_url.is_empty() {
            return Err(WishlistError::Validation("image cannot be empty".to_string()));
        }
        if self.price <= 0.0 {
            return Err(WishlistError::Validation(
                "price must be greater than 0".to_string(),
            ));
        }
        // also rejects NaN
        if !(0.0..=5.0).contains(&self.rate) {
            return Err(WishlistError::Validation(
                "rate must be between 0 and 5".to_string(),
            ));
        }
        Ok(())
    }
}
