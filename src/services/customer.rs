use std::sync::Arc;
use tracing::info;

use crate::{database::CustomerRepository, models::Customer, Result, WishlistError};

#[derive(Clone)]
pub struct CustomerService {
    customers: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(customers: Arc<dyn CustomerRepository>) -> Self {
        Self { customers }
    }

    #[tracing::instrument(skip(self))]
    pub async fn create(&self, name: &str, email: &str) -> Result<Customer> {
        let customer = Customer::new(name, email)?;
        self.customers.insert(&customer).await?;
        info!(customer_id = %customer.id, "customer created");
        Ok(customer)
    }

    #[tracing::instrument(skip(self))]
    pub async fn edit(&self, id: &str, name: &str, email: &str) -> Result<Customer> {
        if self.customers.find_by_id(id).await?.is_none() {
            return Err(WishlistError::CustomerNotFound);
        }
        let customer = Customer::with_id(id, name, email)?;
        self.customers.update(&customer).await?;
        Ok(customer)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        if self.customers.find_by_id(id).await?.is_none() {
            return Err(WishlistError::CustomerNotFound);
        }
        self.customers.delete(id).await?;
        info!(customer_id = %id, "customer deleted");
        Ok(())
    }
}
