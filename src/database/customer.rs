use async_trait::async_trait;
use sqlx::{query, query_as, FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use crate::{
    database::{lookup_id, storage_id, violates, UNIQUE_VIOLATION},
    models::Customer,
    Result, WishlistError,
};

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Customer>>;
    /// Fails with `DuplicateEmail` when the email is taken
    async fn insert(&self, customer: &Customer) -> Result<()>;
    async fn update(&self, customer: &Customer) -> Result<()>;
    /// Also drops the customer's favorites
    async fn delete(&self, id: &str) -> Result<()>;
}

pub struct CustomerDatabase {
    pool: PgPool,
}

impl CustomerDatabase {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CustomerRow {
    id: Uuid,
    name: String,
    email: String,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = WishlistError;

    fn try_from(row: CustomerRow) -> Result<Self> {
        Customer::with_id(&row.id.to_string(), &row.name, &row.email).map_err(|e| {
            error!(err = ?e, id = %row.id, "stored customer failed validation");
            WishlistError::StoreFailure(e.to_string())
        })
    }
}

fn map_write_error(e: sqlx::Error) -> WishlistError {
    if violates(&e, UNIQUE_VIOLATION) {
        return WishlistError::DuplicateEmail;
    }
    WishlistError::from(e)
}

#[async_trait]
impl CustomerRepository for CustomerDatabase {
    #[tracing::instrument(skip(self), fields(repository = "customer"))]
    async fn find_by_id(&self, id: &str) -> Result<Option<Customer>> {
        let id = match lookup_id(id) {
            Some(id) => id,
            None => return Ok(None),
        };
        let row = query_as::<_, CustomerRow>(
            r#"
            SELECT id, name, email FROM customers WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Customer::try_from).transpose()
    }

    #[tracing::instrument(skip(self, customer), fields(repository = "customer", id = %customer.id))]
    async fn insert(&self, customer: &Customer) -> Result<()> {
        query(
            r#"
            INSERT INTO customers (id, name, email)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(storage_id(&customer.id)?)
        .bind(&customer.name)
        .bind(&customer.email)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;
        Ok(())
    }

    #[tracing::instrument(skip(self, customer), fields(repository = "customer", id = %customer.id))]
    async fn update(&self, customer: &Customer) -> Result<()> {
        let result = query(
            r#"
            UPDATE customers
            SET name = $2, email = $3, last_modified = NOW()
            WHERE id = $1
            "#,
        )
        .bind(storage_id(&customer.id)?)
        .bind(&customer.name)
        .bind(&customer.email)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;
        if result.rows_affected() == 0 {
            return Err(WishlistError::CustomerNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(repository = "customer"))]
    async fn delete(&self, id: &str) -> Result<()> {
        let id = match lookup_id(id) {
            Some(id) => id,
            None => return Ok(()),
        };
        // favorites go with it through ON DELETE CASCADE
        query(
            r#"
            DELETE FROM customers WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
