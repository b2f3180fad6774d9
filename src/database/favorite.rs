use async_trait::async_trait;
use sqlx::{query, query_scalar, PgPool};

use crate::{
    database::{lookup_id, storage_id, violates, FOREIGN_KEY_VIOLATION, UNIQUE_VIOLATION},
    Result, WishlistError,
};

/// `(customer_id, product_id)` pairs. The store itself owns uniqueness
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Product ids in the order they were added
    async fn list_product_ids(&self, customer_id: &str) -> Result<Vec<i64>>;
    /// Fails with `DuplicateFavorite` when the pair is already stored
    async fn insert(&self, customer_id: &str, product_id: i64) -> Result<()>;
    /// Deleting an absent pair is not an error
    async fn delete(&self, customer_id: &str, product_id: i64) -> Result<()>;
}

pub struct FavoriteDatabase {
    pool: PgPool,
}

impl FavoriteDatabase {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoriteRepository for FavoriteDatabase {
    #[tracing::instrument(skip(self), fields(repository = "favorite"))]
    async fn list_product_ids(&self, customer_id: &str) -> Result<Vec<i64>> {
        let customer_id = match lookup_id(customer_id) {
            Some(id) => id,
            None => return Ok(Vec::new()),
        };
        let ids = query_scalar::<_, i64>(
            r#"
            SELECT product_id FROM favorites
            WHERE customer_id = $1
            ORDER BY created_at, product_id
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    #[tracing::instrument(skip(self), fields(repository = "favorite"))]
    async fn insert(&self, customer_id: &str, product_id: i64) -> Result<()> {
        query(
            r#"
            INSERT INTO favorites (customer_id, product_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(storage_id(customer_id)?)
        .bind(product_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, UNIQUE_VIOLATION) {
                return WishlistError::DuplicateFavorite;
            }
            // the customer was removed after it was checked
            if violates(&e, FOREIGN_KEY_VIOLATION) {
                return WishlistError::CustomerNotFound;
            }
            WishlistError::from(e)
        })?;
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(repository = "favorite"))]
    async fn delete(&self, customer_id: &str, product_id: i64) -> Result<()> {
        let customer_id = match lookup_id(customer_id) {
            Some(id) => id,
            None => return Ok(()),
        };
        query(
            r#"
            DELETE FROM favorites WHERE customer_id = $1 AND product_id = $2
            "#,
        )
        .bind(customer_id)
        .bind(product_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
