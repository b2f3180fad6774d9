use async_trait::async_trait;
use sqlx::{query, query_as, FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use crate::{
    database::{lookup_id, storage_id, violates, UNIQUE_VIOLATION},
    models::Identity,
    Result, WishlistError,
};

/// Read side used by the session flows, `insert` only exists for provisioning
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>>;
    async fn insert(&self, identity: &Identity) -> Result<()>;
}

pub struct UserDatabase {
    pool: PgPool,
}

impl UserDatabase {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
}

impl TryFrom<UserRow> for Identity {
    type Error = WishlistError;

    fn try_from(row: UserRow) -> Result<Self> {
        Identity::with_id(&row.id.to_string(), &row.name, &row.email, &row.password_hash).map_err(
            |e| {
                error!(err = ?e, id = %row.id, "stored identity failed validation");
                WishlistError::StoreFailure(e.to_string())
            },
        )
    }
}

#[async_trait]
impl CredentialRepository for UserDatabase {
    #[tracing::instrument(skip(self), fields(repository = "user"))]
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>> {
        let row = query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash FROM users WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Identity::try_from).transpose()
    }

    #[tracing::instrument(skip(self), fields(repository = "user"))]
    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>> {
        let id = match lookup_id(id) {
            Some(id) => id,
            None => return Ok(None),
        };
        let row = query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash FROM users WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Identity::try_from).transpose()
    }

    #[tracing::instrument(skip(self, identity), fields(repository = "user", id = %identity.id))]
    async fn insert(&self, identity: &Identity) -> Result<()> {
        query(
            r#"
            INSERT INTO users (id, name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(storage_id(&identity.id)?)
        .bind(&identity.name)
        .bind(&identity.email)
        .bind(identity.password_hash())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, UNIQUE_VIOLATION) {
                return WishlistError::DuplicateEmail;
            }
            WishlistError::from(e)
        })?;
        Ok(())
    }
}
