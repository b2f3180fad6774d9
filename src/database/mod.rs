mod customer;
mod favorite;
mod in_memory;
mod user;

pub use customer::{CustomerDatabase, CustomerRepository};
pub use favorite::{FavoriteDatabase, FavoriteRepository};
pub use in_memory::{InMemoryCustomers, InMemoryFavorites, InMemoryUsers};
pub use user::{CredentialRepository, UserDatabase};

use uuid::Uuid;

use crate::{Result, WishlistError};

/// Ids are opaque strings in the domain and UUIDs in PostgreSQL. A string that
/// isn't a UUID can never match a stored row.
fn lookup_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}

fn storage_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| WishlistError::Validation("id is invalid".to_string()))
}

fn violates(e: &sqlx::Error, code: &str) -> bool {
    match e {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(code),
        _ => false,
    }
}

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
