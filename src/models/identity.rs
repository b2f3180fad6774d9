use uuid::Uuid;

use crate::{models::normalize_whitespace, Result, WishlistError};

/// The authentication record behind a login.
///
/// Kept apart from `Customer`, the credential store owns it and the session
/// flows only ever read it.
#[derive(Clone, PartialEq)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
    pub(crate) password_hash: String,
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl Identity {
    pub fn new(name: &str, email: &str, password_hash: &str) -> Result<Self> {
        Self::with_id(&Uuid::now_v7().to_string(), name, email, password_hash)
    }

    pub fn with_id(id: &str, name: &str, email: &str, password_hash: &str) -> Result<Self> {
        let identity = Self {
            id: id.to_string(),
            name: normalize_whitespace(name),
            email: email.trim().to_string(),
            password_hash: password_hash.to_string(),
        };
        identity.validate()?;
        Ok(identity)
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
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
        if self.password_hash.is_empty() {
            return Err(WishlistError::Validation(
                "password cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
