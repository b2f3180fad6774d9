use argon2::{self, Config, Variant, Version};
use lazy_static::lazy_static;
use tracing::{error, warn};

use crate::{Result, WishlistError};

#[cfg(not(test))]
lazy_static! {
    static ref CONFIG: Config<'static> = Config {
        variant: Variant::Argon2id,
        version: Version::Version13,
        mem_cost: 65536,
        time_cost: 3,
        lanes: 4,
        hash_length: 32,
        ..Config::default()
    };
}

#[cfg(test)]
lazy_static! {
    static ref CONFIG: Config<'static> = Config {
        variant: Variant::Argon2id,
        version: Version::Version13,
        mem_cost: 64,
        time_cost: 1,
        lanes: 1,
        hash_length: 32,
        ..Config::default()
    };
}

lazy_static! {
    /// Verified against when the email is unknown, so that path costs the same
    /// as a wrong password
    static ref DUMMY_HASH: Option<String> =
        argon2::hash_encoded(b"not-a-real-password", &[0u8; 16], &CONFIG).ok();
}

pub fn hash_password(password: &str) -> Result<String> {
    let salt: [u8; 16] = rand::random();
    argon2::hash_encoded(password.as_bytes(), &salt, &CONFIG).map_err(|e| {
        error!(err = ?e, "failed to hash password");
        WishlistError::UnexpectedError
    })
}

/// A stored hash that can't be parsed never matches
pub fn verify_password(password: &str, hashed_password: &str) -> bool {
    match argon2::verify_encoded(hashed_password, password.as_bytes()) {
        Ok(matches) => matches,
        Err(e) => {
            warn!(err = ?e, "stored password hash could not be parsed");
            false
        }
    }
}

/// Runs the verification on the blocking pool. With no stored hash the dummy
/// hash is checked instead and the result is always `false`
pub async fn check_password(password: String, hashed_password: Option<String>) -> Result<bool> {
    let matches = tokio::task::spawn_blocking(move || match hashed_password {
        Some(hash) => verify_password(&password, &hash),
        None => {
            if let Some(dummy) = DUMMY_HASH.as_deref() {
                verify_password(&password, dummy);
            }
            false
        }
    })
    .await?;
    Ok(matches)
}
