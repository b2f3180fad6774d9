use std::sync::Arc;
use tracing::info;

use crate::{
    auth::{check_password, TokenKeys, ACCESS_TOKEN_DURATION_SECONDS},
    database::CredentialRepository,
    models::{AccessTokenGrant, AuthenticatedUser, LoginTokens},
    Result, WishlistError,
};

/// Mints and refreshes tokens for identities in the credential store.
///
/// It never writes, so a single instance is shared across every request
#[derive(Clone)]
pub struct SessionIssuer {
    credentials: Arc<dyn CredentialRepository>,
    keys: TokenKeys,
}

impl SessionIssuer {
    pub fn new(credentials: Arc<dyn CredentialRepository>, keys: TokenKeys) -> Self {
        Self { credentials, keys }
    }

    /// An unknown email and a wrong password are indistinguishable to the
    /// caller, both answer `InvalidCredentials`
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginTokens> {
        let identity = self.credentials.find_by_email(email).await?;
        let stored_hash = identity.as_ref().map(|i| i.password_hash().to_string());
        let matches = check_password(password.to_string(), stored_hash).await?;

        let identity = match identity {
            Some(identity) if matches => identity,
            _ => {
                info!("login rejected");
                return Err(WishlistError::InvalidCredentials);
            }
        };

        let access_token = self
            .keys
            .issue_access_token(&identity.id, &identity.email)?;
        let refresh_token = self.keys.issue_refresh_token(&identity.id)?;
        info!(user_id = %identity.id, "issued new session tokens");
        Ok(LoginTokens {
            access_token,
            refresh_token,
            expires_in: ACCESS_TOKEN_DURATION_SECONDS,
        })
    }

    #[tracing::instrument(skip(self, refresh_token))]
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<AccessTokenGrant> {
        let claims = self.keys.decode_refresh_token(refresh_token)?;
        if claims.sub.trim().is_empty() {
            return Err(WishlistError::InvalidRefreshToken);
        }

        let identity = self
            .credentials
            .find_by_id(&claims.sub)
            .await?
            .ok_or(WishlistError::UserNotFound)?;

        let access_token = self
            .keys
            .issue_access_token(&identity.id, &identity.email)?;
        Ok(AccessTokenGrant {
            access_token,
            expires_in: ACCESS_TOKEN_DURATION_SECONDS,
        })
    }

    /// Pure signature and claim checks, the credential store isn't consulted
    pub fn verify_bearer_token(&self, token: &str) -> Result<AuthenticatedUser> {
        self.keys.decode_access_token(token).map(AuthenticatedUser::from)
    }
}
