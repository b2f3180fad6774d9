use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::ExposeSecret;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{error, info};

use crate::{
    auth::{ACCESS_TOKEN_DURATION_SECONDS, REFRESH_TOKEN_DURATION_SECONDS},
    configuration::AuthSettings,
    models::{AccessClaims, RefreshClaims, TokenType},
    Result, WishlistError,
};

/// HMAC keys plus the issuer every token is stamped with.
///
/// Held once for the lifetime of the server and shared read-only
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
}

impl TokenKeys {
    pub fn new(settings: &AuthSettings) -> Self {
        Self::from_secret(
            settings.jwt_secret.expose_secret().as_bytes(),
            &settings.issuer,
        )
    }

    pub fn from_secret(secret: &[u8], issuer: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            issuer: issuer.to_string(),
        }
    }

    #[tracing::instrument(skip(self, email))]
    pub fn issue_access_token(&self, user_id: &str, email: &str) -> Result<String> {
        let iat = Utc::now().timestamp();
        let claims = AccessClaims {
            user_id: user_id.to_string(),
            email: email.to_string(),
            iat,
            exp: iat + ACCESS_TOKEN_DURATION_SECONDS,
            iss: self.issuer.clone(),
            token_type: TokenType::Access,
        };
        self.encode(&claims)
    }

    #[tracing::instrument(skip(self))]
    pub fn issue_refresh_token(&self, user_id: &str) -> Result<String> {
        let iat = Utc::now().timestamp();
        let claims = RefreshClaims {
            sub: user_id.to_string(),
            iat,
            exp: iat + REFRESH_TOKEN_DURATION_SECONDS,
            iss: self.issuer.clone(),
            token_type: TokenType::Refresh,
        };
        self.encode(&claims)
    }

    #[tracing::instrument(skip(self, token))]
    pub fn decode_access_token(&self, token: &str) -> Result<AccessClaims> {
        let claims = self.decode::<AccessClaims>(token).map_err(|e| {
            info!(err = ?e, "rejected access token");
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    WishlistError::InvalidToken("Token has expired".to_string())
                }
                _ => WishlistError::InvalidToken(
                    "Token did not match what was expected".to_string(),
                ),
            }
        })?;
        if claims.token_type != TokenType::Access {
            info!(token_type = ?claims.token_type, "expected an access token");
            return Err(WishlistError::InvalidToken(
                "Token did not match what was expected".to_string(),
            ));
        }
        Ok(claims)
    }

    #[tracing::instrument(skip(self, token))]
    pub fn decode_refresh_token(&self, token: &str) -> Result<RefreshClaims> {
        let claims = self.decode::<RefreshClaims>(token).map_err(|e| {
            info!(err = ?e, "rejected refresh token");
            WishlistError::InvalidRefreshToken
        })?;
        if claims.token_type != TokenType::Refresh {
            info!(token_type = ?claims.token_type, "expected a refresh token");
            return Err(WishlistError::InvalidRefreshToken);
        }
        Ok(claims)
    }

    pub(crate) fn encode<C: Serialize>(&self, claims: &C) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding).map_err(|e| {
            error!(err = ?e, "failed to encode json web token");
            WishlistError::UnexpectedError
        })
    }

    fn decode<C: DeserializeOwned>(
        &self,
        token: &str,
    ) -> std::result::Result<C, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iss"]);
        decode::<C>(token, &self.decoding, &validation).map(|data| data.claims)
    }
}
