use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::future::{ready, Ready};
use std::ops::Deref;
use tracing::error;

use crate::{auth::SessionIssuer, WishlistError};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct AccessClaims {
    pub user_id: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub token_type: TokenType,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct RefreshClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub token_type: TokenType,
}

/// At the point where we have a `BearerToken` we aren't guaranteed that the
/// token is valid, only that the caller sent one in the `Bearer {token}`
/// format.
///
/// The wrapped String is just the token, the `Bearer ` prefix has been
/// stripped from it (see the `TryFrom` impl)
#[derive(Debug, Clone)]
pub struct BearerToken(String);

impl Deref for BearerToken {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<String> for BearerToken {
    type Error = WishlistError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let mut iter = s.split_whitespace();
        if let Some(prefix) = iter.next() {
            if prefix != "Bearer" {
                return Err(WishlistError::InvalidToken(
                    "Invalid token format, expected `Bearer {token}`".to_string(),
                ));
            }
        }
        match (iter.next(), iter.next()) {
            (Some(token), None) => Ok(Self(token.to_owned())),
            (Some(_), Some(_)) => Err(WishlistError::InvalidToken(
                "Invalid token format, expected `Bearer {token}`".to_string(),
            )),
            _ => Err(WishlistError::InvalidToken("No token was found".to_string())),
        }
    }
}

/// The caller behind a verified access token.
///
/// Only constructable from verified claims, handlers that take it as an
/// argument never run for unauthenticated requests.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
}

impl From<AccessClaims> for AuthenticatedUser {
    fn from(claims: AccessClaims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = WishlistError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate_request(req))
    }
}

fn authenticate_request(req: &HttpRequest) -> Result<AuthenticatedUser, WishlistError> {
    let session = req.app_data::<web::Data<SessionIssuer>>().ok_or_else(|| {
        error!("session issuer was not registered as app data");
        WishlistError::UnexpectedError
    })?;
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| WishlistError::InvalidToken("No token was found".to_string()))?
        .to_str()
        .map_err(|_| {
            WishlistError::InvalidToken("Authorization header is not valid text".to_string())
        })?;
    let token = BearerToken::try_from(header.to_string())?;
    session.verify_bearer_token(&token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{auth::TokenKeys, database::InMemoryUsers};
    use actix_web::test::TestRequest;
    use claim::assert_err;
    use std::sync::Arc;

    fn keys() -> TokenKeys {
        TokenKeys::from_secret(b"test-secret", "wishlist")
    }

    fn session() -> web::Data<SessionIssuer> {
        web::Data::new(SessionIssuer::new(Arc::new(InMemoryUsers::new()), keys()))
    }

    #[test]
    fn strips_the_bearer_prefix() {
        let token = BearerToken::try_from("Bearer abc.def.ghi".to_string()).unwrap();
        assert_eq!(token.as_str(), "abc.def.ghi");
    }

    #[test]
    fn rejects_a_malformed_bearer_token() {
        let result = BearerToken::try_from("Berer abc.def.ghi".to_string());
        assert_eq!(
            result.unwrap_err(),
            WishlistError::InvalidToken(
                "Invalid token format, expected `Bearer {token}`".to_string()
            )
        );
    }

    #[test]
    fn rejects_when_no_token_is_provided() {
        let result = BearerToken::try_from("Bearer ".to_string());
        assert_eq!(
            result.unwrap_err(),
            WishlistError::InvalidToken("No token was found".to_string())
        );
        assert_err!(BearerToken::try_from(String::new()));
    }

    #[test]
    fn rejects_trailing_segments() {
        assert_err!(BearerToken::try_from("Bearer abc def".to_string()));
    }

    #[test]
    fn token_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TokenType::Refresh).unwrap(),
            "\"refresh\""
        );
    }

    #[actix_rt::test]
    async fn extractor_accepts_a_valid_access_token() {
        let keys = keys();
        let token = keys.issue_access_token("u1", "a@b.com").unwrap();
        let req = TestRequest::default()
            .app_data(session())
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_http_request();
        let user = AuthenticatedUser::extract(&req).await.unwrap();
        assert_eq!(
            user,
            AuthenticatedUser {
                user_id: "u1".to_string(),
                email: "a@b.com".to_string(),
            }
        );
    }

    #[actix_rt::test]
    async fn extractor_rejects_missing_header() {
        let req = TestRequest::default()
            .app_data(session())
            .to_http_request();
        let err = AuthenticatedUser::extract(&req).await.unwrap_err();
        assert_eq!(
            err,
            WishlistError::InvalidToken("No token was found".to_string())
        );
    }

    #[actix_rt::test]
    async fn extractor_rejects_a_refresh_token() {
        let keys = keys();
        let token = keys.issue_refresh_token("u1").unwrap();
        let req = TestRequest::default()
            .app_data(session())
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_http_request();
        assert_err!(AuthenticatedUser::extract(&req).await);
    }
}
