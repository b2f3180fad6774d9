use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

pub type Result<T, E = WishlistError> = std::result::Result<T, E>;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum WishlistError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid refresh token")]
    InvalidRefreshToken,

    #[error("user not found")]
    UserNotFound,

    #[error("{0}")]
    InvalidToken(String),

    #[error("customer not found")]
    CustomerNotFound,

    #[error("product not found")]
    ProductNotFound,

    #[error("product already in favorites")]
    DuplicateFavorite,

    #[error("customer with this email already exists")]
    DuplicateEmail,

    #[error("{0}")]
    Validation(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("store failure: {0}")]
    StoreFailure(String),

    #[error("request timed out")]
    Timeout,

    #[error("Unexpected error occurred")]
    UnexpectedError,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for WishlistError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials
            | Self::InvalidRefreshToken
            | Self::UserNotFound
            | Self::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            Self::CustomerNotFound | Self::ProductNotFound => StatusCode::NOT_FOUND,
            Self::DuplicateFavorite
            | Self::DuplicateEmail
            | Self::Validation(_)
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::StoreFailure(_) | Self::UnexpectedError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Collaborator failures are opaque to the caller
        let message = match self {
            Self::StoreFailure(_) | Self::UnexpectedError => "internal server error".to_string(),
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ErrorBody { error: message })
    }
}

impl From<sqlx::Error> for WishlistError {
    fn from(e: sqlx::Error) -> WishlistError {
        error!(err = ?e, "SQLx error occurred");
        WishlistError::StoreFailure(e.to_string())
    }
}

impl From<reqwest::Error> for WishlistError {
    fn from(e: reqwest::Error) -> WishlistError {
        error!(
            err = ?e,
            is_timeout = e.is_timeout(),
            status = ?e.status(),
            "catalog request failed"
        );
        WishlistError::StoreFailure(e.to_string())
    }
}

impl From<tokio::task::JoinError> for WishlistError {
    fn from(e: tokio::task::JoinError) -> WishlistError {
        error!(
            err = ?e,
            was_cancelled = e.is_cancelled(),
            did_panic = e.is_panic(),
            "Tokio task join error occurred"
        );
        WishlistError::UnexpectedError
    }
}

impl From<validator::ValidationErrors> for WishlistError {
    fn from(e: validator::ValidationErrors) -> WishlistError {
        let mut messages = e
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let code = errors.first().map(|e| e.code.as_ref()).unwrap_or("invalid");
                match code {
                    "email" => format!("{} must be a valid email address", field),
                    "length" | "required" => format!("{} is required", field),
                    _ => format!("{} is invalid", field),
                }
            })
            .collect::<Vec<String>>();
        messages.sort();
        WishlistError::Validation(messages.join(", "))
    }
}
