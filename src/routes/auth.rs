use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

use crate::{auth::SessionIssuer, WishlistError};

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

#[tracing::instrument(skip(issuer, body), fields(email = %body.email))]
pub async fn login(
    issuer: web::Data<SessionIssuer>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, WishlistError> {
    body.validate()?;
    let tokens = issuer.login(&body.email, &body.password).await?;
    Ok(HttpResponse::Ok().json(tokens))
}

#[tracing::instrument(skip(issuer, body))]
pub async fn refresh(
    issuer: web::Data<SessionIssuer>,
    body: web::Json<RefreshRequest>,
) -> Result<HttpResponse, WishlistError> {
    body.validate()?;
    let grant = issuer.refresh_access_token(&body.refresh_token).await?;
    Ok(HttpResponse::Ok().json(grant))
}
