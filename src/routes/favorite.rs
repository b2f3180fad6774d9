use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::{models::AuthenticatedUser, services::FavoriteOrchestrator, WishlistError};

#[derive(Debug, Serialize)]
pub struct FavoriteResponse {
    pub customer_id: String,
    pub product_id: i64,
    pub message: String,
}

#[tracing::instrument(skip(orchestrator), fields(caller = %user.user_id))]
pub async fn add_favorite(
    user: AuthenticatedUser,
    orchestrator: web::Data<FavoriteOrchestrator>,
    path: web::Path<(String, i64)>,
) -> Result<HttpResponse, WishlistError> {
    let (customer_id, product_id) = path.into_inner();
    orchestrator.add_favorite(&customer_id, product_id).await?;
    Ok(HttpResponse::Created().json(FavoriteResponse {
        customer_id,
        product_id,
        message: "product added to favorites successfully".to_string(),
    }))
}

#[tracing::instrument(skip(orchestrator), fields(caller = %user.user_id))]
pub async fn remove_favorite(
    user: AuthenticatedUser,
    orchestrator: web::Data<FavoriteOrchestrator>,
    path: web::Path<(String, i64)>,
) -> Result<HttpResponse, WishlistError> {
    let (customer_id, product_id) = path.into_inner();
    orchestrator.remove_favorite(&customer_id, product_id).await?;
    Ok(HttpResponse::Ok().json(FavoriteResponse {
        customer_id,
        product_id,
        message: "product removed from favorites successfully".to_string(),
    }))
}
