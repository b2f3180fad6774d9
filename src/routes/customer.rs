use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    models::{AuthenticatedUser, Customer, Product},
    services::{CustomerService, FavoriteOrchestrator},
    WishlistError,
};

#[derive(Debug, Deserialize, Validate)]
pub struct CustomerRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub favorites: Vec<FavoriteProduct>,
}

#[derive(Debug, Serialize)]
pub struct FavoriteProduct {
    pub id: i64,
    pub title: String,
    pub image: String,
    pub price: f64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl From<Product> for FavoriteProduct {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            title: p.title,
            image: p.image_url,
            price: p.price,
        }
    }
}

impl From<Customer> for CustomerResponse {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id,
            name: c.name,
            email: c.email,
            favorites: c.favorites.into_iter().map(FavoriteProduct::from).collect(),
        }
    }
}

#[tracing::instrument(skip(service, body), fields(caller = %user.user_id))]
pub async fn create_customer(
    user: AuthenticatedUser,
    service: web::Data<CustomerService>,
    body: web::Json<CustomerRequest>,
) -> Result<HttpResponse, WishlistError> {
    body.validate()?;
    let customer = service.create(&body.name, &body.email).await?;
    Ok(HttpResponse::Created().json(CustomerResponse::from(customer)))
}

#[tracing::instrument(skip(orchestrator), fields(caller = %user.user_id))]
pub async fn get_customer(
    user: AuthenticatedUser,
    orchestrator: web::Data<FavoriteOrchestrator>,
    id: web::Path<String>,
) -> Result<HttpResponse, WishlistError> {
    let customer = orchestrator
        .enriched_customer(&id)
        .await?
        .ok_or(WishlistError::CustomerNotFound)?;
    Ok(HttpResponse::Ok().json(CustomerResponse::from(customer)))
}

#[tracing::instrument(skip(service, body), fields(caller = %user.user_id))]
pub async fn update_customer(
    user: AuthenticatedUser,
    service: web::Data<CustomerService>,
    id: web::Path<String>,
    body: web::Json<CustomerRequest>,
) -> Result<HttpResponse, WishlistError> {
    body.validate()?;
    let customer = service.edit(&id, &body.name, &body.email).await?;
    Ok(HttpResponse::Ok().json(CustomerResponse::from(customer)))
}

#[tracing::instrument(skip(service), fields(caller = %user.user_id))]
pub async fn delete_customer(
    user: AuthenticatedUser,
    service: web::Data<CustomerService>,
    id: web::Path<String>,
) -> Result<HttpResponse, WishlistError> {
    service.delete(&id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "customer deleted successfully".to_string(),
    }))
}
