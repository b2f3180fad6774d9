use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::{
    catalog::ProductCatalog,
    models::{AuthenticatedUser, Product},
    WishlistError,
};

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub title: String,
    pub image: String,
    pub price: f64,
    pub rate: f64,
    pub rate_count: i64,
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
    pub total: usize,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            title: p.title,
            image: p.image_url,
            price: p.price,
            rate: p.rate,
            rate_count: p.rate_count,
        }
    }
}

#[tracing::instrument(skip(catalog), fields(caller = %user.user_id))]
pub async fn list_products(
    user: AuthenticatedUser,
    catalog: web::Data<dyn ProductCatalog>,
) -> Result<HttpResponse, WishlistError> {
    let products = catalog
        .find_all()
        .await?
        .into_iter()
        .map(ProductResponse::from)
        .collect::<Vec<_>>();
    Ok(HttpResponse::Ok().json(ProductListResponse {
        total: products.len(),
        products,
    }))
}

#[tracing::instrument(skip(catalog), fields(caller = %user.user_id))]
pub async fn get_product(
    user: AuthenticatedUser,
    catalog: web::Data<dyn ProductCatalog>,
    id: web::Path<i64>,
) -> Result<HttpResponse, WishlistError> {
    let product = catalog
        .find_by_id(id.into_inner())
        .await?
        .ok_or(WishlistError::ProductNotFound)?;
    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}
