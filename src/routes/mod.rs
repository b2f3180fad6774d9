mod auth;
mod customer;
mod deadline;
mod favorite;
mod health_check;
mod product;

pub use auth::*;
pub use customer::*;
pub use deadline::*;
pub use favorite::*;
pub use health_check::*;
pub use product::*;

use actix_web::{error::JsonPayloadError, error::PathError, web, HttpRequest};

use crate::WishlistError;

/// Everything mounted under `/api`
pub fn api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(login))
            .route("/refresh", web::post().to(refresh)),
    )
    .service(
        web::scope("/customers")
            .route("", web::post().to(create_customer))
            .route("/{id}", web::get().to(get_customer))
            .route("/{id}", web::put().to(update_customer))
            .route("/{id}", web::delete().to(delete_customer))
            .route(
                "/{customer_id}/favorites/{product_id}",
                web::post().to(add_favorite),
            )
            .route(
                "/{customer_id}/favorites/{product_id}",
                web::delete().to(remove_favorite),
            ),
    )
    .service(
        web::scope("/products")
            .route("", web::get().to(list_products))
            .route("/{id}", web::get().to(get_product)),
    );
}

pub fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    WishlistError::BadRequest(err.to_string()).into()
}

pub fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    WishlistError::BadRequest(err.to_string()).into()
}
