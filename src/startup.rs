use actix_cors::Cors;
use actix_web::{dev::Server, middleware::from_fn, web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;
use tracing_actix_web::TracingLogger;

use crate::{
    auth::{SessionIssuer, TokenKeys},
    catalog::ProductCatalog,
    database::{CredentialRepository, CustomerRepository, FavoriteRepository},
    routes::*,
    services::{CustomerService, FavoriteOrchestrator},
};

/// The wired-up core, shared by every worker
#[derive(Clone)]
pub struct AppState {
    pub session: SessionIssuer,
    pub customers: CustomerService,
    pub favorites: FavoriteOrchestrator,
    pub catalog: Arc<dyn ProductCatalog>,
}

impl AppState {
    pub fn new(
        credentials: Arc<dyn CredentialRepository>,
        customers: Arc<dyn CustomerRepository>,
        favorites: Arc<dyn FavoriteRepository>,
        catalog: Arc<dyn ProductCatalog>,
        keys: TokenKeys,
    ) -> Self {
        Self {
            session: SessionIssuer::new(credentials, keys),
            customers: CustomerService::new(customers.clone()),
            favorites: FavoriteOrchestrator::new(customers, favorites, catalog.clone()),
            catalog,
        }
    }
}

pub fn build_app(
    listener: TcpListener,
    state: AppState,
    request_timeout: Duration,
) -> Result<Server, std::io::Error> {
    let session = web::Data::new(state.session);
    let customers = web::Data::new(state.customers);
    let favorites = web::Data::new(state.favorites);
    let catalog: web::Data<dyn ProductCatalog> = web::Data::from(state.catalog);
    let deadline = web::Data::new(RequestDeadline(request_timeout));

    let server = HttpServer::new(move || {
        App::new()
            .wrap(from_fn(enforce_deadline))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
                    .allow_any_header(),
            )
            .wrap(TracingLogger::default())
            .app_data(web::JsonConfig::default().error_handler(json_error))
            .app_data(web::PathConfig::default().error_handler(path_error))
            .app_data(deadline.clone())
            .app_data(session.clone())
            .app_data(customers.clone())
            .app_data(favorites.clone())
            .app_data(catalog.clone())
            .route("/health_check", web::get().to(health_check))
            .service(web::scope("/api").configure(api))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
