use sqlx::postgres::PgPoolOptions;
use std::net::TcpListener;
use std::sync::Arc;
use wishlist::{
    auth::TokenKeys,
    build_app,
    catalog::FakeStoreCatalog,
    database::{CustomerDatabase, FavoriteDatabase, UserDatabase},
    get_configuration,
    telemetry::{generate_subscriber, init_subscriber},
    AppState,
};

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    let subscriber = generate_subscriber("wishlist".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().expect("failed to read configuration");

    let pool = PgPoolOptions::new()
        .acquire_timeout(configuration.database.acquire_timeout())
        .connect_lazy_with(configuration.database.with_db());
    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("failed to run database migrations");

    let catalog = FakeStoreCatalog::new(&configuration.catalog)
        .expect("failed to build the catalog client");

    let state = AppState::new(
        Arc::new(UserDatabase::new(pool.clone())),
        Arc::new(CustomerDatabase::new(pool.clone())),
        Arc::new(FavoriteDatabase::new(pool)),
        Arc::new(catalog),
        TokenKeys::new(&configuration.auth),
    );

    let listener = TcpListener::bind(configuration.application.address())?;
    build_app(
        listener,
        state,
        configuration.application.request_timeout(),
    )?
    .await
}
