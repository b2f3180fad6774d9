//! Provisions a login identity, there is no sign-up flow over HTTP.
//!
//! `add_user <name> <email> <password>`

use anyhow::{bail, Context};
use sqlx::postgres::PgPoolOptions;
use wishlist::{
    auth::hash_password,
    database::{CredentialRepository, UserDatabase},
    get_configuration,
    models::Identity,
    telemetry::{generate_subscriber, init_subscriber},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = generate_subscriber("add_user".into(), "info".into(), std::io::stderr);
    init_subscriber(subscriber);

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let (name, email, password) = match args.as_slice() {
        [name, email, password] => (name, email, password),
        _ => bail!("usage: add_user <name> <email> <password>"),
    };

    let configuration = get_configuration().context("failed to read configuration")?;
    let pool = PgPoolOptions::new()
        .acquire_timeout(configuration.database.acquire_timeout())
        .connect_with(configuration.database.with_db())
        .await
        .context("failed to connect to the database")?;
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("failed to run database migrations")?;

    let password_hash = hash_password(password)?;
    let identity = Identity::new(name, email, &password_hash)?;
    UserDatabase::new(pool)
        .insert(&identity)
        .await
        .with_context(|| format!("failed to store identity for {}", email))?;

    println!("created user {} ({})", identity.id, identity.email);
    Ok(())
}
