use anyhow::Result;
use reqwest::{header::AUTHORIZATION, Client, Response};
use serde_json::{json, Value};
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use wishlist::{
    auth::TokenKeys,
    build_app,
    catalog::{InMemoryCatalog, ProductCatalog},
    database::{
        CredentialRepository, InMemoryCustomers, InMemoryFavorites, InMemoryUsers,
    },
    models::{Identity, Product},
    AppState,
};

use crate::helpers::{
    bearer, build_http_client, DEFAULT_REQUEST_TIMEOUT_SECS, ISSUER, JWT_SECRET, TEST_EMAIL,
    TEST_PASSWORD, TEST_USER_ID, TRACING,
};

pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub users: Arc<InMemoryUsers>,
    pub customers: Arc<InMemoryCustomers>,
    pub favorites: Arc<InMemoryFavorites>,
}

pub fn catalog_products() -> Vec<Product> {
    vec![
        Product::new(
            1,
            "Fjallraven - Foldsack No. 1 Backpack",
            "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            109.95,
            3.9,
            120,
        ),
        Product::new(
            2,
            "Mens Casual Premium Slim Fit T-Shirts",
            "https://fakestoreapi.com/img/71-3HjGNDUL._AC_SY879._SX._UX._SY._UY_.jpg",
            22.3,
            4.1,
            259,
        ),
        Product::new(
            3,
            "Mens Cotton Jacket",
            "https://fakestoreapi.com/img/71li-ujtlUL._AC_UX679_.jpg",
            55.99,
            4.7,
            500,
        ),
    ]
    .into_iter()
    .collect::<Result<Vec<_>, _>>()
    .expect("fixture products are valid")
}

/// Verification reads the cost parameters back out of the encoded hash, so a
/// low-cost hash keeps every login in the suite fast
pub fn cheap_hash(password: &str) -> String {
    let config = argon2::Config {
        variant: argon2::Variant::Argon2id,
        mem_cost: 64,
        time_cost: 1,
        lanes: 1,
        ..argon2::Config::default()
    };
    let salt: [u8; 16] = rand::random();
    argon2::hash_encoded(password.as_bytes(), &salt, &config).expect("failed to hash password")
}

/// Serves the three fixture products
pub async fn spawn_app() -> TestApp {
    spawn_app_with(
        Arc::new(InMemoryCatalog::new(catalog_products())),
        Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
    )
    .await
}

pub async fn spawn_app_with(catalog: Arc<dyn ProductCatalog>, request_timeout: Duration) -> TestApp {
    lazy_static::initialize(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let users = Arc::new(InMemoryUsers::new());
    let password_hash = cheap_hash(TEST_PASSWORD);
    let identity = Identity::with_id(TEST_USER_ID, "Test User", TEST_EMAIL, &password_hash)
        .expect("fixture identity is valid");
    users
        .insert(&identity)
        .await
        .expect("failed to seed the test user");

    let favorites = Arc::new(InMemoryFavorites::new());
    let customers = Arc::new(InMemoryCustomers::cascading_to(favorites.clone()));

    let state = AppState::new(
        users.clone(),
        customers.clone(),
        favorites.clone(),
        catalog,
        TokenKeys::from_secret(JWT_SECRET, ISSUER),
    );
    let server = build_app(listener, state, request_timeout).expect("failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        client: build_http_client().expect("failed to build http client"),
        users,
        customers,
        favorites,
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Response> {
        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        Ok(response)
    }

    /// Logs the seeded user in and returns the token pair
    pub async fn tokens(&self) -> Result<Value> {
        let response = self.login(TEST_EMAIL, TEST_PASSWORD).await?;
        assert!(response.status().is_success());
        Ok(response.json::<Value>().await?)
    }

    pub async fn access_token(&self) -> Result<String> {
        let tokens = self.tokens().await?;
        Ok(tokens["access_token"]
            .as_str()
            .expect("login returned no access token")
            .to_string())
    }

    pub async fn get(&self, path: &str, token: &str) -> Result<Response> {
        let response = self
            .client
            .get(self.url(path))
            .header(AUTHORIZATION, bearer(token))
            .send()
            .await?;
        Ok(response)
    }

    pub async fn post(&self, path: &str, token: &str, body: &Value) -> Result<Response> {
        let response = self
            .client
            .post(self.url(path))
            .header(AUTHORIZATION, bearer(token))
            .json(body)
            .send()
            .await?;
        Ok(response)
    }

    pub async fn put(&self, path: &str, token: &str, body: &Value) -> Result<Response> {
        let response = self
            .client
            .put(self.url(path))
            .header(AUTHORIZATION, bearer(token))
            .json(body)
            .send()
            .await?;
        Ok(response)
    }

    pub async fn delete(&self, path: &str, token: &str) -> Result<Response> {
        let response = self
            .client
            .delete(self.url(path))
            .header(AUTHORIZATION, bearer(token))
            .send()
            .await?;
        Ok(response)
    }

    /// Creates a customer through the API and returns its id
    pub async fn create_customer(&self, token: &str, name: &str, email: &str) -> Result<String> {
        let response = self
            .post(
                "/api/customers",
                token,
                &json!({ "name": name, "email": email }),
            )
            .await?;
        assert_eq!(response.status().as_u16(), 201);
        let body = response.json::<Value>().await?;
        Ok(body["id"].as_str().expect("no id returned").to_string())
    }
}
