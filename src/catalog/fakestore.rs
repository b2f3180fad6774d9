use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{error, warn};

use crate::{
    catalog::ProductCatalog, configuration::CatalogSettings, models::Product, Result,
    WishlistError,
};

/// Client for the Fake Store API (`https://fakestoreapi.com`)
pub struct FakeStoreCatalog {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct FakeStoreProduct {
    id: i64,
    title: String,
    price: f64,
    image: String,
    #[serde(default)]
    rating: FakeStoreRating,
}

#[derive(Debug, Default, Deserialize)]
struct FakeStoreRating {
    rate: f64,
    count: i64,
}

impl TryFrom<FakeStoreProduct> for Product {
    type Error = WishlistError;

    fn try_from(p: FakeStoreProduct) -> Result<Self> {
        Product::new(
            p.id,
            &p.title,
            &p.image,
            p.price,
            p.rating.rate,
            p.rating.count,
        )
        .map_err(|e| {
            error!(err = ?e, product_id = p.id, "catalog returned an invalid product");
            WishlistError::StoreFailure(e.to_string())
        })
    }
}

impl FakeStoreCatalog {
    pub fn new(settings: &CatalogSettings) -> Result<Self> {
        let client = Client::builder().timeout(settings.timeout()).build()?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn unexpected_status(status: StatusCode) -> WishlistError {
        error!(%status, "catalog answered with an unexpected status");
        WishlistError::StoreFailure(format!("catalog answered with {}", status))
    }
}

#[async_trait]
impl ProductCatalog for FakeStoreCatalog {
    #[tracing::instrument(skip(self), fields(catalog = "fakestore"))]
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        let url = format!("{}/products/{}", self.base_url, id);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Self::unexpected_status(status));
        }

        // unknown ids come back as a 200 with an empty body
        let body = response.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        match serde_json::from_slice::<FakeStoreProduct>(&body) {
            Ok(payload) => Product::try_from(payload).map(Some),
            Err(e) => {
                warn!(err = ?e, "catalog body could not be decoded as a product");
                Ok(None)
            }
        }
    }

    #[tracing::instrument(skip(self), fields(catalog = "fakestore"))]
    async fn find_all(&self) -> Result<Vec<Product>> {
        let url = format!("{}/products", self.base_url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::unexpected_status(status));
        }
        let payload = response.json::<Vec<FakeStoreProduct>>().await?;
        payload.into_iter().map(Product::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claim::{assert_err, assert_none};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn catalog_for(server: &MockServer) -> FakeStoreCatalog {
        FakeStoreCatalog::new(&CatalogSettings {
            base_url: format!("{}/", server.uri()),
            timeout_secs: 1,
        })
        .expect("failed to build catalog client")
    }

    fn backpack() -> serde_json::Value {
        json!({
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack",
            "price": 109.95,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        })
    }

    #[tokio::test]
    async fn maps_a_product() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(backpack()))
            .expect(1)
            .mount(&server)
            .await;

        let product = catalog_for(&server).find_by_id(1).await.unwrap().unwrap();
        assert_eq!(product.id, 1);
        assert_eq!(product.title, "Fjallraven - Foldsack No. 1 Backpack");
        assert_eq!(product.price, 109.95);
        assert_eq!(product.rate, 3.9);
        assert_eq!(product.rate_count, 120);
    }

    #[tokio::test]
    async fn not_found_is_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/99"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        assert_none!(catalog_for(&server).find_by_id(99).await.unwrap());
    }

    #[tokio::test]
    async fn empty_body_is_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/21"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        assert_none!(catalog_for(&server).find_by_id(21).await.unwrap());
    }

    #[tokio::test]
    async fn undecodable_body_is_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/2"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        assert_none!(catalog_for(&server).find_by_id(2).await.unwrap());
    }

    #[tokio::test]
    async fn server_errors_are_store_failures() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let catalog = catalog_for(&server);
        assert!(matches!(
            catalog.find_by_id(1).await,
            Err(WishlistError::StoreFailure(_))
        ));
        assert!(matches!(
            catalog.find_all().await,
            Err(WishlistError::StoreFailure(_))
        ));
    }

    #[tokio::test]
    async fn invalid_products_are_store_failures() {
        let server = MockServer::start().await;
        let mut free = backpack();
        free["price"] = json!(0);
        Mock::given(method("GET"))
            .and(path("/products/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(free))
            .mount(&server)
            .await;

        assert!(matches!(
            catalog_for(&server).find_by_id(1).await,
            Err(WishlistError::StoreFailure(_))
        ));
    }

    #[tokio::test]
    async fn slow_catalog_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(backpack())
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        assert_err!(catalog_for(&server).find_by_id(1).await);
    }

    #[tokio::test]
    async fn lists_all_products() {
        let server = MockServer::start().await;
        let mut second = backpack();
        second["id"] = json!(2);
        second["title"] = json!("Mens Casual Premium Slim Fit T-Shirts");
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([backpack(), second])))
            .mount(&server)
            .await;

        let products = catalog_for(&server).find_all().await.unwrap();
        assert_eq!(
            products.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }
}
