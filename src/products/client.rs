use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, instrument};

use super::dto::{OffProductResponse, ProductRecord};
use crate::config::OpenFoodFactsConfig;

#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(ProductRecord),
    NotFound,
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("product database unreachable: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("product database answered {0}")]
    Status(StatusCode),
    #[error("malformed product payload: {0}")]
    Decode(#[source] reqwest::Error),
}

impl LookupError {
    /// True when the product database could not be reached or refused the call.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, LookupError::Transport(_) | LookupError::Status(_))
    }
}

#[async_trait]
pub trait ProductLookup: Send + Sync {
    async fn lookup(&self, barcode: &str) -> Result<LookupOutcome, LookupError>;
}

/// Read-only, unauthenticated OpenFoodFacts lookup.
#[derive(Clone)]
pub struct OpenFoodFactsClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpenFoodFactsClient {
    pub fn new(http: reqwest::Client, config: &OpenFoodFactsConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.clone(),
        }
    }

    fn product_url(&self, barcode: &str) -> String {
        format!("{}/api/v0/product/{}.json", self.base_url, barcode)
    }
}

#[async_trait]
impl ProductLookup for OpenFoodFactsClient {
    #[instrument(skip(self))]
    async fn lookup(&self, barcode: &str) -> Result<LookupOutcome, LookupError> {
        let res = self
            .http
            .get(self.product_url(barcode))
            .send()
            .await
            .map_err(LookupError::Transport)?;

        let status = res.status();
        if !status.is_success() {
            return Err(LookupError::Status(status));
        }

        let body: OffProductResponse = res.json().await.map_err(|e| {
            if e.is_decode() {
                LookupError::Decode(e)
            } else {
                LookupError::Transport(e)
            }
        })?;

        match (body.status, body.product) {
            (1, Some(product)) => {
                debug!(%barcode, "product found");
                Ok(LookupOutcome::Found(ProductRecord::from_off(barcode, product)))
            }
            (status, _) => {
                debug!(%barcode, status, "product absent upstream");
                Ok(LookupOutcome::NotFound)
            }
        }
    }
}

#[cfg(test)]
mod lookup_tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(base_url: &str) -> OpenFoodFactsClient {
        OpenFoodFactsClient::new(
            reqwest::Client::new(),
            &OpenFoodFactsConfig {
                base_url: base_url.to_string(),
            },
        )
    }

    #[tokio::test]
    async fn found_product_is_normalized() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(Method::GET).path("/api/v0/product/3017620422003.json");
            then.status(200).json_body(json!({
                "status": 1,
                "product": {
                    "product_name": "Nutella",
                    "brands": "Ferrero",
                    "nutriscore_grade": "e",
                    "ecoscore_value": 23,
                    "ecoscore_grade": "d",
                    "packaging": "Glass jar, Recyclable lid",
                    "image_front_small_url": "https://img.example/nutella.jpg"
                }
            }));
        });

        let out = client_for(&server.base_url())
            .lookup("3017620422003")
            .await
            .unwrap();
        m.assert();

        let LookupOutcome::Found(rec) = out else {
            panic!("expected a found product");
        };
        assert_eq!(rec.barcode, "3017620422003");
        assert_eq!(rec.name, "Nutella");
        assert_eq!(rec.brand, "Ferrero");
        assert_eq!(rec.eco_score_value, Some(23.0));
        assert!(rec.recyclable);
        assert_eq!(rec.label, "None");
        assert_eq!(rec.image_url.as_deref(), Some("https://img.example/nutella.jpg"));
    }

    #[tokio::test]
    async fn status_zero_is_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(Method::GET).path("/api/v0/product/000.json");
            then.status(200)
                .json_body(json!({"status": 0, "status_verbose": "product not found"}));
        });

        let out = client_for(&server.base_url()).lookup("000").await.unwrap();
        assert_eq!(out, LookupOutcome::NotFound);
    }

    #[tokio::test]
    async fn non_success_status_is_unavailable() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(Method::GET).path("/api/v0/product/123.json");
            then.status(503);
        });

        let err = client_for(&server.base_url()).lookup("123").await.unwrap_err();
        m.assert_hits(1);
        assert!(matches!(err, LookupError::Status(s) if s == StatusCode::SERVICE_UNAVAILABLE));
        assert!(err.is_unavailable());
    }

    #[tokio::test]
    async fn garbage_body_is_decode_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(Method::GET).path("/api/v0/product/123.json");
            then.status(200).body("<html>maintenance</html>");
        });

        let err = client_for(&server.base_url()).lookup("123").await.unwrap_err();
        assert!(matches!(err, LookupError::Decode(_)));
        assert!(!err.is_unavailable());
    }

    #[tokio::test]
    async fn connection_refused_is_unavailable() {
        let err = client_for("http://127.0.0.1:1").lookup("123").await.unwrap_err();
        assert!(matches!(err, LookupError::Transport(_)));
        assert!(err.is_unavailable());
    }
}
