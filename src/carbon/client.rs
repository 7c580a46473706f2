use std::fmt;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, instrument, warn};

use super::dto::{ElectricityEstimateRequest, EstimateResponse};
use crate::config::CarbonConfig;

/// Why an estimate fell back to zero.
#[derive(Debug, Clone, PartialEq)]
pub enum DegradeReason {
    MissingApiKey,
    Transport(String),
    Status(u16),
    Malformed(String),
}

impl fmt::Display for DegradeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegradeReason::MissingApiKey => write!(f, "no carbon api key configured"),
            DegradeReason::Transport(e) => write!(f, "transport failure: {}", e),
            DegradeReason::Status(s) => write!(f, "unexpected status {}", s),
            DegradeReason::Malformed(e) => write!(f, "malformed payload: {}", e),
        }
    }
}

/// Result of a carbon estimate. Callers never see an error: a failed call is
/// `Degraded` and counts as 0 kg, but stays distinguishable for logging.
#[derive(Debug, Clone, PartialEq)]
pub enum CarbonEstimate {
    Measured { kg: f64 },
    Degraded(DegradeReason),
}

impl CarbonEstimate {
    pub fn kg(&self) -> f64 {
        match self {
            CarbonEstimate::Measured { kg } => *kg,
            CarbonEstimate::Degraded(_) => 0.0,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, CarbonEstimate::Degraded(_))
    }
}

#[async_trait]
pub trait CarbonEstimator: Send + Sync {
    async fn estimate(&self) -> CarbonEstimate;
}

/// Carbon Interface client. Every call asks for the same synthetic electricity
/// scenario, so the number is a proxy and not a per-product footprint.
#[derive(Clone)]
pub struct CarbonInterfaceClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl CarbonInterfaceClient {
    pub fn new(http: reqwest::Client, config: &CarbonConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    async fn request(&self, api_key: &str) -> Result<f64, DegradeReason> {
        let res = self
            .http
            .post(format!("{}/estimates", self.base_url))
            .bearer_auth(api_key)
            .json(&ElectricityEstimateRequest::synthetic_scenario())
            .send()
            .await
            .map_err(|e| DegradeReason::Transport(e.to_string()))?;

        let status = res.status();
        if status != StatusCode::CREATED {
            return Err(DegradeReason::Status(status.as_u16()));
        }

        let body: EstimateResponse = res
            .json()
            .await
            .map_err(|e| DegradeReason::Malformed(e.to_string()))?;

        let kg = body.carbon_kg();
        if !kg.is_finite() || kg < 0.0 {
            return Err(DegradeReason::Malformed(format!("carbon_kg out of range: {}", kg)));
        }
        Ok(kg)
    }
}

#[async_trait]
impl CarbonEstimator for CarbonInterfaceClient {
    #[instrument(skip(self))]
    async fn estimate(&self) -> CarbonEstimate {
        let outcome = match self.api_key.as_deref() {
            Some(key) => self.request(key).await,
            None => Err(DegradeReason::MissingApiKey),
        };
        match outcome {
            Ok(kg) => {
                debug!(kg, "carbon estimate");
                CarbonEstimate::Measured { kg }
            }
            Err(reason) => {
                warn!(%reason, "carbon estimate degraded to 0");
                CarbonEstimate::Degraded(reason)
            }
        }
    }
}

#[cfg(test)]
mod estimate_tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(base_url: &str, api_key: Option<&str>) -> CarbonInterfaceClient {
        CarbonInterfaceClient::new(
            reqwest::Client::new(),
            &CarbonConfig {
                base_url: base_url.to_string(),
                api_key: api_key.map(str::to_string),
            },
        )
    }

    #[tokio::test]
    async fn created_response_converts_tons_to_kg() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(Method::POST)
                .path("/estimates")
                .header("authorization", "Bearer k3y")
                .json_body(json!({
                    "type": "electricity",
                    "electricity_unit": "kwh",
                    "electricity_value": 5,
                    "country": "us"
                }));
            then.status(201)
                .json_body(json!({"data": {"attributes": {"carbon_mt": 0.05}}}));
        });

        let est = client_for(&server.base_url(), Some("k3y")).estimate().await;
        m.assert();
        assert!(!est.is_degraded());
        assert!((est.kg() - 50.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn ok_instead_of_created_degrades() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(Method::POST).path("/estimates");
            then.status(200)
                .json_body(json!({"data": {"attributes": {"carbon_mt": 1.0}}}));
        });

        let est = client_for(&server.base_url(), Some("k")).estimate().await;
        assert_eq!(est, CarbonEstimate::Degraded(DegradeReason::Status(200)));
        assert_eq!(est.kg(), 0.0);
    }

    #[tokio::test]
    async fn unauthorized_degrades() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(Method::POST).path("/estimates");
            then.status(401).json_body(json!({"message": "bad key"}));
        });

        let est = client_for(&server.base_url(), Some("wrong")).estimate().await;
        assert_eq!(est, CarbonEstimate::Degraded(DegradeReason::Status(401)));
    }

    #[tokio::test]
    async fn malformed_payload_degrades() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(Method::POST).path("/estimates");
            then.status(201)
                .json_body(json!({"data": {"attributes": {"carbon_mt": "lots"}}}));
        });

        let est = client_for(&server.base_url(), Some("k")).estimate().await;
        assert!(matches!(est, CarbonEstimate::Degraded(DegradeReason::Malformed(_))));
        assert_eq!(est.kg(), 0.0);
    }

    #[tokio::test]
    async fn negative_emissions_degrade() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(Method::POST).path("/estimates");
            then.status(201)
                .json_body(json!({"data": {"attributes": {"carbon_mt": -0.5}}}));
        });

        let est = client_for(&server.base_url(), Some("k")).estimate().await;
        assert!(matches!(est, CarbonEstimate::Degraded(DegradeReason::Malformed(_))));
    }

    #[tokio::test]
    async fn transport_failure_degrades() {
        let est = client_for("http://127.0.0.1:1", Some("k")).estimate().await;
        assert!(matches!(est, CarbonEstimate::Degraded(DegradeReason::Transport(_))));
        assert_eq!(est.kg(), 0.0);
    }

    #[tokio::test]
    async fn missing_key_skips_the_call() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(Method::POST).path("/estimates");
            then.status(201);
        });

        let est = client_for(&server.base_url(), None).estimate().await;
        m.assert_hits(0);
        assert_eq!(est, CarbonEstimate::Degraded(DegradeReason::MissingApiKey));
    }
}
