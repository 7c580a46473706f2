use std::sync::Arc;

use anyhow::Context;

use crate::carbon::{CarbonEstimator, CarbonInterfaceClient};
use crate::config::AppConfig;
use crate::products::{OpenFoodFactsClient, ProductLookup};
use crate::suggestions::{AlternativesSuggester, GeminiClient};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductLookup>,
    pub carbon: Arc<dyn CarbonEstimator>,
    pub suggester: Arc<dyn AlternativesSuggester>,
}

impl AppState {
    /// Wires the real upstream clients around one pooled HTTP client.
    pub fn init(config: AppConfig) -> anyhow::Result<Self> {
        let http = build_http_client(&config)?;

        let products =
            Arc::new(OpenFoodFactsClient::new(http.clone(), &config.openfoodfacts)) as Arc<dyn ProductLookup>;
        let carbon =
            Arc::new(CarbonInterfaceClient::new(http.clone(), &config.carbon)) as Arc<dyn CarbonEstimator>;
        let suggester =
            Arc::new(GeminiClient::new(http, &config.gemini)) as Arc<dyn AlternativesSuggester>;

        if config.carbon.api_key.is_none() {
            tracing::warn!("CARBON_API_KEY not set; carbon estimates will degrade to 0");
        }
        if config.gemini.api_key.is_none() {
            tracing::warn!("GOOGLE_API_KEY not set; suggestions will always be empty");
        }

        Ok(Self::from_parts(products, carbon, suggester))
    }

    pub fn from_parts(
        products: Arc<dyn ProductLookup>,
        carbon: Arc<dyn CarbonEstimator>,
        suggester: Arc<dyn AlternativesSuggester>,
    ) -> Self {
        Self {
            products,
            carbon,
            suggester,
        }
    }
}

fn build_http_client(config: &AppConfig) -> anyhow::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = config.upstream_timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().context("build upstream http client")
}
