use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct OpenFoodFactsConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CarbonConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub openfoodfacts: OpenFoodFactsConfig,
    pub carbon: CarbonConfig,
    pub gemini: GeminiConfig,
    /// Unset keeps the transport defaults (no explicit deadline).
    pub upstream_timeout: Option<Duration>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(get: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("APP_PORT") {
            Some(v) => v
                .parse::<u16>()
                .with_context(|| format!("APP_PORT must be a port number, got {:?}", v))?,
            None => 8080,
        };
        let upstream_timeout = match non_empty("UPSTREAM_TIMEOUT_SECS") {
            Some(v) => Some(Duration::from_secs(v.parse::<u64>().with_context(|| {
                format!("UPSTREAM_TIMEOUT_SECS must be whole seconds, got {:?}", v)
            })?)),
            None => None,
        };

        Ok(Self {
            host: non_empty("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            openfoodfacts: OpenFoodFactsConfig {
                base_url: base_url(
                    non_empty("OPENFOODFACTS_BASE_URL"),
                    "https://world.openfoodfacts.org",
                ),
            },
            carbon: CarbonConfig {
                base_url: base_url(
                    non_empty("CARBON_API_URL"),
                    "https://www.carboninterface.com/api/v1",
                ),
                api_key: non_empty("CARBON_API_KEY"),
            },
            gemini: GeminiConfig {
                base_url: base_url(
                    non_empty("GEMINI_BASE_URL"),
                    "https://generativelanguage.googleapis.com",
                ),
                api_key: non_empty("GOOGLE_API_KEY"),
                model: non_empty("GEMINI_MODEL").unwrap_or_else(|| "gemini-2.5-flash-lite".into()),
            },
            upstream_timeout,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn base_url(value: Option<String>, default: &str) -> String {
    value
        .as_deref()
        .unwrap_or(default)
        .trim()
        .trim_end_matches('/')
        .to_string()
}
