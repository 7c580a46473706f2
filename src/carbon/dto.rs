use serde::{Deserialize, Serialize};

/// Body of `POST /estimates` for an electricity scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElectricityEstimateRequest {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub electricity_unit: &'static str,
    pub electricity_value: u32,
    pub country: &'static str,
}

impl ElectricityEstimateRequest {
    /// Fixed 5 kWh of US grid electricity. This is a stand-in signal and says
    /// nothing about the scanned product itself.
    pub fn synthetic_scenario() -> Self {
        Self {
            kind: "electricity",
            electricity_unit: "kwh",
            electricity_value: 5,
            country: "us",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EstimateResponse {
    #[serde(default)]
    pub data: EstimateData,
}

#[derive(Debug, Default, Deserialize)]
pub struct EstimateData {
    #[serde(default)]
    pub attributes: EstimateAttributes,
}

#[derive(Debug, Default, Deserialize)]
pub struct EstimateAttributes {
    /// Metric tons of CO2.
    #[serde(default)]
    pub carbon_mt: f64,
}

impl EstimateResponse {
    pub fn carbon_kg(&self) -> f64 {
        self.data.attributes.carbon_mt * 1000.0
    }
}
