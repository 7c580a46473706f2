use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::products::ProductRecord;
use crate::scoring::SustainabilityScore;

#[derive(Debug, Default, Deserialize)]
pub struct BarcodeRequest {
    #[serde(default)]
    pub barcode: Option<Value>,
}

impl BarcodeRequest {
    /// Barcode as sent; numbers are accepted as-is and anything else is empty.
    pub fn barcode(&self) -> String {
        match &self.barcode {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarcodeResponse {
    pub barcode: String,
    pub product_name: String,
    pub brands: String,
    pub nutriscore: String,
    pub recyclable: bool,
    pub image_url: Option<String>,
    #[serde(rename = "eco-score")]
    pub eco_score: Option<f64>,
    #[serde(rename = "eco-grade")]
    pub eco_grade: String,
    pub packaging: String,
    pub label: String,
    pub carbon_emission_kg: f64,
    pub overall_sustainability_score: f64,
}

impl BarcodeResponse {
    pub fn assemble(product: ProductRecord, carbon_kg: f64, score: &SustainabilityScore) -> Self {
        Self {
            barcode: product.barcode,
            product_name: product.name,
            brands: product.brand,
            nutriscore: product.nutrition_grade,
            recyclable: product.recyclable,
            image_url: product.image_url,
            eco_score: product.eco_score_value,
            eco_grade: product.eco_grade,
            packaging: product.packaging_description,
            label: product.label,
            carbon_emission_kg: carbon_kg,
            overall_sustainability_score: score.total,
        }
    }
}
