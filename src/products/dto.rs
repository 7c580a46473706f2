use serde::Deserialize;

/// Envelope of `GET /api/v0/product/{barcode}.json`.
#[derive(Debug, Deserialize)]
pub struct OffProductResponse {
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub product: Option<OffProduct>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OffProduct {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub brands: Option<String>,
    #[serde(default)]
    pub nutriscore_grade: Option<String>,
    #[serde(default)]
    pub ecoscore_value: Option<f64>,
    #[serde(default)]
    pub ecoscore_grade: Option<String>,
    #[serde(default)]
    pub packaging: Option<String>,
    #[serde(default)]
    pub image_front_small_url: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub labels: Option<String>,
}

/// Normalized product, always complete enough to print.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub barcode: String,
    pub name: String,
    pub brand: String,
    pub nutrition_grade: String,
    /// Raw upstream value; scoring treats `None` as 0.
    pub eco_score_value: Option<f64>,
    pub eco_grade: String,
    pub packaging_description: String,
    pub recyclable: bool,
    pub image_url: Option<String>,
    pub label: String,
}

impl ProductRecord {
    pub fn from_off(barcode: &str, p: OffProduct) -> Self {
        let recyclable = is_recyclable(p.packaging.as_deref());
        Self {
            barcode: barcode.to_string(),
            name: p.product_name.unwrap_or_else(|| "Unknown".into()),
            brand: p.brands.unwrap_or_else(|| "Unknown".into()),
            nutrition_grade: p.nutriscore_grade.unwrap_or_else(|| "N/A".into()),
            eco_score_value: p.ecoscore_value,
            eco_grade: p.ecoscore_grade.unwrap_or_else(|| "N/A".into()),
            packaging_description: p.packaging.unwrap_or_else(|| "Unknown".into()),
            recyclable,
            image_url: p.image_front_small_url,
            label: p.label.or(p.labels).unwrap_or_else(|| "None".into()),
        }
    }
}

/// Case-insensitive "recyclable" substring test; absent text is not recyclable.
pub fn is_recyclable(packaging: Option<&str>) -> bool {
    packaging
        .map(|p| p.to_lowercase().contains("recyclable"))
        .unwrap_or(false)
}
