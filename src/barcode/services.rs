use tracing::{debug, error, info, instrument};

use super::dto::BarcodeResponse;
use crate::error::ApiError;
use crate::products::LookupOutcome;
use crate::scoring;
use crate::state::AppState;

/// Lookup, then carbon estimate, then score. The two upstream calls run one
/// after the other and the carbon call only happens for a found product.
#[instrument(skip(st))]
pub async fn lookup_and_score(st: &AppState, barcode: &str) -> Result<BarcodeResponse, ApiError> {
    let product = match st.products.lookup(barcode).await {
        Ok(LookupOutcome::Found(p)) => p,
        Ok(LookupOutcome::NotFound) => {
            info!(%barcode, "product not found");
            return Err(ApiError::ProductNotFound);
        }
        Err(e) => {
            error!(error = %e, %barcode, "product lookup failed");
            return Err(e.into());
        }
    };

    let carbon = st.carbon.estimate().await;
    let carbon_kg = carbon.kg();

    let score = scoring::score(product.eco_score_value, product.recyclable, carbon_kg);
    debug!(
        eco = score.eco_component,
        packaging = score.packaging_component,
        carbon = score.carbon_component,
        total = score.total,
        carbon_degraded = carbon.is_degraded(),
        "scored product"
    );

    Ok(BarcodeResponse::assemble(product, carbon_kg, &score))
}
