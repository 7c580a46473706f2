use axum::{extract::State, routing::post, Json, Router};
use tracing::instrument;

use super::dto::{BarcodeRequest, BarcodeResponse};
use super::services::lookup_and_score;
use crate::{error::ApiError, extractors::LenientJson, state::AppState};

pub fn barcode_routes() -> Router<AppState> {
    Router::new().route("/barcode", post(barcode))
}

/// POST /api/barcode { barcode }
#[instrument(skip(state, body))]
pub async fn barcode(
    State(state): State<AppState>,
    LenientJson(body): LenientJson<BarcodeRequest>,
) -> Result<Json<BarcodeResponse>, ApiError> {
    let barcode = body.barcode();
    let res = lookup_and_score(&state, &barcode).await?;
    Ok(Json(res))
}
