use axum::{extract::State, routing::post, Json, Router};
use tracing::{instrument, warn};

use super::dto::{SuggestRequest, SuggestResponse};
use super::services::suggest_alternatives;
use crate::{error::ApiError, extractors::LenientJson, state::AppState};

pub fn suggest_routes() -> Router<AppState> {
    Router::new().route("/suggest_alternatives", post(suggest))
}

/// POST /api/suggest_alternatives { product_name }
#[instrument(skip(state, body))]
pub async fn suggest(
    State(state): State<AppState>,
    LenientJson(body): LenientJson<SuggestRequest>,
) -> Result<Json<SuggestResponse>, ApiError> {
    let Some(product_name) = body.product_name.filter(|n| !n.trim().is_empty()) else {
        warn!("product_name missing");
        return Err(ApiError::BadRequest("product_name required".into()));
    };

    let suggestions = suggest_alternatives(&state, &product_name).await;
    Ok(Json(SuggestResponse { suggestions }))
}
