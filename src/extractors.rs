use axum::{
    async_trait,
    extract::{FromRequest, Request},
};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;

/// JSON body extractor that ignores `Content-Type` and falls back to
/// `T::default()` when the body is empty or not valid JSON for `T`.
pub struct LenientJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for LenientJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        Ok(LenientJson(parse_lenient(&body)))
    }
}

pub fn parse_lenient<T: DeserializeOwned + Default>(body: &[u8]) -> T {
    if body.iter().all(u8::is_ascii_whitespace) {
        return T::default();
    }
    match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(e) => {
            debug!(error = %e, "unparsable request body, using empty object");
            T::default()
        }
    }
}
