use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::products::LookupError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to reach OpenFoodFacts")]
    UpstreamUnavailable,

    #[error("Product not found")]
    ProductNotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UpstreamUnavailable | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::ProductNotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<LookupError> for ApiError {
    fn from(e: LookupError) -> Self {
        if e.is_unavailable() {
            ApiError::UpstreamUnavailable
        } else {
            ApiError::Internal(e.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            // Clients key off the capitalised field for this one case.
            ApiError::ProductNotFound => json!({ "Error": self.to_string() }),
            ApiError::Internal(ref msg) => {
                tracing::error!(error = %msg, "internal error");
                json!({ "error": msg })
            }
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

/// Last-resort conversion of a handler panic into a 500 carrying the message.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let msg = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(panic = %msg, "handler panicked");
    ApiError::Internal(msg).into_response()
}

#[cfg(test)]
mod error_tests {
    use super::*;

    async fn body_json(res: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn upstream_unavailable_shape() {
        let res = ApiError::UpstreamUnavailable.into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(res).await,
            json!({"error": "Failed to reach OpenFoodFacts"})
        );
    }

    #[tokio::test]
    async fn not_found_uses_capitalised_key() {
        let res = ApiError::ProductNotFound.into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(res).await, json!({"Error": "Product not found"}));
    }

    #[tokio::test]
    async fn internal_carries_raw_message() {
        let res = ApiError::Internal("boom: expected value at line 1".into()).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(res).await,
            json!({"error": "boom: expected value at line 1"})
        );
    }

    #[tokio::test]
    async fn panic_payloads_are_stringified() {
        let res = panic_response(Box::new("static str panic"));
        assert_eq!(body_json(res).await, json!({"error": "static str panic"}));

        let res = panic_response(Box::new(String::from("owned panic")));
        assert_eq!(body_json(res).await, json!({"error": "owned panic"}));

        let res = panic_response(Box::new(42_u8));
        assert_eq!(body_json(res).await, json!({"error": "unknown panic"}));
    }
}
