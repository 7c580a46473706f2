pub mod client;
mod dto;
pub mod handlers;
mod services;

pub use client::{AlternativesSuggester, GeminiClient};

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::suggest_routes())
}
