pub mod client;
pub mod dto;

pub use client::{LookupError, LookupOutcome, OpenFoodFactsClient, ProductLookup};
pub use dto::ProductRecord;
