use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use tracing::{instrument, warn};

use crate::state::AppState;

pub fn build_prompt(product_name: &str) -> String {
    format!(
        "You are a sustainable product recommender. Given the product '{}', \
         list 3 alternative eco-friendly products. For each: include name, short reason, \
         brand, and image URL. Return as a JSON array of objects.",
        product_name
    )
}

/// Strips surrounding whitespace and markdown code fences from a model reply.
pub(crate) fn strip_code_fence(text: &str) -> &str {
    lazy_static! {
        static ref LEADING_FENCE: Regex = Regex::new(r"^```(?:json)?").unwrap();
        static ref TRAILING_FENCE: Regex = Regex::new(r"```$").unwrap();
    }
    let text = text.trim();
    let text = LEADING_FENCE
        .find(text)
        .map_or(text, |m| &text[m.end()..])
        .trim();
    TRAILING_FENCE
        .find(text)
        .map_or(text, |m| &text[..m.start()])
        .trim()
}

/// Anything other than a JSON array yields no suggestions.
pub fn parse_suggestions(text: &str) -> Vec<Value> {
    match serde_json::from_str::<Value>(strip_code_fence(text)) {
        Ok(Value::Array(items)) => items,
        Ok(other) => {
            warn!(kind = json_kind(&other), "ai reply is not a JSON array");
            Vec::new()
        }
        Err(e) => {
            warn!(error = %e, reply = %text, "failed to parse ai reply as JSON");
            Vec::new()
        }
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Never fails: upstream problems are logged and produce an empty list.
#[instrument(skip(st))]
pub async fn suggest_alternatives(st: &AppState, product_name: &str) -> Vec<Value> {
    match st.suggester.generate(&build_prompt(product_name)).await {
        Ok(text) => parse_suggestions(&text),
        Err(e) => {
            warn!(error = %e, "ai suggestion call failed");
            Vec::new()
        }
    }
}
