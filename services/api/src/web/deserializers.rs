//! services/api/src/web/deserializers.rs
//!
//! Lenient readers for values that browsers and scripts encode differently.

use serde::{Deserialize, Deserializer};
use trivia_core::pagination::DEFAULT_PAGE;
use trivia_core::validation::RawField;
use utoipa::ToSchema;

// `?page=abc` falls back to the first page instead of rejecting the request
pub fn deserialize_page<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(DEFAULT_PAGE))
}

pub fn default_page() -> i64 {
    DEFAULT_PAGE
}

// select boxes post their values as strings, so "3" and 3 are the same category
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum LooseField {
    Integer(i64),
    Text(String),
}

impl From<LooseField> for RawField {
    fn from(value: LooseField) -> Self {
        match value {
            LooseField::Integer(v) => RawField::Integer(v),
            LooseField::Text(v) => RawField::Text(v),
        }
    }
}
