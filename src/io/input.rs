use anyhow::{Context, Result};
use serde_json::Value;

use super::DocumentFormat;

/// Parse structured data in any supported format into a `serde_json::Value`.
pub fn parse_document_str(contents: &str, format: DocumentFormat) -> Result<Value> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str::<Value>(contents).with_context(|| "failed to parse JSON document")
        }
        DocumentFormat::Yaml => {
            serde_yaml::from_str::<Value>(contents).with_context(|| "failed to parse YAML document")
        }
    }
}

/// A document with nothing but whitespace, or one that parses to `null`.
pub fn is_empty_document(contents: &str, value: &Value) -> bool {
    contents.trim().is_empty() || value.is_null()
}
