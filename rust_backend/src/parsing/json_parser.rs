use anyhow::{Context, Result};
use log::debug;
use std::path::Path;

use crate::models::PatientRecord;

/// Parse an exported patients file into records.
pub fn parse_patients_json(json_path: &Path) -> Result<Vec<PatientRecord>> {
    let json_content = std::fs::read_to_string(json_path)
        .with_context(|| format!("Failed to read JSON file: {}", json_path.display()))?;

    parse_patients_json_str(&json_content)
        .with_context(|| format!("Invalid patients file: {}", json_path.display()))
}

/// Parse a JSON array of patient documents.
///
/// Unknown fields are ignored. A document missing a required field or
/// holding a value of the wrong type fails the whole parse, and the error
/// names the offending path, e.g. `[3].startTime`.
pub fn parse_patients_json_str(json_str: &str) -> Result<Vec<PatientRecord>> {
    // First validate that it's valid JSON
    let json_value: serde_json::Value = serde_json::from_str(json_str).with_context(|| {
        let preview: String = json_str.chars().take(200).collect();
        format!("Invalid JSON syntax. First 200 chars: {}", preview)
    })?;

    if !json_value.is_array() {
        anyhow::bail!(
            "Expected a JSON array of patient records, found {}",
            json_kind(&json_value)
        );
    }

    let records: Vec<PatientRecord> = serde_path_to_error::deserialize(json_value).map_err(|e| {
        anyhow::anyhow!(
            "Failed to parse patient records at {}: {}",
            e.path(),
            e.inner()
        )
    })?;

    debug!("Parsed {} patient records", records.len());
    Ok(records)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
