//! Export File Reader
//!
//! エクスポートツールが書き出すJSONファイルの読み込み

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Key of the exporter envelope that wraps the actual payload
pub const ENVELOPE_KEY: &str = "mlflow";

/// Read an export JSON file and return its payload.
///
/// Files written by the exporter look like
/// `{"system": {...}, "info": {...}, "mlflow": {...}}`; only the `mlflow`
/// object is returned. Files without the envelope are returned as-is.
pub fn read_export_file(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON in {}", path.display()))?;
    Ok(unwrap_envelope(value))
}

/// Strip the exporter envelope if present
pub fn unwrap_envelope(mut value: Value) -> Value {
    match value.get_mut(ENVELOPE_KEY) {
        Some(payload) if payload.is_object() => payload.take(),
        _ => value,
    }
}
