//! JSON Schema generation and validation for figure descriptions

use std::sync::LazyLock;

use schemars::schema_for;
use serde_json::Value;

use crate::config::FigureSpec;

/// Cached JSON Schema for FigureSpec.
static SCHEMA: LazyLock<schemars::Schema> = LazyLock::new(|| schema_for!(FigureSpec));

/// Returns the JSON Schema as a pretty-printed JSON string.
pub fn schema_json_pretty() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&*SCHEMA)
}

/// Validate a JSON value against the FigureSpec schema.
///
/// Returns `Ok(())` if valid, or `Err` with a description of all validation errors.
pub fn validate(value: &Value) -> Result<(), String> {
    let schema_val = serde_json::to_value(&*SCHEMA)
        .map_err(|e| format!("Failed to serialize schema: {}", e))?;
    let validator = jsonschema::validator_for(&schema_val)
        .map_err(|e| format!("Failed to compile schema: {}", e))?;

    let errors: Vec<String> = validator
        .iter_errors(value)
        .map(|e| format!("  - {}: {}", e.instance_path, e))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "Figure description failed schema validation ({} errors):\n{}",
            errors.len(),
            errors.join("\n")
        ))
    }
}
