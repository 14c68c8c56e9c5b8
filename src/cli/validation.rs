//! CLI argument validation functions
//!
//! Custom value parsers for arguments clap cannot check on its own.

use std::fs;
use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::services::notifications::{DeliveryType, Mode};

/// Validate that a file path is accessible (exists and is readable)
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.is_file() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!("Cannot read configuration file '{}': {}", path_str, e)),
    }
}

/// Blank values fall back to `email`
pub fn parse_mode(value: &str) -> Result<Mode, String> {
    Mode::parse_or_default(Some(value)).map_err(|e| e.to_string())
}

/// Blank values fall back to `message`
pub fn parse_delivery_type(value: &str) -> Result<DeliveryType, String> {
    DeliveryType::parse_or_default(Some(value)).map_err(|e| e.to_string())
}

/// Parse `key=value` as a string parameter, or `key:=json` as a JSON one
pub fn parse_template_param(value: &str) -> Result<(String, Value), String> {
    let (key, raw) = value
        .split_once('=')
        .ok_or_else(|| format!("Template parameter must look like key=value, got: '{}'", value))?;

    let (key, parsed) = match key.strip_suffix(':') {
        Some(key) => {
            let parsed = serde_json::from_str::<Value>(raw)
                .map_err(|e| format!("Invalid JSON for template parameter '{}': {}", key, e))?;
            (key, parsed)
        }
        None => (key, Value::String(raw.to_string())),
    };

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("Template parameter key cannot be empty: '{}'", value));
    }

    Ok((key.to_string(), parsed))
}

/// Parse a JSON object of template parameters
pub fn parse_params_json(value: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str::<Value>(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(format!("Template parameters must be a JSON object, got: {}", other)),
        Err(e) => Err(format!("Invalid template parameters JSON: {}", e)),
    }
}
