//! Display-name selection for features.

use geoscene_core::Properties;
use serde_json::Value;

/// Label used when no property qualifies.
pub const FALLBACK_LABEL: &str = "Unclaimed Territory";

/// Picks a human-readable name from a feature's properties.
///
/// Scans entries in document order and returns the first value that is a
/// non-empty ASCII string under a key containing `name` (case-insensitive).
pub fn resolve_label(properties: Option<&Properties>) -> String {
    resolve_label_or(properties, FALLBACK_LABEL)
}

/// Like [`resolve_label`] with a caller-supplied fallback.
pub fn resolve_label_or(properties: Option<&Properties>, fallback: &str) -> String {
    properties
        .into_iter()
        .flat_map(|p| p.iter())
        .find_map(|(key, value)| match value {
            Value::String(s)
                if !s.is_empty() && s.is_ascii() && key.to_lowercase().contains("name") =>
            {
                Some(s.clone())
            }
            _ => None,
        })
        .unwrap_or_else(|| fallback.to_string())
}
