//! Engine configuration types.
//!
//! This module centralizes the tunable knobs of the fusion pipeline:
//! per-recognizer deadlines, the text-validation heuristics, and the output
//! bounds of the selection engine. Every field has a serde default so a
//! configuration can be loaded from partial JSON, and builder-style
//! `with_*` methods support programmatic construction.

use crate::core::errors::{VisionError, VisionResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Centralized configuration for the classification engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Independent deadline for each recognizer invocation, in milliseconds.
    /// Exceeding it is treated identically to a recognizer call failure.
    /// Default: 10000
    #[serde(default = "EngineConfig::default_recognizer_timeout_ms")]
    pub recognizer_timeout_ms: u64,

    /// Minimum character count for a textual candidate to be considered
    /// during name selection (shorter candidates are rejected outright).
    /// Default: 5
    #[serde(default = "EngineConfig::default_min_text_len")]
    pub min_text_len: usize,

    /// Case-insensitive phrases marking a textual candidate as a no-result
    /// artifact (e.g., an OCR backend's own "not found" message).
    /// Default: ["not found", "no item"]
    #[serde(default = "EngineConfig::default_denylist")]
    pub denylist: Vec<String>,

    /// How many of the top sorted visual candidates a textual candidate is
    /// cross-validated against. Deliberately generous to keep recall high.
    /// Default: 10
    #[serde(default = "EngineConfig::default_validation_pool")]
    pub validation_pool: usize,

    /// Maximum number of tags in a classification result.
    /// Default: 5
    #[serde(default = "EngineConfig::default_max_tags")]
    pub max_tags: usize,

    /// Name used when no recognizer yields a usable candidate.
    /// Default: "New Item"
    #[serde(default = "EngineConfig::default_placeholder_name")]
    pub placeholder_name: String,
}

impl EngineConfig {
    /// Create a new EngineConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration from a JSON string.
    ///
    /// Missing fields fall back to their documented defaults.
    pub fn from_json(json: &str) -> VisionResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| VisionError::config_error(format!("invalid engine config: {e}")))
    }

    /// Set the per-recognizer deadline.
    pub fn with_recognizer_timeout(mut self, timeout: Duration) -> Self {
        self.recognizer_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Set the minimum textual candidate length.
    pub fn with_min_text_len(mut self, len: usize) -> Self {
        self.min_text_len = len;
        self
    }

    /// Set the no-result denylist phrases.
    pub fn with_denylist(mut self, denylist: Vec<String>) -> Self {
        self.denylist = denylist;
        self
    }

    /// Set the cross-validation pool size.
    pub fn with_validation_pool(mut self, size: usize) -> Self {
        self.validation_pool = size;
        self
    }

    /// Set the maximum number of output tags.
    pub fn with_max_tags(mut self, max_tags: usize) -> Self {
        self.max_tags = max_tags;
        self
    }

    /// Set the placeholder name used when no candidate survives.
    pub fn with_placeholder_name(mut self, name: impl Into<String>) -> Self {
        self.placeholder_name = name.into();
        self
    }

    /// The per-recognizer deadline as a `Duration`.
    pub fn recognizer_timeout(&self) -> Duration {
        Duration::from_millis(self.recognizer_timeout_ms)
    }

    /// Default value for the per-recognizer deadline.
    fn default_recognizer_timeout_ms() -> u64 {
        10_000
    }

    /// Default value for the minimum textual candidate length.
    fn default_min_text_len() -> usize {
        5
    }

    /// Default no-result denylist.
    fn default_denylist() -> Vec<String> {
        vec!["not found".to_string(), "no item".to_string()]
    }

    /// Default cross-validation pool size.
    fn default_validation_pool() -> usize {
        10
    }

    /// Default tag bound.
    fn default_max_tags() -> usize {
        5
    }

    /// Default placeholder name.
    fn default_placeholder_name() -> String {
        "New Item".to_string()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            recognizer_timeout_ms: Self::default_recognizer_timeout_ms(),
            min_text_len: Self::default_min_text_len(),
            denylist: Self::default_denylist(),
            validation_pool: Self::default_validation_pool(),
            max_tags: Self::default_max_tags(),
            placeholder_name: Self::default_placeholder_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = EngineConfig::default();
        assert_eq!(config.recognizer_timeout(), Duration::from_secs(10));
        assert_eq!(config.min_text_len, 5);
        assert_eq!(config.denylist, vec!["not found", "no item"]);
        assert_eq!(config.validation_pool, 10);
        assert_eq!(config.max_tags, 5);
        assert_eq!(config.placeholder_name, "New Item");
    }

    #[test]
    fn test_builder_methods() {
        let config = EngineConfig::new()
            .with_recognizer_timeout(Duration::from_millis(250))
            .with_min_text_len(3)
            .with_max_tags(2)
            .with_placeholder_name("Unknown");
        assert_eq!(config.recognizer_timeout_ms, 250);
        assert_eq!(config.min_text_len, 3);
        assert_eq!(config.max_tags, 2);
        assert_eq!(config.placeholder_name, "Unknown");
    }

    #[test]
    fn test_from_json_partial_fields_use_defaults() {
        let config = EngineConfig::from_json(r#"{ "max_tags": 3 }"#).unwrap();
        assert_eq!(config.max_tags, 3);
        assert_eq!(config.min_text_len, 5);
        assert_eq!(config.placeholder_name, "New Item");
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        let error = EngineConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(error, VisionError::ConfigError { .. }));
    }
}
