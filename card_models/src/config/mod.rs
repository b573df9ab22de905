//! Deck configuration, read from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::ModelResult;

/// Settings applied when a deck is created.
///
/// Every key is optional; missing keys fall back to [`DeckConfig::default`].
///
/// ```toml
/// default_group_name = "Default"
/// default_model = "Basic"
/// study_groups = []
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Name of the group every deck starts with (id 1).
    pub default_group_name: String,

    /// Stock note type used by `new_fact`.
    pub default_model: String,

    /// Groups selected for study. Empty means every group is shown.
    pub study_groups: Vec<u32>,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            default_group_name: "Default".to_string(),
            default_model: "Basic".to_string(),
            study_groups: Vec::new(),
        }
    }
}

impl DeckConfig {
    pub fn from_toml_str(text: &str) -> ModelResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ModelResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> ModelResult<String> {
        Ok(toml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ModelError;

    #[test]
    fn test_defaults() {
        let config = DeckConfig::default();
        assert_eq!(config.default_group_name, "Default");
        assert_eq!(config.default_model, "Basic");
        assert!(config.study_groups.is_empty());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = DeckConfig::from_toml_str("default_model = \"Cloze\"\n").unwrap();
        assert_eq!(config.default_model, "Cloze");
        assert_eq!(config.default_group_name, "Default");
    }

    #[test]
    fn test_full_toml() {
        let config = DeckConfig::from_toml_str(
            r#"
            default_group_name = "Inbox"
            default_model = "Basic"
            study_groups = [1, 4]
            "#,
        )
        .unwrap();
        assert_eq!(config.default_group_name, "Inbox");
        assert_eq!(config.study_groups, vec![1, 4]);
    }

    #[test]
    fn test_invalid_toml() {
        let err = DeckConfig::from_toml_str("study_groups = \"all\"").unwrap_err();
        assert!(matches!(err, ModelError::Config(_)));
    }

    #[test]
    fn test_encode_then_parse() {
        let config = DeckConfig {
            default_group_name: "Main".to_string(),
            ..DeckConfig::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(DeckConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = DeckConfig::load("/nonexistent/flashdeck/deck.toml").unwrap_err();
        assert!(matches!(err, ModelError::Io(_)));
    }
}
