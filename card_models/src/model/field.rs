//! Field definitions.

use serde::{Deserialize, Serialize};

/// One named field of a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,

    /// An empty value is reported as a `required` problem.
    #[serde(default)]
    pub required: bool,

    /// Values are indexed by checksum and must not repeat across facts.
    #[serde(default)]
    pub unique: bool,
}

impl FieldDef {
    /// Create an optional, non-unique field.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            unique: false,
        }
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }
}
