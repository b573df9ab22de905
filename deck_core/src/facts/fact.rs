//! Fact definitions - the notes a deck stores.

use card_models::{Model, ModelId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DeckError, DeckResult};

/// Unique identifier for facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FactId(pub Uuid);

impl FactId {
    /// Create a new random fact ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FactId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fact holds one value per field of its model, plus a set of tags.
///
/// The field layout is fixed when the fact is created from its model. Values
/// can be read and written by name, but a name the model does not declare is
/// rejected with [`DeckError::UnknownField`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fact {
    pub id: FactId,

    /// Model this fact was created from.
    pub model_id: ModelId,

    /// (field name, value) pairs in the model's field order.
    fields: Vec<(String, String)>,

    /// Tags, canonicalized when the fact is written to a deck.
    pub tags: Vec<String>,
}

impl Fact {
    /// Create an empty fact with the field layout of `model`.
    pub fn new(model: &Model) -> Self {
        Self {
            id: FactId::new(),
            model_id: model.id,
            fields: model
                .field_names()
                .map(|name| (name.to_string(), String::new()))
                .collect(),
            tags: Vec::new(),
        }
    }

    /// Set a field value, consuming and returning the fact.
    pub fn with_field(mut self, name: &str, value: impl Into<String>) -> DeckResult<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Replace the fact's tags.
    pub fn with_tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Get a field value by name.
    pub fn get(&self, name: &str) -> DeckResult<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.as_str())
            .ok_or_else(|| DeckError::UnknownField(name.to_string()))
    }

    /// Set a field value by name.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> DeckResult<()> {
        let slot = self
            .fields
            .iter_mut()
            .find(|(n, _)| n == name)
            .ok_or_else(|| DeckError::UnknownField(name.to_string()))?;
        slot.1 = value.into();
        Ok(())
    }

    /// Get a field value by ordinal.
    pub fn field_at(&self, ord: usize) -> Option<&str> {
        self.fields.get(ord).map(|(_, value)| value.as_str())
    }

    /// Iterate over (name, value) pairs in field order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Check if this fact has a specific tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Whether this fact's field layout matches `model`.
    pub fn matches_model(&self, model: &Model) -> bool {
        self.model_id == model.id
            && self.fields.len() == model.fields.len()
            && self
                .fields
                .iter()
                .zip(model.field_names())
                .all(|((name, _), expected)| name == expected)
    }
}
