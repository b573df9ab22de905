//! Model definitions - the note types facts are built from.

mod field;
mod template;

pub use field::*;
pub use template::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ModelError, ModelResult};

/// Unique identifier for models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelId(pub Uuid);

impl ModelId {
    /// Create a new random model ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a model ID from a specific UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ModelId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A note type: an ordered field list plus the card templates built from it.
///
/// Field and template order is significant. A field's position is its
/// ordinal, which is how facts, checksum entries and cards refer to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    pub id: ModelId,
    pub name: String,
    pub fields: Vec<FieldDef>,
    pub templates: Vec<TemplateDef>,
}

impl Model {
    /// Create an empty model with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ModelId::new(),
            name: name.into(),
            fields: Vec::new(),
            templates: Vec::new(),
        }
    }

    /// Append a field definition.
    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Append a card template.
    pub fn with_template(mut self, template: TemplateDef) -> Self {
        self.templates.push(template);
        self
    }

    /// Ordinal of the named field, if the model declares it.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Ordinal of the named field, failing with `UnknownField` otherwise.
    pub fn require_field(&self, name: &str) -> ModelResult<usize> {
        self.field_index(name).ok_or_else(|| ModelError::UnknownField {
            model: self.name.clone(),
            field: name.to_string(),
        })
    }

    /// Get a field definition by name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Templates that generate cards, with their ordinals.
    pub fn active_templates(&self) -> impl Iterator<Item = (usize, &TemplateDef)> {
        self.templates.iter().enumerate().filter(|(_, t)| t.active)
    }

    /// Ordinals of the fields flagged unique.
    pub fn unique_fields(&self) -> impl Iterator<Item = usize> + '_ {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.unique)
            .map(|(ord, _)| ord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Model {
        Model::new("Vocab")
            .with_field(FieldDef::new("Word").with_required(true).with_unique(true))
            .with_field(FieldDef::new("Meaning"))
            .with_field(FieldDef::new("Example").with_unique(true))
            .with_template(TemplateDef::new("Recognition", "{{Word}}", "{{Meaning}}"))
            .with_template(
                TemplateDef::new("Recall", "{{Meaning}}", "{{Word}}").with_active(false),
            )
    }

    #[test]
    fn test_field_lookup() {
        let model = sample();
        assert_eq!(model.field_index("Meaning"), Some(1));
        assert_eq!(model.field_index("meaning"), None);
        assert!(model.field("Word").unwrap().required);
        assert_eq!(
            model.field_names().collect::<Vec<_>>(),
            vec!["Word", "Meaning", "Example"]
        );
    }

    #[test]
    fn test_require_field_error() {
        let model = sample();
        assert_eq!(model.require_field("Example").unwrap(), 2);

        let err = model.require_field("Reading").unwrap_err();
        assert!(matches!(err, ModelError::UnknownField { ref field, .. } if field == "Reading"));
        assert_eq!(err.to_string(), "model `Vocab` has no field named `Reading`");
    }

    #[test]
    fn test_active_templates() {
        let mut model = sample();
        let active: Vec<_> = model.active_templates().map(|(ord, _)| ord).collect();
        assert_eq!(active, vec![0]);

        model.templates[1].active = true;
        assert_eq!(model.active_templates().count(), 2);
    }

    #[test]
    fn test_unique_fields() {
        let model = sample();
        assert_eq!(model.unique_fields().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn test_model_ids_are_distinct() {
        assert_ne!(Model::new("A").id, Model::new("A").id);
    }
}
