//! Stock note types and the registry that hands them out.
//!
//! The registry is an ordinary value built at startup and passed to whatever
//! creates decks, so the set of available note types is explicit and can be
//! extended by callers.

use crate::errors::{ModelError, ModelResult};
use crate::model::{FieldDef, Model, TemplateDef};

/// Builds a fresh copy of a note type. Every call yields a new model id.
pub type ModelBuilder = fn() -> Model;

/// Number of cloze templates generated for the "Cloze" note type.
pub const CLOZE_TEMPLATES: usize = 8;

/// Named note-type builders in registration order.
#[derive(Debug, Clone)]
pub struct StockModels {
    builders: Vec<(String, ModelBuilder)>,
}

impl StockModels {
    /// Create a registry holding the built-in "Basic" and "Cloze" types.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("Basic", basic_model);
        registry.register("Cloze", cloze_model);
        registry
    }

    /// Create a registry with no note types.
    pub fn empty() -> Self {
        Self {
            builders: Vec::new(),
        }
    }

    /// Register a builder, replacing any existing one with the same name.
    pub fn register(&mut self, name: impl Into<String>, builder: ModelBuilder) {
        let name = name.into();
        match self.builders.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = builder,
            None => self.builders.push((name, builder)),
        }
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.builders.iter().map(|(n, _)| n.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.builders.iter().any(|(n, _)| n == name)
    }

    /// Build a new model of the named type.
    pub fn build(&self, name: &str) -> ModelResult<Model> {
        self.builders
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, builder)| builder())
            .ok_or_else(|| ModelError::UnknownModel(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }
}

impl Default for StockModels {
    fn default() -> Self {
        Self::new()
    }
}

/// Front/Back cards with an optional reverse card.
pub fn basic_model() -> Model {
    Model::new("Basic")
        .with_field(FieldDef::new("Front").with_required(true).with_unique(true))
        .with_field(FieldDef::new("Back"))
        .with_template(TemplateDef::new("Forward", "{{Front}}", "{{Back}}"))
        .with_template(TemplateDef::new("Reverse", "{{Back}}", "{{Front}}").with_active(false))
}

/// Cloze deletions over a single text field.
pub fn cloze_model() -> Model {
    let mut model = Model::new("Cloze")
        .with_field(FieldDef::new("Text").with_required(true).with_unique(true))
        .with_field(FieldDef::new("Notes"));

    for n in 1..=CLOZE_TEMPLATES {
        model.templates.push(TemplateDef::new(
            format!("Cloze {n}"),
            format!("{{{{#cloze:{n}:Text}}}}<br>{{{{cloze:{n}:Text}}}}<br>{{{{/cloze:{n}:Text}}}}"),
            format!("{{{{cloze:{n}:Text}}}}<br>{{{{Notes}}}}"),
        ));
    }
    model
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry() {
        let stock = StockModels::new();
        assert_eq!(stock.names().collect::<Vec<_>>(), vec!["Basic", "Cloze"]);
        assert!(stock.contains("Cloze"));
        assert!(!stock.contains("Image Occlusion"));
    }

    #[test]
    fn test_basic_model() {
        let model = StockModels::new().build("Basic").unwrap();
        assert_eq!(model.name, "Basic");
        assert_eq!(model.field_names().collect::<Vec<_>>(), vec!["Front", "Back"]);
        assert!(model.fields[0].required && model.fields[0].unique);
        assert!(!model.fields[1].required && !model.fields[1].unique);

        assert_eq!(model.templates.len(), 2);
        assert_eq!(model.templates[1].name, "Reverse");
        assert_eq!(model.templates[1].question_format, "{{Back}}");
        assert!(!model.templates[1].active);
        assert_eq!(model.active_templates().count(), 1);
    }

    #[test]
    fn test_cloze_model() {
        let model = cloze_model();
        assert_eq!(model.field_names().collect::<Vec<_>>(), vec!["Text", "Notes"]);
        assert_eq!(model.templates.len(), CLOZE_TEMPLATES);
        assert_eq!(model.templates[2].name, "Cloze 3");
        assert_eq!(
            model.templates[2].question_format,
            "{{#cloze:3:Text}}<br>{{cloze:3:Text}}<br>{{/cloze:3:Text}}"
        );
        assert_eq!(model.templates[2].answer_format, "{{cloze:3:Text}}<br>{{Notes}}");
        assert!(model.templates.iter().all(|t| t.active));
    }

    #[test]
    fn test_builds_are_independent() {
        let stock = StockModels::new();
        let a = stock.build("Basic").unwrap();
        let b = stock.build("Basic").unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_register_and_replace() {
        fn definitions() -> Model {
            Model::new("Definitions").with_field(FieldDef::new("Term"))
        }
        fn definitions_v2() -> Model {
            Model::new("Definitions v2").with_field(FieldDef::new("Term"))
        }

        let mut stock = StockModels::empty();
        assert!(stock.is_empty());

        stock.register("Definitions", definitions);
        stock.register("Definitions", definitions_v2);
        assert_eq!(stock.len(), 1);
        assert_eq!(stock.build("Definitions").unwrap().name, "Definitions v2");
    }

    #[test]
    fn test_unknown_model() {
        let err = StockModels::new().build("Missing").unwrap_err();
        assert!(matches!(err, ModelError::UnknownModel(name) if name == "Missing"));
    }
}
