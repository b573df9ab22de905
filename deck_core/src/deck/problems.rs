//! Per-field validation of facts.

use card_models::Model;
use serde::{Deserialize, Serialize};

use crate::checksum::{field_checksum, ChecksumIndex};
use crate::facts::Fact;

/// The kind of constraint a field value violates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProblemKind {
    /// A unique field's value is already held by another fact.
    Unique,
    /// A required field is empty.
    Required,
}

impl ProblemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemKind::Unique => "unique",
            ProblemKind::Required => "required",
        }
    }
}

impl std::fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A violated constraint on one field of a fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldProblem {
    pub ord: usize,
    pub field: String,
    pub kind: ProblemKind,
}

impl std::fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.kind)
    }
}

/// Check every field of `fact`, in declaration order.
pub(crate) fn check_fact(fact: &Fact, model: &Model, checksums: &ChecksumIndex) -> Vec<FieldProblem> {
    let mut problems = Vec::new();

    for (ord, def) in model.fields.iter().enumerate() {
        let value = fact.field_at(ord).unwrap_or_default();

        let kind = if def.required && value.trim().is_empty() {
            Some(ProblemKind::Required)
        } else if def.unique {
            field_checksum(value)
                .and_then(|sum| checksums.find_duplicate(model.id, ord, sum, fact.id))
                .map(|_| ProblemKind::Unique)
        } else {
            None
        };

        if let Some(kind) = kind {
            problems.push(FieldProblem {
                ord,
                field: def.name.clone(),
                kind,
            });
        }
    }

    problems
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_models::basic_model;

    #[test]
    fn test_kind_names() {
        assert_eq!(ProblemKind::Unique.to_string(), "unique");
        assert_eq!(ProblemKind::Required.as_str(), "required");
    }

    #[test]
    fn test_clean_fact_has_no_problems() {
        let model = basic_model();
        let fact = Fact::new(&model).with_field("Front", "one").unwrap();
        assert!(check_fact(&fact, &model, &ChecksumIndex::new()).is_empty());
    }

    #[test]
    fn test_problems_in_field_order() {
        let mut model = basic_model();
        model.fields[1].required = true;

        let mut index = ChecksumIndex::new();
        let existing = Fact::new(&model).with_field("Front", "one").unwrap();
        index.update_fact(&existing, &model);

        let fact = Fact::new(&model).with_field("Front", "one").unwrap();
        let problems = check_fact(&fact, &model, &index);
        let kinds: Vec<_> = problems.iter().map(|p| p.kind.as_str()).collect();
        assert_eq!(kinds, vec!["unique", "required"]);
        assert_eq!(problems[1].field, "Back");
        assert_eq!(problems[0].to_string(), "Front: unique");
    }

    #[test]
    fn test_repeated_plain_field_is_not_a_problem() {
        let model = basic_model();
        assert!(!model.fields[1].unique && !model.fields[1].required);

        let mut index = ChecksumIndex::new();
        let existing = Fact::new(&model)
            .with_field("Front", "one")
            .unwrap()
            .with_field("Back", "same")
            .unwrap();
        index.update_fact(&existing, &model);

        let fact = Fact::new(&model)
            .with_field("Front", "two")
            .unwrap()
            .with_field("Back", "same")
            .unwrap();
        assert!(check_fact(&fact, &model, &index).is_empty());
    }

    #[test]
    fn test_blank_required_field() {
        let model = basic_model();
        let fact = Fact::new(&model).with_field("Front", "  ").unwrap();
        let problems = check_fact(&fact, &model, &ChecksumIndex::new());
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].kind, ProblemKind::Required);
        assert_eq!(problems[0].ord, 0);
    }
}
