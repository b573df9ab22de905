//! Card definitions.

use card_models::TemplateDef;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Fact, FactId};
use crate::groups::GroupId;

/// Unique identifier for cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub Uuid);

impl CardId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A question/answer pair generated from one template of a fact's model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub fact_id: FactId,

    /// Ordinal of the template this card was generated from.
    pub ord: usize,

    /// Group the card is studied in.
    pub group: GroupId,

    /// Rendered question text.
    pub question: String,

    /// Rendered answer text.
    pub answer: String,
}

impl Card {
    /// Generate a card for `fact` from the template at `ord`.
    pub fn generate(fact: &Fact, ord: usize, template: &TemplateDef, group: GroupId) -> Self {
        let mut card = Self {
            id: CardId::new(),
            fact_id: fact.id,
            ord,
            group,
            question: String::new(),
            answer: String::new(),
        };
        card.render(fact, template);
        card
    }

    /// Re-render question and answer from the fact's current values.
    pub fn render(&mut self, fact: &Fact, template: &TemplateDef) {
        self.question = template.render_question(|name| fact.get(name).ok());
        self.answer = template.render_answer(|name| fact.get(name).ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_models::basic_model;

    #[test]
    fn test_generate_card() {
        let model = basic_model();
        let fact = Fact::new(&model)
            .with_field("Front", "<b>one</b>")
            .unwrap()
            .with_field("Back", "two")
            .unwrap();

        let card = Card::generate(&fact, 1, &model.templates[1], GroupId::DEFAULT);
        assert_eq!(card.fact_id, fact.id);
        assert_eq!(card.ord, 1);
        assert_eq!(card.group, GroupId::DEFAULT);
        assert_eq!(card.question, "two");
        assert_eq!(card.answer, "<b>one</b>");
    }

    #[test]
    fn test_render_follows_edits() {
        let model = basic_model();
        let mut fact = Fact::new(&model).with_field("Front", "cat").unwrap();
        let mut card = Card::generate(&fact, 0, &model.templates[0], GroupId::DEFAULT);
        assert_eq!(card.question, "cat");

        fact.set("Front", "dog").unwrap();
        card.render(&fact, &model.templates[0]);
        assert_eq!(card.question, "dog");
    }
}
