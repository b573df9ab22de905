//! Deck - the store holding models, facts, cards and groups.
//!
//! All mutation goes through `&mut Deck`, so there is a single writer at any
//! time. Every operation either completes or leaves the deck untouched:
//! fallible checks run before the first write. `commit` and `rollback` mark
//! and restore checkpoints across operations.

mod problems;

pub use problems::*;
use problems::check_fact;

use card_models::{DeckConfig, Model, ModelId, StockModels};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

use crate::checksum::ChecksumIndex;
use crate::errors::{DeckError, DeckResult};
use crate::facts::{
    canonify_tags, join_tags, merge_tags, parse_tags, remove_tags, Card, CardId, Fact, FactId,
};
use crate::groups::{Group, GroupId, GroupRegistry};
use crate::selector::{select_fact_ids, TagQuery};

/// Outcome of deleting a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardDeletion {
    /// The card was its fact's last, so the fact was deleted too.
    pub fact_deleted: bool,
}

/// Everything a checkpoint captures.
#[derive(Debug, Clone)]
struct DeckState {
    models: HashMap<ModelId, Model>,
    current_model: ModelId,
    facts: HashMap<FactId, Fact>,
    cards: HashMap<CardId, Card>,
    /// Index: Fact -> its cards.
    fact_cards: HashMap<FactId, Vec<CardId>>,
    checksums: ChecksumIndex,
    groups: GroupRegistry,
    study_groups: Vec<GroupId>,
}

#[derive(Debug)]
pub struct Deck {
    config: DeckConfig,
    state: DeckState,
    checkpoint: DeckState,
}

impl Deck {
    /// Create an empty deck holding one model per registered stock type.
    pub fn new(config: DeckConfig, stock: &StockModels) -> DeckResult<Self> {
        let mut models = HashMap::new();
        let mut current_model = None;
        for name in stock.names() {
            let model = stock.build(name)?;
            if name == config.default_model {
                current_model = Some(model.id);
            }
            models.insert(model.id, model);
        }
        let current_model = current_model
            .ok_or_else(|| card_models::ModelError::UnknownModel(config.default_model.clone()))?;

        let groups = GroupRegistry::new(config.default_group_name.as_str());
        let study_groups: Vec<_> = config.study_groups.iter().copied().map(GroupId).collect();
        if let Some(missing) = study_groups.iter().find(|id| !groups.contains(**id)) {
            return Err(DeckError::UnknownGroup(*missing));
        }

        let state = DeckState {
            models,
            current_model,
            facts: HashMap::new(),
            cards: HashMap::new(),
            fact_cards: HashMap::new(),
            checksums: ChecksumIndex::new(),
            groups,
            study_groups,
        };
        debug!(models = state.models.len(), "created deck");

        Ok(Self {
            config,
            checkpoint: state.clone(),
            state,
        })
    }

    /// Create a deck with the default configuration and stock note types.
    pub fn with_defaults() -> DeckResult<Self> {
        Self::new(DeckConfig::default(), &StockModels::new())
    }

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Transactions
    // ------------------------------------------------------------------

    /// Make all changes since the last checkpoint permanent.
    pub fn commit(&mut self) {
        self.checkpoint = self.state.clone();
        debug!(facts = self.state.facts.len(), cards = self.state.cards.len(), "committed");
    }

    /// Discard all changes since the last checkpoint.
    pub fn rollback(&mut self) {
        self.state = self.checkpoint.clone();
        info!(facts = self.state.facts.len(), cards = self.state.cards.len(), "rolled back");
    }

    // ------------------------------------------------------------------
    // Models
    // ------------------------------------------------------------------

    /// Model used by [`Deck::new_fact`].
    pub fn current_model(&self) -> &Model {
        &self.state.models[&self.state.current_model]
    }

    pub fn set_current_model(&mut self, id: ModelId) -> DeckResult<()> {
        if !self.state.models.contains_key(&id) {
            return Err(DeckError::UnknownModel(id));
        }
        self.state.current_model = id;
        Ok(())
    }

    pub fn model(&self, id: ModelId) -> Option<&Model> {
        self.state.models.get(&id)
    }

    /// Find a model by name.
    pub fn model_named(&self, name: &str) -> Option<&Model> {
        self.state.models.values().find(|m| m.name == name)
    }

    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.state.models.values()
    }

    /// Add a new model to the deck.
    pub fn add_model(&mut self, model: Model) -> ModelId {
        let id = model.id;
        self.state.models.insert(id, model);
        id
    }

    /// Store edits to a model.
    ///
    /// Fields cannot be added, removed or renamed. A field whose `unique`
    /// flag was cleared loses its checksum entries immediately; setting the
    /// flag does not index existing facts until they are next written.
    pub fn update_model(&mut self, model: Model) -> DeckResult<()> {
        let old = self
            .state
            .models
            .get(&model.id)
            .ok_or(DeckError::UnknownModel(model.id))?;
        let same_layout = old.fields.len() == model.fields.len()
            && old.field_names().eq(model.field_names());
        if !same_layout {
            return Err(DeckError::ModelMismatch(model.id));
        }

        let cleared: Vec<usize> = old
            .fields
            .iter()
            .zip(&model.fields)
            .enumerate()
            .filter(|(_, (before, after))| before.unique && !after.unique)
            .map(|(ord, _)| ord)
            .collect();

        for &ord in &cleared {
            let purged = self.state.checksums.purge_field(model.id, ord);
            debug!(model = %model.id, ord, purged, "unique flag cleared");
        }

        info!(model = %model.id, name = %model.name, "updated model");
        self.state.models.insert(model.id, model);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Facts
    // ------------------------------------------------------------------

    /// Create an empty fact of the current model. It is not stored until
    /// passed to [`Deck::add_fact`].
    pub fn new_fact(&self) -> Fact {
        Fact::new(self.current_model())
    }

    /// Create an empty fact of a specific model.
    pub fn new_fact_for(&self, model_id: ModelId) -> DeckResult<Fact> {
        self.model(model_id)
            .map(Fact::new)
            .ok_or(DeckError::UnknownModel(model_id))
    }

    /// Add a fact, generating one card per active template.
    ///
    /// Returns the number of cards generated. A fact whose model has no
    /// active template produces no cards and is not stored.
    pub fn add_fact(&mut self, mut fact: Fact) -> DeckResult<usize> {
        if self.state.facts.contains_key(&fact.id) {
            return Err(DeckError::AlreadyAdded(fact.id));
        }
        let state = &mut self.state;
        let model = model_for(&state.models, &fact)?;

        fact.tags = canonify_tags(&fact.tags);
        let cards: Vec<Card> = model
            .active_templates()
            .map(|(ord, template)| Card::generate(&fact, ord, template, GroupId::DEFAULT))
            .collect();
        if cards.is_empty() {
            warn!(fact = %fact.id, model = %model.name, "no active templates, fact not added");
            return Ok(0);
        }

        let sums = state.checksums.update_fact(&fact, model);
        let count = cards.len();
        state
            .fact_cards
            .insert(fact.id, cards.iter().map(|c| c.id).collect());
        for card in cards {
            state.cards.insert(card.id, card);
        }
        debug!(fact = %fact.id, cards = count, checksums = sums, "added fact");
        state.facts.insert(fact.id, fact);
        Ok(count)
    }

    /// Write back edits to a stored fact.
    ///
    /// Tags are canonicalized, the card texts re-rendered and the checksum
    /// entries rewritten.
    pub fn update_fact(&mut self, fact: &Fact) -> DeckResult<()> {
        if !self.state.facts.contains_key(&fact.id) {
            return Err(DeckError::UnknownFact(fact.id));
        }
        let mut fact = fact.clone();
        fact.tags = canonify_tags(&fact.tags);

        let state = &mut self.state;
        let model = model_for(&state.models, &fact)?;

        for card_id in state.fact_cards.get(&fact.id).into_iter().flatten() {
            if let Some(card) = state.cards.get_mut(card_id) {
                if let Some(template) = model.templates.get(card.ord) {
                    card.render(&fact, template);
                }
            }
        }
        let sums = state.checksums.update_fact(&fact, model);
        debug!(fact = %fact.id, checksums = sums, "updated fact");
        state.facts.insert(fact.id, fact);
        Ok(())
    }

    pub fn fact(&self, id: FactId) -> Option<&Fact> {
        self.state.facts.get(&id)
    }

    /// A fresh copy of the stored fact, for editing.
    pub fn load_fact(&self, id: FactId) -> DeckResult<Fact> {
        self.fact(id).cloned().ok_or(DeckError::UnknownFact(id))
    }

    pub fn facts(&self) -> impl Iterator<Item = &Fact> {
        self.state.facts.values()
    }

    /// Delete a fact with all of its cards. Returns the number of cards removed.
    pub fn del_fact(&mut self, id: FactId) -> DeckResult<usize> {
        if self.state.facts.remove(&id).is_none() {
            return Err(DeckError::UnknownFact(id));
        }
        let card_ids = self.state.fact_cards.remove(&id).unwrap_or_default();
        for card_id in &card_ids {
            self.state.cards.remove(card_id);
        }
        self.state.checksums.remove_fact(id);
        debug!(fact = %id, cards = card_ids.len(), "deleted fact");
        Ok(card_ids.len())
    }

    /// Validate a fact against its model and the stored facts.
    ///
    /// Problems are listed in field order, at most one per field.
    pub fn problems(&self, fact: &Fact) -> DeckResult<Vec<FieldProblem>> {
        let model = model_for(&self.state.models, fact)?;
        Ok(check_fact(fact, model, &self.state.checksums))
    }

    pub fn fact_count(&self) -> usize {
        self.state.facts.len()
    }

    /// The checksum index over unique fields.
    pub fn checksums(&self) -> &ChecksumIndex {
        &self.state.checksums
    }

    // ------------------------------------------------------------------
    // Cards
    // ------------------------------------------------------------------

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.state.cards.get(&id)
    }

    /// Cards of a fact, ordered by template.
    pub fn cards_of_fact(&self, id: FactId) -> Vec<&Card> {
        let mut cards: Vec<&Card> = self
            .state
            .fact_cards
            .get(&id)
            .map(|ids| ids.iter().filter_map(|c| self.state.cards.get(c)).collect())
            .unwrap_or_default();
        cards.sort_by_key(|c| c.ord);
        cards
    }

    /// Delete a card. Deleting a fact's last card deletes the fact.
    pub fn del_card(&mut self, id: CardId) -> DeckResult<CardDeletion> {
        let card = self
            .state
            .cards
            .remove(&id)
            .ok_or(DeckError::UnknownCard(id))?;

        let remaining = match self.state.fact_cards.get_mut(&card.fact_id) {
            Some(ids) => {
                ids.retain(|c| *c != id);
                ids.len()
            }
            None => 0,
        };

        let fact_deleted = remaining == 0;
        if fact_deleted {
            self.state.fact_cards.remove(&card.fact_id);
            self.state.facts.remove(&card.fact_id);
            self.state.checksums.remove_fact(card.fact_id);
        }
        debug!(card = %id, fact = %card.fact_id, fact_deleted, "deleted card");
        Ok(CardDeletion { fact_deleted })
    }

    pub fn card_count(&self) -> usize {
        self.state.cards.len()
    }

    /// Number of cards in a group.
    pub fn cards_in_group(&self, group: GroupId) -> usize {
        self.state.cards.values().filter(|c| c.group == group).count()
    }

    // ------------------------------------------------------------------
    // Groups
    // ------------------------------------------------------------------

    /// All groups, in id order.
    pub fn groups(&self) -> Vec<&Group> {
        self.state.groups.iter().collect()
    }

    /// Id of the named group, creating it if absent.
    pub fn group_id(&mut self, name: &str) -> GroupId {
        self.state.groups.id_for(name)
    }

    /// Delete a group. Its cards move to the default group.
    pub fn del_group(&mut self, id: GroupId) -> DeckResult<()> {
        let group = self.state.groups.remove(id)?;

        let mut moved = 0;
        for card in self.state.cards.values_mut().filter(|c| c.group == id) {
            card.group = GroupId::DEFAULT;
            moved += 1;
        }
        self.state.study_groups.retain(|g| *g != id);
        info!(group = %id, name = %group.name, moved, "deleted group");
        Ok(())
    }

    /// Groups selected for study. Empty means every group is shown.
    pub fn study_groups(&self) -> &[GroupId] {
        &self.state.study_groups
    }

    pub fn set_study_groups(&mut self, groups: Vec<GroupId>) -> DeckResult<()> {
        if let Some(missing) = groups.iter().find(|id| !self.state.groups.contains(**id)) {
            return Err(DeckError::UnknownGroup(*missing));
        }
        self.state.study_groups = groups;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Tags
    // ------------------------------------------------------------------

    /// Add whitespace-separated `tags` to each fact.
    ///
    /// Tags already present are left alone. Returns the number of facts
    /// whose tags changed.
    pub fn add_tags(&mut self, ids: &[FactId], tags: &str) -> DeckResult<usize> {
        self.edit_tags(ids, tags, merge_tags)
    }

    /// Remove whitespace-separated `tags` from each fact.
    pub fn del_tags(&mut self, ids: &[FactId], tags: &str) -> DeckResult<usize> {
        self.edit_tags(ids, tags, remove_tags)
    }

    fn edit_tags(
        &mut self,
        ids: &[FactId],
        tags: &str,
        edit: fn(&mut Vec<String>, &[String]) -> bool,
    ) -> DeckResult<usize> {
        if let Some(missing) = ids.iter().find(|id| !self.state.facts.contains_key(*id)) {
            return Err(DeckError::UnknownFact(*missing));
        }
        let tags = canonify_tags(parse_tags(tags));
        if tags.is_empty() {
            return Ok(0);
        }

        let mut changed = 0;
        for id in ids {
            if let Some(fact) = self.state.facts.get_mut(id) {
                if edit(&mut fact.tags, &tags) {
                    changed += 1;
                }
            }
        }
        debug!(facts = ids.len(), changed, tags = %join_tags(tags.as_slice()), "edited tags");
        Ok(changed)
    }

    /// Ids of facts matching the tag query.
    pub fn sel_tag_fids(&self, query: &TagQuery) -> HashSet<FactId> {
        select_fact_ids(self.state.facts.values(), query)
    }

    /// Move every card of every fact matching `query` into `group`.
    ///
    /// Returns the number of cards moved. The group must exist; otherwise
    /// nothing changes.
    pub fn set_group_for_tags(&mut self, query: &TagQuery, group: GroupId) -> DeckResult<usize> {
        if !self.state.groups.contains(group) {
            return Err(DeckError::UnknownGroup(group));
        }
        let fact_ids = self.sel_tag_fids(query);

        let mut moved = 0;
        for card in self
            .state
            .cards
            .values_mut()
            .filter(|c| fact_ids.contains(&c.fact_id))
        {
            card.group = group;
            moved += 1;
        }
        info!(group = %group, facts = fact_ids.len(), cards = moved, "reassigned cards by tags");
        Ok(moved)
    }
}

/// The stored model of `fact`, checked against the fact's field layout.
fn model_for<'a>(models: &'a HashMap<ModelId, Model>, fact: &Fact) -> DeckResult<&'a Model> {
    let model = models
        .get(&fact.model_id)
        .ok_or(DeckError::UnknownModel(fact.model_id))?;
    if !fact.matches_model(model) {
        return Err(DeckError::ModelMismatch(model.id));
    }
    Ok(model)
}
