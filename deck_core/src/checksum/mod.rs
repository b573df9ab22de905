//! Checksum index - duplicate detection for fields flagged unique.
//!
//! The index is derived state. An entry exists for a (fact, field) pair
//! exactly when the model marks the field unique and the fact's value for it
//! is non-empty after HTML stripping. Entries are rewritten on every fact
//! write, purged when a field loses its `unique` flag, and dropped with their
//! fact.

use card_models::{strip_html, Model, ModelId};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::facts::{Fact, FactId};

/// Checksum of a field value, or `None` if it has no visible text.
///
/// The value is reduced to its visible text and hashed with MD5; the
/// checksum is the first 32 bits of the digest.
pub fn field_checksum(value: &str) -> Option<u32> {
    let text = strip_html(value);
    if text.is_empty() {
        return None;
    }
    let digest = Md5::digest(text.as_bytes());
    Some(u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]))
}

/// One indexed unique-field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecksumEntry {
    pub fact_id: FactId,
    pub model_id: ModelId,
    /// Field ordinal within the model.
    pub ord: usize,
    pub checksum: u32,
}

/// Key of the value index: one unique field of one model holding one checksum.
type ValueKey = (ModelId, usize, u32);

#[derive(Debug, Clone, Default)]
pub struct ChecksumIndex {
    entries: HashMap<(FactId, usize), ChecksumEntry>,

    /// Index: Fact -> ordinals it has entries for.
    fact_fields: HashMap<FactId, Vec<usize>>,

    /// Index: (model, ordinal, checksum) -> facts holding that value.
    by_value: HashMap<ValueKey, HashSet<FactId>>,
}

impl ChecksumIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewrite the entries of `fact` against `model`.
    ///
    /// Each field's previous entry is removed first; a new one is stored
    /// only for unique fields with a non-empty value. Returns the number of
    /// entries the fact now has.
    pub fn update_fact(&mut self, fact: &Fact, model: &Model) -> usize {
        self.remove_fact(fact.id);

        let mut stored = 0;
        for ord in model.unique_fields() {
            let Some(checksum) = fact.field_at(ord).and_then(field_checksum) else {
                continue;
            };
            self.insert(ChecksumEntry {
                fact_id: fact.id,
                model_id: model.id,
                ord,
                checksum,
            });
            stored += 1;
        }
        stored
    }

    /// Drop every entry for field `ord` of `model_id`. Returns how many were removed.
    pub fn purge_field(&mut self, model_id: ModelId, ord: usize) -> usize {
        let doomed: Vec<FactId> = self
            .by_value
            .iter()
            .filter(|((m, o, _), _)| *m == model_id && *o == ord)
            .flat_map(|(_, facts)| facts.iter().copied())
            .collect();

        let mut removed = 0;
        for fact_id in doomed {
            if self.remove_entry(fact_id, ord) {
                removed += 1;
            }
        }
        removed
    }

    /// Drop every entry of a fact. Returns how many were removed.
    pub fn remove_fact(&mut self, fact_id: FactId) -> usize {
        let Some(ords) = self.fact_fields.remove(&fact_id) else {
            return 0;
        };
        for &ord in &ords {
            if let Some(entry) = self.entries.remove(&(fact_id, ord)) {
                self.unindex_value(&entry);
            }
        }
        ords.len()
    }

    /// Another fact holding `checksum` in the same model field, if any.
    pub fn find_duplicate(
        &self,
        model_id: ModelId,
        ord: usize,
        checksum: u32,
        except: FactId,
    ) -> Option<FactId> {
        self.by_value
            .get(&(model_id, ord, checksum))?
            .iter()
            .find(|id| **id != except)
            .copied()
    }

    fn insert(&mut self, entry: ChecksumEntry) {
        self.fact_fields
            .entry(entry.fact_id)
            .or_default()
            .push(entry.ord);
        self.by_value
            .entry((entry.model_id, entry.ord, entry.checksum))
            .or_default()
            .insert(entry.fact_id);
        self.entries.insert((entry.fact_id, entry.ord), entry);
    }

    fn remove_entry(&mut self, fact_id: FactId, ord: usize) -> bool {
        let Some(entry) = self.entries.remove(&(fact_id, ord)) else {
            return false;
        };
        self.unindex_value(&entry);
        if let Some(ords) = self.fact_fields.get_mut(&fact_id) {
            ords.retain(|o| *o != ord);
            if ords.is_empty() {
                self.fact_fields.remove(&fact_id);
            }
        }
        true
    }

    fn unindex_value(&mut self, entry: &ChecksumEntry) {
        let key = (entry.model_id, entry.ord, entry.checksum);
        if let Some(facts) = self.by_value.get_mut(&key) {
            facts.remove(&entry.fact_id);
            if facts.is_empty() {
                self.by_value.remove(&key);
            }
        }
    }

    pub fn get(&self, fact_id: FactId, ord: usize) -> Option<u32> {
        self.entries.get(&(fact_id, ord)).map(|e| e.checksum)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChecksumEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
