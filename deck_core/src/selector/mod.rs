//! Tag selector - picks facts by required and excluded tags.
//!
//! Selection is a pure read over the stored facts. Bulk updates built on it
//! (such as moving the selected facts' cards to a group) live on `Deck`.

mod query;

pub use query::*;

use std::collections::HashSet;

use crate::facts::{Fact, FactId};

/// Ids of the facts matching `query`.
pub fn select_fact_ids<'a>(
    facts: impl IntoIterator<Item = &'a Fact>,
    query: &TagQuery,
) -> HashSet<FactId> {
    if query.is_empty() {
        return HashSet::new();
    }
    facts
        .into_iter()
        .filter(|fact| query.matches(&fact.tags))
        .map(|fact| fact.id)
        .collect()
}
