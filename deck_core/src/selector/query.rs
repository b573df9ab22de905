//! Tag queries for the selector.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::facts::fold_tag;

/// Required and excluded tag sets.
///
/// A fact matches when it carries at least one required tag (any fact is a
/// candidate if none are required) and none of the excluded tags. A query
/// with both sets empty matches nothing.
///
/// Query tags are folded the same way stored tags are, so matching itself is
/// an exact comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagQuery {
    pub required: HashSet<String>,
    pub excluded: HashSet<String>,
}

impl TagQuery {
    /// Create a query from required and excluded tags.
    pub fn new<S: Into<String>>(
        required: impl IntoIterator<Item = S>,
        excluded: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            required: fold_all(required),
            excluded: fold_all(excluded),
        }
    }

    /// Query for facts carrying any of `tags`.
    pub fn any_of<S: Into<String>>(tags: impl IntoIterator<Item = S>) -> Self {
        Self {
            required: fold_all(tags),
            excluded: HashSet::new(),
        }
    }

    /// Add excluded tags.
    pub fn excluding<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.excluded.extend(fold_all(tags));
        self
    }

    /// True when neither required nor excluded tags are given.
    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.excluded.is_empty()
    }

    /// Check a fact's tags against the query.
    pub fn matches(&self, tags: &[String]) -> bool {
        if self.is_empty() {
            return false;
        }
        let wanted = self.required.is_empty() || tags.iter().any(|t| self.required.contains(t));
        wanted && !tags.iter().any(|t| self.excluded.contains(t))
    }
}

fn fold_all<S: Into<String>>(tags: impl IntoIterator<Item = S>) -> HashSet<String> {
    tags.into_iter()
        .filter_map(|t| {
            let tag: String = t.into();
            fold_tag(&tag)
        })
        .collect()
}
