//! Groups - named buckets that scope which cards are studied.
//!
//! Every deck starts with the default group (id 1). Ids are handed out in
//! increasing order and are never reused, even after a group is deleted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::{DeckError, DeckResult};

/// Identifier for groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub u32);

impl GroupId {
    /// The group every deck starts with.
    pub const DEFAULT: GroupId = GroupId(1);
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
}

/// Group registry. Lookups by name create the group on first use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupRegistry {
    groups: BTreeMap<GroupId, Group>,
    next_id: u32,
}

impl GroupRegistry {
    /// Create a registry holding only the default group.
    pub fn new(default_name: impl Into<String>) -> Self {
        let mut groups = BTreeMap::new();
        groups.insert(
            GroupId::DEFAULT,
            Group {
                id: GroupId::DEFAULT,
                name: default_name.into(),
            },
        );
        Self {
            groups,
            next_id: GroupId::DEFAULT.0 + 1,
        }
    }

    /// Id of the named group, creating it if absent.
    pub fn id_for(&mut self, name: &str) -> GroupId {
        if let Some(group) = self.groups.values().find(|g| g.name == name) {
            return group.id;
        }

        let id = GroupId(self.next_id);
        self.next_id += 1;
        self.groups.insert(
            id,
            Group {
                id,
                name: name.to_string(),
            },
        );
        id
    }

    /// Delete a group. The default group cannot be deleted.
    pub fn remove(&mut self, id: GroupId) -> DeckResult<Group> {
        if id == GroupId::DEFAULT {
            return Err(DeckError::DefaultGroup);
        }
        self.groups.remove(&id).ok_or(DeckError::UnknownGroup(id))
    }

    pub fn get(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    pub fn contains(&self, id: GroupId) -> bool {
        self.groups.contains_key(&id)
    }

    /// Groups in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
