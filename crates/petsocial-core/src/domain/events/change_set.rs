//! Change sets published after a successful unit-of-work commit.

use crate::{LookupEntity, LookupKind, PetTypeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// State of an entity within a unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityState {
    Added,
    Modified,
    Deleted,
}

/// A single staged or committed change to a lookup row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EntityChange {
    /// A new row. Its ID is 0 while staged and store-assigned once committed.
    Added { entity: LookupEntity },
    /// An existing row replaced by `current`. `original` is the row as it
    /// was loaded before the change.
    Modified {
        original: LookupEntity,
        current: LookupEntity,
    },
    /// A removed row.
    Deleted { entity: LookupEntity },
}

impl EntityChange {
    /// Stages an insert.
    #[must_use]
    pub fn added(entity: impl Into<LookupEntity>) -> Self {
        Self::Added {
            entity: entity.into(),
        }
    }

    /// Stages an update.
    #[must_use]
    pub fn modified(original: impl Into<LookupEntity>, current: impl Into<LookupEntity>) -> Self {
        Self::Modified {
            original: original.into(),
            current: current.into(),
        }
    }

    /// Stages a delete.
    #[must_use]
    pub fn deleted(entity: impl Into<LookupEntity>) -> Self {
        Self::Deleted {
            entity: entity.into(),
        }
    }

    /// Returns the change state.
    #[must_use]
    pub const fn state(&self) -> EntityState {
        match self {
            Self::Added { .. } => EntityState::Added,
            Self::Modified { .. } => EntityState::Modified,
            Self::Deleted { .. } => EntityState::Deleted,
        }
    }

    /// Returns the entity as it is after the change (before it, for deletes).
    #[must_use]
    pub const fn entity(&self) -> &LookupEntity {
        match self {
            Self::Added { entity } | Self::Deleted { entity } => entity,
            Self::Modified { current, .. } => current,
        }
    }

    /// Returns the collection this change touches.
    #[must_use]
    pub const fn kind(&self) -> LookupKind {
        self.entity().kind()
    }

    /// Breed partitions this change touches. A breed moved to another pet
    /// type touches both the partition it left and the one it joined.
    pub fn breed_partitions(&self) -> impl Iterator<Item = PetTypeId> + '_ {
        let original = match self {
            Self::Modified { original, .. } => original.breed_partition(),
            _ => None,
        };
        self.entity().breed_partition().into_iter().chain(original)
    }
}

/// The exact set of rows added, modified or deleted by one commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    changes: Vec<EntityChange>,
}

impl ChangeSet {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the changes in commit order.
    #[must_use]
    pub fn changes(&self) -> &[EntityChange] {
        &self.changes
    }

    /// Iterates over the changes in commit order.
    pub fn iter(&self) -> std::slice::Iter<'_, EntityChange> {
        self.changes.iter()
    }

    /// Returns the number of changes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Returns true if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Returns true if any change touches the given collection.
    #[must_use]
    pub fn touches(&self, kind: LookupKind) -> bool {
        self.changes.iter().any(|c| c.kind() == kind)
    }

    /// Distinct breed partitions touched by this change set.
    #[must_use]
    pub fn breed_partitions(&self) -> BTreeSet<PetTypeId> {
        self.changes
            .iter()
            .flat_map(EntityChange::breed_partitions)
            .collect()
    }

    /// Consumes the change set, returning the changes.
    #[must_use]
    pub fn into_changes(self) -> Vec<EntityChange> {
        self.changes
    }
}

impl From<Vec<EntityChange>> for ChangeSet {
    fn from(changes: Vec<EntityChange>) -> Self {
        Self { changes }
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a EntityChange;
    type IntoIter = std::slice::Iter<'a, EntityChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}
