//! Typed ID wrappers for lookup entities.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Primary key type shared by all lookup tables.
pub type LookupId = i64;

/// A strongly-typed wrapper for pet type IDs.
///
/// Breeds are partitioned by this value, both in the store and in the
/// cache key namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PetTypeId(pub LookupId);

impl PetTypeId {
    /// Creates a pet type ID from a raw key.
    #[must_use]
    pub const fn new(id: LookupId) -> Self {
        Self(id)
    }

    /// Returns the raw key.
    #[must_use]
    pub const fn into_inner(self) -> LookupId {
        self.0
    }

    /// Returns true if this ID can refer to a stored row.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 > 0
    }
}

impl Display for PetTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<LookupId> for PetTypeId {
    fn from(id: LookupId) -> Self {
        Self(id)
    }
}

impl From<PetTypeId> for LookupId {
    fn from(id: PetTypeId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pet_type_id_display() {
        assert_eq!(PetTypeId::new(7).to_string(), "7");
    }

    #[test]
    fn test_pet_type_id_validity() {
        assert!(PetTypeId::new(1).is_valid());
        assert!(!PetTypeId::new(0).is_valid());
        assert!(!PetTypeId::new(-3).is_valid());
    }

    #[test]
    fn test_pet_type_id_serializes_transparently() {
        let json = serde_json::to_string(&PetTypeId::new(3)).unwrap();
        assert_eq!(json, "3");
    }
}
