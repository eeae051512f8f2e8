//! Cache key generators for the lookup lists.
//!
//! Keys are shared by every backend and every instance, so they must never
//! change without a coordinated flush.

use petsocial_core::{LookupKind, PetTypeId};

/// Key of the pet type list.
pub const PET_TYPES: &str = "pet-types";

/// Key of the color list.
pub const COLORS: &str = "colors";

/// Key of the food list.
pub const FOODS: &str = "foods";

/// Key of the user type list.
pub const USER_TYPES: &str = "user-types";

/// Key of the breed list for one pet type.
#[must_use]
pub fn breeds(pet_type_id: PetTypeId) -> String {
    format!("breeds-{}", pet_type_id)
}

/// Key of an unpartitioned collection. Breeds have one key per pet type
/// and return `None`.
#[must_use]
pub const fn for_kind(kind: LookupKind) -> Option<&'static str> {
    match kind {
        LookupKind::PetType => Some(PET_TYPES),
        LookupKind::PetColor => Some(COLORS),
        LookupKind::PetFood => Some(FOODS),
        LookupKind::UserType => Some(USER_TYPES),
        LookupKind::PetBreed => None,
    }
}
