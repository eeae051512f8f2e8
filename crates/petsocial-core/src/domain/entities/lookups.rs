//! Lookup entities.
//!
//! Small, read-mostly reference tables used to populate UI choices. All of
//! them are cached by the service layer; the write path publishes a
//! [`ChangeSet`](crate::ChangeSet) over [`LookupEntity`] values.

use crate::{LookupId, PetTypeId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort order assigned to rows that never had one set explicitly.
pub const DEFAULT_SORT_ORDER: i32 = 9999;

/// Kind of pet (dog, cat, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetType {
    pub id: LookupId,
    pub name: String,
    pub image_path: String,
    pub sort_order: i32,
}

impl PetType {
    /// Creates an unsaved pet type.
    #[must_use]
    pub fn new(name: impl Into<String>, image_path: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            image_path: image_path.into(),
            sort_order: DEFAULT_SORT_ORDER,
        }
    }

    /// Returns this pet type's ID as a breed partition key.
    #[must_use]
    pub const fn type_id(&self) -> PetTypeId {
        PetTypeId::new(self.id)
    }
}

/// Breed belonging to exactly one pet type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetBreed {
    pub id: LookupId,
    pub pet_type_id: PetTypeId,
    pub name: String,
    pub sort_order: i32,
}

impl PetBreed {
    /// Creates an unsaved breed under the given pet type.
    #[must_use]
    pub fn new(pet_type_id: PetTypeId, name: impl Into<String>) -> Self {
        Self {
            id: 0,
            pet_type_id,
            name: name.into(),
            sort_order: DEFAULT_SORT_ORDER,
        }
    }
}

/// Coat color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetColor {
    pub id: LookupId,
    pub name: String,
    pub sort_order: i32,
}

impl PetColor {
    /// Creates an unsaved color.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            sort_order: DEFAULT_SORT_ORDER,
        }
    }
}

/// Food a pet eats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetFood {
    pub id: LookupId,
    pub name: String,
    pub sort_order: i32,
}

impl PetFood {
    /// Creates an unsaved food.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            sort_order: DEFAULT_SORT_ORDER,
        }
    }
}

/// Account category (pet owner, business, ...). Has no sort field and is
/// listed in primary-key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserType {
    pub id: LookupId,
    pub name: String,
    pub image_path: String,
    pub description: String,
}

impl UserType {
    /// Creates an unsaved user type.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        image_path: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            image_path: image_path.into(),
            description: description.into(),
        }
    }
}

/// The five lookup collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupKind {
    PetType,
    PetBreed,
    PetColor,
    PetFood,
    UserType,
}

impl LookupKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::PetType,
        Self::PetBreed,
        Self::PetColor,
        Self::PetFood,
        Self::UserType,
    ];

    /// Resource name used in not-found errors.
    #[must_use]
    pub const fn resource_name(self) -> &'static str {
        match self {
            Self::PetType => "PetType",
            Self::PetBreed => "PetBreed",
            Self::PetColor => "PetColor",
            Self::PetFood => "PetFood",
            Self::UserType => "UserType",
        }
    }

    /// Human-readable label used in validation and conflict messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PetType => "pet type",
            Self::PetBreed => "breed",
            Self::PetColor => "color",
            Self::PetFood => "food",
            Self::UserType => "user type",
        }
    }

    /// Names of rows that other data falls back to and that must never be
    /// deleted. Compared case-insensitively.
    #[must_use]
    pub const fn protected_names(self) -> &'static [&'static str] {
        match self {
            Self::PetType | Self::PetFood => &["Other"],
            Self::PetBreed => &["Other", "Mix Breed"],
            Self::PetColor => &["Other", "Mix Color"],
            Self::UserType => &["Pet Owner"],
        }
    }

    /// Returns true if `name` is protected from deletion for this kind.
    #[must_use]
    pub fn is_protected(self, name: &str) -> bool {
        self.protected_names()
            .iter()
            .any(|protected| protected.eq_ignore_ascii_case(name.trim()))
    }

    /// Returns true if rows of this kind carry a sort order.
    #[must_use]
    pub const fn is_sorted(self) -> bool {
        !matches!(self, Self::UserType)
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource_name())
    }
}

/// Any lookup row, as carried by change sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "entity", rename_all = "snake_case")]
pub enum LookupEntity {
    PetType(PetType),
    PetBreed(PetBreed),
    PetColor(PetColor),
    PetFood(PetFood),
    UserType(UserType),
}

impl LookupEntity {
    /// Returns the collection this row belongs to.
    #[must_use]
    pub const fn kind(&self) -> LookupKind {
        match self {
            Self::PetType(_) => LookupKind::PetType,
            Self::PetBreed(_) => LookupKind::PetBreed,
            Self::PetColor(_) => LookupKind::PetColor,
            Self::PetFood(_) => LookupKind::PetFood,
            Self::UserType(_) => LookupKind::UserType,
        }
    }

    /// Returns the row's primary key (0 before insertion).
    #[must_use]
    pub const fn id(&self) -> LookupId {
        match self {
            Self::PetType(e) => e.id,
            Self::PetBreed(e) => e.id,
            Self::PetColor(e) => e.id,
            Self::PetFood(e) => e.id,
            Self::UserType(e) => e.id,
        }
    }

    /// Sets the primary key after the store assigned one.
    pub fn set_id(&mut self, id: LookupId) {
        match self {
            Self::PetType(e) => e.id = id,
            Self::PetBreed(e) => e.id = id,
            Self::PetColor(e) => e.id = id,
            Self::PetFood(e) => e.id = id,
            Self::UserType(e) => e.id = id,
        }
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::PetType(e) => &e.name,
            Self::PetBreed(e) => &e.name,
            Self::PetColor(e) => &e.name,
            Self::PetFood(e) => &e.name,
            Self::UserType(e) => &e.name,
        }
    }

    /// Returns the breed partition this row lives in, if it is a breed.
    #[must_use]
    pub const fn breed_partition(&self) -> Option<PetTypeId> {
        match self {
            Self::PetBreed(e) => Some(e.pet_type_id),
            _ => None,
        }
    }
}

macro_rules! impl_lookup_entity_from {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for LookupEntity {
                fn from(entity: $variant) -> Self {
                    Self::$variant(entity)
                }
            }
        )*
    };
}

impl_lookup_entity_from!(PetType, PetBreed, PetColor, PetFood, UserType);
