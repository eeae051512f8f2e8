//! Admin write-side request DTOs.

use petsocial_core::LookupId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Maximum length of a lookup name.
pub const MAX_NAME_LENGTH: u64 = 100;

/// Request to create or update a pet type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct PetTypeRequest {
    #[validate(length(max = 100, message = "Name cannot exceed 100 characters"))]
    pub name: String,

    #[validate(length(max = 500, message = "Image path cannot exceed 500 characters"))]
    pub image_path: Option<String>,

    /// 0 means "append after the current last row" on create and "keep the
    /// current value" on update.
    pub sort_order: i32,
}

/// Request to create or update a breed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct BreedRequest {
    pub pet_type_id: LookupId,

    #[validate(length(max = 100, message = "Name cannot exceed 100 characters"))]
    pub name: String,

    pub sort_order: i32,
}

/// Request to create or update a color or a food.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct NamedLookupRequest {
    #[validate(length(max = 100, message = "Name cannot exceed 100 characters"))]
    pub name: String,

    pub sort_order: i32,
}

/// Request to create or update a user type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UserTypeRequest {
    #[validate(length(max = 100, message = "Name cannot exceed 100 characters"))]
    pub name: String,

    #[validate(length(max = 500, message = "Image path cannot exceed 500 characters"))]
    pub image_path: Option<String>,

    #[validate(length(max = 1000, message = "Description cannot exceed 1000 characters"))]
    pub description: Option<String>,
}

/// Query filter for admin list endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminListQuery {
    /// Case-insensitive name substring.
    pub search: Option<String>,
    /// Breed partition filter; ignored by other collections.
    pub pet_type_id: Option<LookupId>,
}

impl AdminListQuery {
    /// Returns the trimmed, lowercased search term, if any.
    #[must_use]
    pub fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petsocial_core::ValidateExt;

    #[test]
    fn test_breed_request_accepts_camel_case() {
        let request: BreedRequest =
            serde_json::from_str(r#"{"petTypeId": 7, "name": "Poodle"}"#).unwrap();
        assert_eq!(request.pet_type_id, 7);
        assert_eq!(request.sort_order, 0);
    }

    #[test]
    fn test_overlong_name_rejected() {
        let request = NamedLookupRequest {
            name: "x".repeat(MAX_NAME_LENGTH as usize + 1),
            sort_order: 0,
        };
        assert!(request.validate_request().is_err());
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let query = AdminListQuery {
            search: Some("   ".to_string()),
            pet_type_id: None,
        };
        assert_eq!(query.search_term(), None);

        let query = AdminListQuery {
            search: Some(" PoO ".to_string()),
            pet_type_id: None,
        };
        assert_eq!(query.search_term().as_deref(), Some("poo"));
    }
}
