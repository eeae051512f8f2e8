//! Read-side lookup DTOs.
//!
//! These are what gets cached and returned to clients. Sort order is
//! already reflected in list order and is not exposed.

use petsocial_core::{LookupId, PetBreed, PetColor, PetFood, PetType, UserType};
use serde::{Deserialize, Serialize};

/// Pet type choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetTypeDto {
    pub id: LookupId,
    pub name: String,
    pub image_path: String,
}

impl From<PetType> for PetTypeDto {
    fn from(pet_type: PetType) -> Self {
        Self {
            id: pet_type.id,
            name: pet_type.name,
            image_path: pet_type.image_path,
        }
    }
}

/// Breed choice within one pet type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreedDto {
    pub id: LookupId,
    pub name: String,
}

impl From<PetBreed> for BreedDto {
    fn from(breed: PetBreed) -> Self {
        Self {
            id: breed.id,
            name: breed.name,
        }
    }
}

/// Color choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorDto {
    pub id: LookupId,
    pub name: String,
}

impl From<PetColor> for ColorDto {
    fn from(color: PetColor) -> Self {
        Self {
            id: color.id,
            name: color.name,
        }
    }
}

/// Food choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodDto {
    pub id: LookupId,
    pub name: String,
}

impl From<PetFood> for FoodDto {
    fn from(food: PetFood) -> Self {
        Self {
            id: food.id,
            name: food.name,
        }
    }
}

/// Account category choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTypeDto {
    pub id: LookupId,
    pub name: String,
    pub image_path: String,
    pub description: String,
}

impl From<UserType> for UserTypeDto {
    fn from(user_type: UserType) -> Self {
        Self {
            id: user_type.id,
            name: user_type.name,
            image_path: user_type.image_path,
            description: user_type.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pet_type_dto_uses_camel_case() {
        let mut dog = PetType::new("Dog", "/images/dog.jpg");
        dog.id = 3;

        let json = serde_json::to_value(PetTypeDto::from(dog)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": 3, "name": "Dog", "imagePath": "/images/dog.jpg" })
        );
    }

    #[test]
    fn test_breed_dto_drops_partition_and_sort_order() {
        let breed = PetBreed::new(petsocial_core::PetTypeId::new(7), "Poodle");
        let json = serde_json::to_value(BreedDto::from(breed)).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 0, "name": "Poodle" }));
    }
}
