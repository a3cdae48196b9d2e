use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::users::UserEntity;

/// Public profile fields only; the full entity never leaves the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileModel {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub profile_image_url: Option<String>,
    pub is_verified: bool,
}

impl From<UserEntity> for UserProfileModel {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            first_name: entity.first_name,
            last_name: entity.last_name,
            profile_image_url: entity.profile_image_url,
            is_verified: entity.is_verified,
        }
    }
}
