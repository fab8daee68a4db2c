use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::users::UserEntity;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfoDto {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub email: String,
}

impl From<&UserEntity> for UserInfoDto {
    fn from(user: &UserEntity) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            full_name: user.full_name(),
            email: user.email.clone(),
        }
    }
}
