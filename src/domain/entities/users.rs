use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::users;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = users)]
pub struct UserEntity {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserEntity {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(first_name: &str, last_name: &str) -> UserEntity {
        let now = Utc::now();
        UserEntity {
            id: Uuid::new_v4(),
            username: "writer".to_string(),
            email: "writer@example.com".to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            bio: None,
            avatar: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn full_name_joins_first_and_last() {
        assert_eq!(sample_user("Ada", "Lovelace").full_name(), "Ada Lovelace");
    }

    #[test]
    fn full_name_trims_missing_parts() {
        assert_eq!(sample_user("Ada", "").full_name(), "Ada");
        assert_eq!(sample_user("", "").full_name(), "");
    }
}
