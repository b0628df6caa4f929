use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::auth::UserRole;
use crate::shared::query::{Record, Searchable};

/// A platform user as listed by `GET /admin/users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub banned: Option<bool>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl UserResponse {
    pub fn is_banned(&self) -> bool {
        self.banned.unwrap_or(false)
    }

    pub fn is_verified(&self) -> bool {
        self.verified.unwrap_or(false)
    }
}

impl Record for UserResponse {
    fn record_id(&self) -> String {
        self.id.to_string()
    }
}

impl Searchable for UserResponse {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.email]
    }
}

/// `POST /admin/facility-requests/{id}/reject?reason=`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectParams {
    pub reason: String,
}
