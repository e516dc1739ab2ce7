// SPDX-License-Identifier: PMPL-1.0-or-later
//! Data models for users and their API representation

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User record as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// Email address, unchecked beyond the store's uniqueness constraint
    pub email: String,
}

impl User {
    /// Create a new user with a fresh id and both timestamps set to now
    pub fn new(email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            email,
        }
    }
}

/// Input for creating users; a missing or null email is stored as empty
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub email: Option<String>,
}

/// User as returned over HTTP, timestamps in RFC 3339
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            created_at: user.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            updated_at: user.updated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            email: user.email.clone(),
        }
    }
}
