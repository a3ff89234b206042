//! Authentication data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Logged-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub login_time: DateTime<Utc>,
    #[serde(default)]
    pub is_admin: bool,
}

impl User {
    /// Create a user logged in now. `admin` in any letter case is an admin.
    pub fn new(username: impl Into<String>) -> Self {
        let username = username.into();
        let is_admin = username.eq_ignore_ascii_case("admin");
        Self {
            username,
            login_time: Utc::now(),
            is_admin,
        }
    }
}

/// User login request
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}
