//! User accounts for the admin area.

use chrono::{DateTime, Utc};
use mercurius_catalog::ids::UserId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// User role for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Signed-in user without admin rights.
    #[default]
    User,
    /// Store administrator.
    Admin,
}

impl Role {
    /// Get role as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Check if this role has at least the given permission level.
    pub fn has_permission(&self, required: Role) -> bool {
        self.level() >= required.level()
    }

    fn level(&self) -> u8 {
        match self {
            Role::User => 0,
            Role::Admin => 1,
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// A stored user account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,
    /// Login name (unique).
    pub username: String,
    /// Email address (unique).
    pub email: String,
    /// Display name.
    pub name: String,
    /// argon2 PHC hash.
    pub password_hash: String,
    #[serde(default)]
    pub role: Role,
    /// Inactive users cannot sign in.
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Replace the password hash.
    pub fn set_password_hash(&mut self, hash: impl Into<String>, now: DateTime<Utc>) {
        self.password_hash = hash.into();
        self.updated_at = Some(now);
    }

    /// Block future sign-ins.
    pub fn deactivate(&mut self, now: DateTime<Utc>) {
        self.active = false;
        self.updated_at = Some(now);
    }
}

/// Input for creating a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub name: String,
    /// Plain-text password; hashed before storage.
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

impl NewUser {
    /// Turn the input into a stored user with an already computed hash.
    pub fn into_user(self, password_hash: String, now: DateTime<Utc>) -> User {
        User {
            id: UserId::generate(),
            username: self.username,
            email: self.email,
            name: self.name,
            password_hash,
            role: self.role,
            active: true,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}
