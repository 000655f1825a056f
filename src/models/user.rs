//! User account model for the admin console.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Failed logins after which an account shows as locked.
pub const LOCKOUT_ATTEMPTS: u32 = 5;

/// Identifier of a user account.
pub type UserId = crate::models::movie::MovieId;

/// A user account as listed by the admin API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_email_verified: bool,
    #[serde(default)]
    pub login_attempts: u32,
    #[serde(default)]
    pub lock_until: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Account role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    #[serde(other)]
    User,
}

impl Role {
    /// Label shown in the console.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::User => "User",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::User => write!(f, "user"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(crate::Error::validation(format!("Unknown role: {}", other))),
        }
    }
}

/// Account status shown in the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
    Locked,
    Pending,
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserStatus::Active => write!(f, "Active"),
            UserStatus::Inactive => write!(f, "Inactive"),
            UserStatus::Locked => write!(f, "Locked"),
            UserStatus::Pending => write!(f, "Pending"),
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            "locked" => Ok(UserStatus::Locked),
            "pending" => Ok(UserStatus::Pending),
            other => Err(crate::Error::validation(format!("Unknown status: {}", other))),
        }
    }
}
