//! Request and response shapes of the catalog REST API.

use serde::{Deserialize, Serialize};

/// Envelope wrapping every API response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
    /// Bearer token, present on login responses.
    #[serde(default)]
    pub token: Option<String>,
}

/// Error body of a non-2xx response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Registration payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub agree_to_terms: bool,
}

/// Login payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

/// Admin update of a user account. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_until: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl UpdateUserRequest {
    /// Whether the request changes nothing.
    pub fn is_empty(&self) -> bool {
        self.lock_until.is_none() && self.is_active.is_none() && self.role.is_none()
    }
}
