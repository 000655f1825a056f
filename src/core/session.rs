//! Login session: bearer token storage and token claims.
//!
//! Tokens are stored as issued. Claims are read from the JWT payload without
//! verifying the signature; the server remains the authority.

use crate::models::user::Role;
use crate::services::store::KeyValueStore;
use crate::{Error, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the expiry of a remembered login.
pub const TOKEN_EXPIRES_KEY: &str = "token_expires_at";

/// How long a remembered login lasts.
pub const REMEMBER_DAYS: i64 = 7;

/// Claims read from a token payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub email: Option<String>,
    /// Expiry as a unix timestamp.
    #[serde(default)]
    pub exp: Option<i64>,
}

impl Claims {
    /// Whether the token carries the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }

    /// Whether `exp` lies in the past.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp.map(|exp| exp <= now.timestamp()).unwrap_or(false)
    }
}

/// Page a user lands on after login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    AdminConsole,
    UserDashboard,
}

impl Landing {
    /// Landing page for a token's claims.
    pub fn for_claims(claims: &Claims) -> Self {
        if claims.is_admin() {
            Landing::AdminConsole
        } else {
            Landing::UserDashboard
        }
    }
}

impl std::fmt::Display for Landing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Landing::AdminConsole => write!(f, "admin console"),
            Landing::UserDashboard => write!(f, "dashboard"),
        }
    }
}

/// Decode the claims of a JWT.
pub fn decode_claims(token: &str) -> Result<Claims> {
    let mut parts = token.trim().split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) if !payload.is_empty() => payload,
        _ => return Err(Error::InvalidToken("expected three dot-separated parts".into())),
    };

    // Trailing padding is tolerated.
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| Error::InvalidToken(format!("payload is not base64url: {}", e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| Error::InvalidToken(format!("payload is not JSON: {}", e)))
}

/// Session persisted in a key-value store.
#[derive(Debug)]
pub struct Session<S> {
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    /// Create a session over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persist a freshly issued token.
    ///
    /// A remembered login expires after [`REMEMBER_DAYS`].
    pub fn store_login(&self, token: &str, remember_me: bool) -> Result<()> {
        self.store_login_at(token, remember_me, Utc::now())
    }

    /// [`Session::store_login`] with an explicit clock.
    pub fn store_login_at(&self, token: &str, remember_me: bool, now: DateTime<Utc>) -> Result<()> {
        self.store.set(TOKEN_KEY, token)?;
        if remember_me {
            let expires = now + Duration::days(REMEMBER_DAYS);
            self.store.set(TOKEN_EXPIRES_KEY, &expires.to_rfc3339())?;
        } else {
            self.store.remove(TOKEN_EXPIRES_KEY)?;
        }
        tracing::info!("Session stored (remember me: {})", remember_me);
        Ok(())
    }

    /// Current token, if any.
    pub fn token(&self) -> Result<Option<String>> {
        self.token_at(Utc::now())
    }

    /// [`Session::token`] with an explicit clock. Expired logins are cleared.
    pub fn token_at(&self, now: DateTime<Utc>) -> Result<Option<String>> {
        let Some(token) = self.store.get(TOKEN_KEY)? else {
            return Ok(None);
        };

        if let Some(raw) = self.store.get(TOKEN_EXPIRES_KEY)? {
            let expired = DateTime::parse_from_rfc3339(&raw)
                .map(|at| at.with_timezone(&Utc) <= now)
                .unwrap_or(true);
            if expired {
                tracing::info!("Remembered session expired");
                self.clear()?;
                return Ok(None);
            }
        }

        Ok(Some(token))
    }

    /// Current token, or [`Error::NotAuthenticated`].
    pub fn require_token(&self) -> Result<String> {
        self.token()?.ok_or(Error::NotAuthenticated)
    }

    /// Forget the stored token.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(TOKEN_EXPIRES_KEY)?;
        Ok(())
    }
}
