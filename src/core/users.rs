//! Admin console view over user accounts.

use crate::models::user::{Role, User, UserStatus, LOCKOUT_ATTEMPTS};

impl UserStatus {
    /// Status of an account. Earlier checks win.
    pub fn of(user: &User) -> Self {
        if !user.is_active {
            UserStatus::Inactive
        } else if user.login_attempts >= LOCKOUT_ATTEMPTS {
            UserStatus::Locked
        } else if !user.is_email_verified {
            UserStatus::Pending
        } else {
            UserStatus::Active
        }
    }
}

/// Initials of a display name ("Ada Lovelace" -> "AL").
pub fn initials(name: &str) -> String {
    name.split(' ')
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Console filters. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    /// Case-insensitive match against name or email.
    pub search: Option<String>,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
}

impl UserQuery {
    /// Whether `user` passes every filter.
    pub fn matches(&self, user: &User) -> bool {
        if let Some(ref term) = self.search {
            let term = term.trim().to_lowercase();
            if !term.is_empty()
                && !user.name.to_lowercase().contains(&term)
                && !user.email.to_lowercase().contains(&term)
            {
                return false;
            }
        }
        if let Some(role) = self.role {
            if user.role != role {
                return false;
            }
        }
        if let Some(status) = self.status {
            if UserStatus::of(user) != status {
                return false;
            }
        }
        true
    }

    /// Users passing every filter, in input order.
    pub fn apply<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        users.iter().filter(|u| self.matches(u)).collect()
    }
}
