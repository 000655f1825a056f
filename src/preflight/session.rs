//! Stored session preflight check.

use super::CheckResult;
use crate::core::session::{decode_claims, Session};
use crate::services::store::FileStore;
use chrono::Utc;
use std::path::Path;

/// Check whether a stored login is present and usable.
///
/// Having no session is fine; a stored token that cannot be decoded is not.
pub fn check(data_dir: &Path) -> CheckResult {
    let session = Session::new(FileStore::in_dir(data_dir));

    match session.token() {
        Ok(None) => CheckResult::passed("Session", "not logged in"),
        Ok(Some(token)) => match decode_claims(&token) {
            Ok(claims) if claims.is_expired_at(Utc::now()) => CheckResult::failed(
                "Session",
                "stored token has expired",
                "Log in again: cinestream login",
            ),
            Ok(claims) => CheckResult::passed(
                "Session",
                format!(
                    "logged in as {}",
                    claims.email.as_deref().unwrap_or(if claims.is_admin() {
                        "admin"
                    } else {
                        "user"
                    })
                ),
            ),
            Err(e) => CheckResult::failed(
                "Session",
                e.to_string(),
                "Log out and log in again: cinestream logout",
            ),
        },
        Err(e) => CheckResult::failed(
            "Session",
            format!("unreadable store: {}", e),
            "Remove the storage file in the data directory",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_no_session_passes() {
        let dir = TempDir::new().unwrap();
        assert!(check(dir.path()).is_passed());
    }

    #[test]
    fn test_garbage_token_fails() {
        let dir = TempDir::new().unwrap();
        let session = Session::new(FileStore::in_dir(dir.path()));
        session.store_login("not-a-jwt", false).unwrap();

        let result = check(dir.path());
        assert!(!result.is_passed());
        assert!(result.hint().is_some());
    }
}
