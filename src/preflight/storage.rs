//! Data directory preflight check.

use super::CheckResult;
use std::fs;
use std::path::Path;

/// Check that the data directory exists (or can be created) and is writable.
pub fn check(data_dir: &Path) -> CheckResult {
    if let Err(e) = fs::create_dir_all(data_dir) {
        return CheckResult::failed(
            "Storage",
            format!("cannot create {}: {}", data_dir.display(), e),
            "Set CINESTREAM_DATA_DIR to a writable directory",
        );
    }

    let marker = data_dir.join(".write_test");
    match fs::write(&marker, b"ok") {
        Ok(()) => {
            let _ = fs::remove_file(&marker);
            CheckResult::passed("Storage", format!("writable ({})", data_dir.display()))
        }
        Err(e) => CheckResult::failed(
            "Storage",
            format!("{} is not writable: {}", data_dir.display(), e),
            "Set CINESTREAM_DATA_DIR to a writable directory",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_missing_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let result = check(&nested);
        assert!(result.is_passed());
        assert!(nested.is_dir());
        assert!(!nested.join(".write_test").exists());
    }
}
