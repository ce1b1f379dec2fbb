// alo-client/src/preference.rs
// Preference cache - JSON file per key

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Key under which the last selected branch is remembered
pub const STORE_BRANCH_ACTIVE_KEY: &str = "storeBranchActive";

/// Best-effort key/value store for UI preferences
///
/// Each key is one `<key>.json` file under the cache directory. Reads fall
/// back to the caller's default; writes never fail the caller.
#[derive(Debug, Clone)]
pub struct PreferenceCache {
    dir: PathBuf,
}

impl PreferenceCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing a key
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Stored value, or `default` when absent or unreadable
    pub fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let path = self.path_for(key);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(_) => return default,
        };
        match serde_json::from_str(&json) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(key, error = %e, "Ignoring unparsable preference");
                default
            }
        }
    }

    /// Store a value; failures are logged and swallowed
    pub fn write<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_write(key, value) {
            tracing::warn!(key, error = %e, "Failed to persist preference");
        }
    }

    fn try_write<T: Serialize>(&self, key: &str, value: &T) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string(value)?;
        fs::write(self.path_for(key), json)
    }

    pub fn remove(&self, key: &str) {
        let path = self.path_for(key);
        if path.exists()
            && let Err(e) = fs::remove_file(&path)
        {
            tracing::warn!(key, error = %e, "Failed to remove preference");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::StoreBranch;
    use tempfile::TempDir;

    #[test]
    fn read_falls_back_to_default() {
        let temp_dir = TempDir::new().unwrap();
        let cache = PreferenceCache::new(temp_dir.path());
        let branch = cache.read(STORE_BRANCH_ACTIVE_KEY, StoreBranch::none());
        assert_eq!(branch, StoreBranch::none());
    }

    #[test]
    fn write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let cache = PreferenceCache::new(temp_dir.path().join("nested"));
        cache.write(STORE_BRANCH_ACTIVE_KEY, &StoreBranch::new(3, "Riverside"));

        let stored = fs::read_to_string(cache.path_for(STORE_BRANCH_ACTIVE_KEY)).unwrap();
        assert_eq!(stored, r#"{"id":3,"name":"Riverside"}"#);
        assert_eq!(
            cache.read(STORE_BRANCH_ACTIVE_KEY, StoreBranch::none()),
            StoreBranch::new(3, "Riverside")
        );

        cache.remove(STORE_BRANCH_ACTIVE_KEY);
        assert_eq!(
            cache.read(STORE_BRANCH_ACTIVE_KEY, StoreBranch::none()),
            StoreBranch::none()
        );
    }

    #[test]
    fn corrupt_value_reads_as_default() {
        let temp_dir = TempDir::new().unwrap();
        let cache = PreferenceCache::new(temp_dir.path());
        fs::write(cache.path_for(STORE_BRANCH_ACTIVE_KEY), "{not json").unwrap();
        assert_eq!(
            cache.read(STORE_BRANCH_ACTIVE_KEY, StoreBranch::none()),
            StoreBranch::none()
        );
    }

    #[test]
    fn write_failure_is_swallowed() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file where the cache directory should be
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        let cache = PreferenceCache::new(&blocker);
        cache.write(STORE_BRANCH_ACTIVE_KEY, &StoreBranch::new(1, "Central"));
        assert_eq!(
            cache.read(STORE_BRANCH_ACTIVE_KEY, StoreBranch::none()),
            StoreBranch::none()
        );
    }
}
