// src/accounts.rs
use crate::fs::write_json_pretty;
use log::{error, info, warn};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

pub const USERS_FILE_NAME: &str = "users.json";

const BOOTSTRAP_USERNAME: &str = "admin";
const BOOTSTRAP_PASSWORD: &str = "admin";

/// Returns true when no account file exists at `path` yet.
pub fn is_first_run(path: &Path) -> bool {
    !path.exists()
}

/// Username → password registry backed by a single JSON file.
///
/// Usernames are keyed lowercased, so lookups and uniqueness are
/// case-insensitive. Passwords are stored and compared verbatim.
///
/// Storage failures never propagate out of this type: they are logged and
/// the in-memory mapping stays authoritative for the rest of the process.
#[derive(Debug)]
pub struct AccountStore {
    path: PathBuf,
    users: Mutex<HashMap<String, String>>,
}

impl AccountStore {
    /// Opens the store at `path`, loading it once.
    ///
    /// A missing file is seeded with the `admin`/`admin` account and written
    /// immediately. An unreadable or malformed file leaves the store empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let store = AccountStore {
            path: path.into(),
            users: Mutex::new(HashMap::new()),
        };
        store.load();
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self, username: &str) -> bool {
        self.lock().contains_key(&username.to_lowercase())
    }

    pub fn validate_login(&self, username: &str, password: &str) -> bool {
        self.lock()
            .get(&username.to_lowercase())
            .map_or(false, |stored| stored == password)
    }

    /// Adds a new account and persists the whole mapping.
    ///
    /// Returns false, without touching anything, when the username is taken
    /// in any letter case. Length rules live in `validation`, not here.
    pub fn register(&self, username: &str, password: &str) -> bool {
        let key = username.to_lowercase();
        let mut users = self.lock();
        if users.contains_key(&key) {
            info!("Registration refused: username {:?} already exists", key);
            return false;
        }
        users.insert(key.clone(), password.to_string());
        self.save(&users);
        info!("Registered new account {:?}", key);
        true
    }

    /// Snapshot of every stored (lowercased) username.
    pub fn list_usernames(&self) -> HashSet<String> {
        self.lock().keys().cloned().collect()
    }

    /// Re-checks the backing file on every call.
    pub fn is_first_run(&self) -> bool {
        is_first_run(&self.path)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // A poisoned lock still holds a consistent map: every mutation is a
        // single insert.
        self.users.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn load(&self) {
        let mut users = self.lock();
        if !self.path.exists() {
            info!(
                "Account file {:?} not found. Creating it with the default '{}' account.",
                self.path, BOOTSTRAP_USERNAME
            );
            users.insert(BOOTSTRAP_USERNAME.to_string(), BOOTSTRAP_PASSWORD.to_string());
            self.save(&users);
            return;
        }

        info!("Loading accounts from {:?}", self.path);
        match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str::<Option<HashMap<String, String>>>(&content) {
                Ok(Some(loaded)) => {
                    info!("Loaded {} account(s).", loaded.len());
                    *users = loaded;
                }
                Ok(None) => warn!("Account file {:?} holds null. Starting with no accounts.", self.path),
                Err(e) => warn!(
                    "Failed to parse account file {:?}: {}. Starting with no accounts.",
                    self.path, e
                ),
            },
            Err(e) => warn!(
                "Failed to read account file {:?}: {}. Starting with no accounts.",
                self.path, e
            ),
        }
    }

    fn save(&self, users: &HashMap<String, String>) {
        if let Err(e) = write_json_pretty(&self.path, users) {
            error!(
                "Failed to save accounts to {:?}: {}. Changes are kept in memory only.",
                self.path, e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn users_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join(USERS_FILE_NAME)
    }

    #[test]
    fn test_missing_file_is_seeded_with_admin() {
        let dir = tempdir().unwrap();
        let path = users_path(&dir);
        assert!(is_first_run(&path));

        let store = AccountStore::open(&path);

        assert!(path.exists());
        assert_eq!(store.path(), path.as_path());
        assert!(!store.is_first_run());
        assert!(store.validate_login("admin", "admin"));
        let on_disk: HashMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk.get("admin").map(String::as_str), Some("admin"));
        assert_eq!(on_disk.len(), 1);
    }

    #[test]
    fn test_register_once_then_duplicate_in_any_case() {
        let dir = tempdir().unwrap();
        let store = AccountStore::open(users_path(&dir));

        assert!(store.register("newUser", "pw"));
        assert!(!store.register("newUser", "other"));
        assert!(!store.register("NEWUSER", "other"));
        assert!(!store.register("newuser", "other"));
        assert!(store.validate_login("newuser", "pw"));
        assert!(!store.validate_login("newuser", "other"));
    }

    #[test]
    fn test_login_case_rules() {
        let dir = tempdir().unwrap();
        let store = AccountStore::open(users_path(&dir));
        assert!(store.register("Bob", "Secret1"));

        assert!(store.validate_login("bob", "Secret1"));
        assert!(store.validate_login("BOB", "Secret1"));
        assert!(!store.validate_login("BOB", "secret1"));
        assert!(!store.validate_login("carol", "Secret1"));
        assert!(store.exists("bOb"));
        assert!(!store.exists("carol"));
    }

    #[test]
    fn test_only_lowercased_key_is_stored() {
        let dir = tempdir().unwrap();
        let store = AccountStore::open(users_path(&dir));
        store.register("MixedCase", "pass");

        let names = store.list_usernames();
        assert!(names.contains("mixedcase"));
        assert!(!names.contains("MixedCase"));
        assert!(names.contains("admin"));
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_registration_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = users_path(&dir);
        {
            let store = AccountStore::open(&path);
            assert!(store.register("alice", "pass1"));
        }
        let reopened = AccountStore::open(&path);
        assert!(reopened.validate_login("ALICE", "pass1"));
        assert!(reopened.validate_login("admin", "admin"));
    }

    #[test]
    fn test_existing_file_is_not_reseeded() {
        let dir = tempdir().unwrap();
        let path = users_path(&dir);
        fs::write(&path, r#"{"carol": "pw12"}"#).unwrap();

        let store = AccountStore::open(&path);
        assert!(!store.exists("admin"));
        assert!(store.validate_login("carol", "pw12"));
    }

    #[test]
    fn test_malformed_file_yields_empty_store() {
        let dir = tempdir().unwrap();
        let path = users_path(&dir);
        fs::write(&path, "{ not json").unwrap();

        let store = AccountStore::open(&path);
        assert!(store.list_usernames().is_empty());
        assert!(!store.validate_login("admin", "admin"));
        // The broken file is left alone until the next successful save.
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_list_usernames_is_a_snapshot() {
        let dir = tempdir().unwrap();
        let store = AccountStore::open(users_path(&dir));
        let before = store.list_usernames();
        store.register("dave", "pass");
        assert!(!before.contains("dave"));
        assert!(store.list_usernames().contains("dave"));
    }

    #[test]
    fn test_failed_save_keeps_memory_state() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        // Parent is a regular file, so every write fails.
        let store = AccountStore::open(blocker.join(USERS_FILE_NAME));

        assert!(store.validate_login("admin", "admin"));
        assert!(store.register("erin", "pass"));
        assert!(store.validate_login("erin", "pass"));
        assert!(store.is_first_run());
    }
}
