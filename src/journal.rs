// src/journal.rs
use crate::error::StoreResult;
use crate::fs::write_json_pretty;
use crate::models::LyricEntry;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

const JOURNAL_FILE_SUFFIX: &str = "_lyrics.json";

/// Location of a user's journal inside `data_dir`. The username keeps its
/// original case.
pub fn journal_path(data_dir: &Path, username: &str) -> PathBuf {
    data_dir.join(format!("{}{}", username, JOURNAL_FILE_SUFFIX))
}

/// Reads the entries stored at `path`.
///
/// A missing file means "no entries yet". A file that cannot be read or does
/// not hold a JSON array of entries is treated the same way, with a warning.
pub fn load_entries(path: &Path) -> Vec<LyricEntry> {
    if !path.exists() {
        info!("No journal at {:?} yet. Starting empty.", path);
        return Vec::new();
    }
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to read journal {:?}: {}. Starting empty.", path, e);
            return Vec::new();
        }
    };
    match serde_json::from_str::<Option<Vec<LyricEntry>>>(&content) {
        Ok(entries) => {
            let entries = entries.unwrap_or_default();
            info!("Loaded {} entries from {:?}", entries.len(), path);
            entries
        }
        Err(e) => {
            warn!("Failed to parse journal {:?}: {}. Starting empty.", path, e);
            Vec::new()
        }
    }
}

/// Overwrites `path` with `entries`.
pub fn save_entries(path: &Path, entries: &[LyricEntry]) -> StoreResult<()> {
    write_json_pretty(path, entries)?;
    info!("Saved {} entries to {:?}", entries.len(), path);
    Ok(())
}

/// One user's ordered collection of lyric entries.
///
/// Mutations only touch memory. Nothing reaches disk until `save` is called;
/// deciding when to do that is up to the caller.
#[derive(Debug)]
pub struct JournalStore {
    username: String,
    password: String,
    path: PathBuf,
    entries: Vec<LyricEntry>,
}

impl JournalStore {
    /// Creates a store for `username` in `data_dir` and loads its file.
    pub fn open(data_dir: &Path, username: &str, password: &str) -> Self {
        let path = journal_path(data_dir, username);
        let entries = load_entries(&path);
        JournalStore {
            username: username.to_string(),
            password: password.to_string(),
            path,
            entries,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The password this session was opened with. Not checked here.
    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn file_path(&self) -> &Path {
        &self.path
    }

    /// Replaces the in-memory entries with what is on disk.
    pub fn reload(&mut self) {
        self.entries = load_entries(&self.path);
    }

    pub fn save(&self) -> StoreResult<()> {
        save_entries(&self.path, &self.entries)
    }

    pub fn add(&mut self, entry: LyricEntry) {
        self.entries.push(entry);
    }

    /// Every entry, in insertion order.
    pub fn all(&self) -> &[LyricEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&LyricEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose title, artist or lyric text contains `keyword`,
    /// ignoring case. The note is not searched. An empty keyword matches
    /// nothing; use `all` to list everything.
    pub fn search(&self, keyword: &str) -> Vec<LyricEntry> {
        if keyword.is_empty() {
            return Vec::new();
        }
        let needle = keyword.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.matches_lowercase(&needle))
            .cloned()
            .collect()
    }

    /// Replaces the first entry equal to `old` with `new`. Returns false and
    /// leaves the collection alone when there is no such entry.
    pub fn update(&mut self, old: &LyricEntry, new: LyricEntry) -> bool {
        match self.position_of(old) {
            Some(idx) => {
                self.entries[idx] = new;
                true
            }
            None => {
                warn!("Update skipped: entry {:?} not found", old.song_title);
                false
            }
        }
    }

    /// Removes the first entry equal to `entry`. No-op when absent.
    pub fn remove(&mut self, entry: &LyricEntry) -> bool {
        match self.position_of(entry) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Replaces the entry at `index`, keeping its position. Returns false
    /// when `index` is out of range.
    pub fn replace_at(&mut self, index: usize, new: LyricEntry) -> bool {
        match self.entries.get_mut(index) {
            Some(slot) => {
                *slot = new;
                true
            }
            None => false,
        }
    }

    /// Removes and returns the entry at `index`, if there is one.
    pub fn remove_at(&mut self, index: usize) -> Option<LyricEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    fn position_of(&self, entry: &LyricEntry) -> Option<usize> {
        self.entries.iter().position(|e| e == entry)
    }
}
