// src/session.rs
use crate::accounts::AccountStore;
use crate::config::Config;
use crate::error::{AppError, AppResult, StoreResult, ValidationError};
use crate::journal::JournalStore;
use crate::models::LyricEntry;
use crate::validation::{self, EntryFields};

/// Field changes for an edit. `None` keeps the current value.
#[derive(Debug, Default, Clone)]
pub struct EntryChanges {
    pub song_title: Option<String>,
    pub artist: Option<String>,
    pub lyric_text: Option<String>,
    pub user_note: Option<String>,
}

/// A logged-in user working on their journal.
///
/// Owns the save cadence: with `auto_save` every add, edit and delete is
/// written through immediately; otherwise changes wait for `save` or
/// `logout`.
#[derive(Debug)]
pub struct Session {
    journal: JournalStore,
    auto_save: bool,
    pending_changes: bool,
}

impl Session {
    /// Checks credentials and opens the user's journal.
    pub fn login(
        accounts: &AccountStore,
        config: &Config,
        username: &str,
        password: &str,
    ) -> AppResult<Self> {
        validation::check_login_input(username, password)?;
        let username = username.trim();
        if !accounts.validate_login(username, password) {
            log::warn!("Login failed for {:?}", username);
            return Err(AppError::InvalidCredentials);
        }
        log::info!("User {:?} logged in", username);
        Ok(Self::open(config, username, password))
    }

    /// Creates the account and starts a session for it.
    pub fn register(
        accounts: &AccountStore,
        config: &Config,
        username: &str,
        password: &str,
    ) -> AppResult<Self> {
        validation::check_registration_input(username, password, config)?;
        let username = username.trim();
        if !accounts.register(username, password) {
            return Err(ValidationError::UsernameTaken(username.to_string()).into());
        }
        Ok(Self::open(config, username, password))
    }

    fn open(config: &Config, username: &str, password: &str) -> Self {
        let journal = JournalStore::open(&config.data_dir(), username, password);
        Session {
            journal,
            auto_save: config.auto_save,
            pending_changes: false,
        }
    }

    pub fn username(&self) -> &str {
        self.journal.username()
    }

    pub fn journal(&self) -> &JournalStore {
        &self.journal
    }

    pub fn has_pending_changes(&self) -> bool {
        self.pending_changes
    }

    pub fn entries(&self) -> &[LyricEntry] {
        self.journal.all()
    }

    /// Looks up a 0-based position.
    pub fn entry(&self, index: usize) -> AppResult<&LyricEntry> {
        self.journal
            .get(index)
            .ok_or(AppError::NoSuchEntry(index + 1))
    }

    /// Search as the journal view does it: a blank query shows everything.
    pub fn search(&self, keyword: &str) -> Vec<LyricEntry> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return self.journal.all().to_vec();
        }
        self.journal.search(keyword)
    }

    pub fn add_entry(&mut self, fields: EntryFields) -> AppResult<&LyricEntry> {
        let entry = LyricEntry::new(fields.song_title, fields.artist, fields.lyric_text, fields.user_note);
        log::info!("Adding entry {:?} for {:?}", entry.song_title, self.username());
        self.journal.add(entry);
        self.changed();
        let last = self.journal.len() - 1;
        self.entry(last)
    }

    /// Rewrites the entry at `index` in place, keeping its original
    /// `date_added`.
    pub fn edit_entry(&mut self, index: usize, changes: EntryChanges) -> AppResult<LyricEntry> {
        let old = self.entry(index)?.clone();
        let fields = EntryFields::new(
            changes.song_title.as_deref().unwrap_or(old.song_title.as_str()),
            changes.artist.as_deref().unwrap_or(old.artist.as_str()),
            changes.lyric_text.as_deref().unwrap_or(old.lyric_text.as_str()),
            changes.user_note.as_deref().unwrap_or(old.user_note.as_str()),
        )?;
        let revised = LyricEntry::revised(
            fields.song_title,
            fields.artist,
            fields.lyric_text,
            fields.user_note,
            old.date_added.clone(),
        );
        if self.journal.replace_at(index, revised.clone()) {
            log::info!("Updated entry {:?} for {:?}", old.song_title, self.username());
            self.changed();
        }
        Ok(revised)
    }

    pub fn delete_entry(&mut self, index: usize) -> AppResult<LyricEntry> {
        let entry = self
            .journal
            .remove_at(index)
            .ok_or(AppError::NoSuchEntry(index + 1))?;
        log::info!("Deleted entry {:?} for {:?}", entry.song_title, self.username());
        self.changed();
        Ok(entry)
    }

    /// Writes the journal now, regardless of `auto_save`.
    pub fn save(&mut self) -> StoreResult<()> {
        self.journal.save()?;
        self.pending_changes = false;
        Ok(())
    }

    /// Flushes anything not yet written and ends the session.
    pub fn logout(mut self) -> StoreResult<()> {
        if self.pending_changes {
            self.save()?;
        }
        log::info!("User {:?} logged out", self.username());
        Ok(())
    }

    fn changed(&mut self) {
        self.pending_changes = true;
        if self.auto_save {
            if let Err(e) = self.save() {
                log::error!(
                    "Auto-save of {:?} failed: {}. Changes are kept in memory.",
                    self.journal.file_path(),
                    e
                );
            }
        }
    }
}
