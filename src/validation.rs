// src/validation.rs
//! Input rules checked before the stores are touched. The stores accept
//! anything; these are the limits a user actually sees.

use crate::config::Config;
use crate::error::ValidationError;

/// Both fields must be present. The username is compared after trimming,
/// the password as typed.
pub fn check_login_input(username: &str, password: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok(())
}

/// Presence and minimum lengths for a new account. Uniqueness is checked
/// separately against the account store.
pub fn check_registration_input(
    username: &str,
    password: &str,
    config: &Config,
) -> Result<(), ValidationError> {
    check_login_input(username, password)?;
    // The username becomes part of the journal file name.
    if username.contains(|c: char| c == '/' || c == '\\') {
        return Err(ValidationError::UsernameHasPathSeparator);
    }
    if username.trim().chars().count() < config.min_username_len {
        return Err(ValidationError::UsernameTooShort(config.min_username_len));
    }
    if password.chars().count() < config.min_password_len {
        return Err(ValidationError::PasswordTooShort(config.min_password_len));
    }
    Ok(())
}

/// Trimmed lyric fields ready to become an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFields {
    pub song_title: String,
    pub artist: String,
    pub lyric_text: String,
    pub user_note: String,
}

impl EntryFields {
    /// Trims every field and requires title, artist and lyric text. The
    /// note may be empty.
    pub fn new(
        song_title: &str,
        artist: &str,
        lyric_text: &str,
        user_note: &str,
    ) -> Result<Self, ValidationError> {
        let fields = EntryFields {
            song_title: song_title.trim().to_string(),
            artist: artist.trim().to_string(),
            lyric_text: lyric_text.trim().to_string(),
            user_note: user_note.trim().to_string(),
        };
        if fields.song_title.is_empty() || fields.artist.is_empty() || fields.lyric_text.is_empty() {
            return Err(ValidationError::MissingEntryFields);
        }
        Ok(fields)
    }
}
