// src/models.rs
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar-date layout used for `dateAdded`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One journaled lyric. Field names on disk are camelCase so existing
/// `<user>_lyrics.json` files stay readable.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LyricEntry {
    pub song_title: String,
    pub artist: String,
    pub lyric_text: String,
    #[serde(default)]
    pub user_note: String,
    pub date_added: String,
}

impl LyricEntry {
    /// Creates an entry stamped with today's local date.
    pub fn new(song_title: String, artist: String, lyric_text: String, user_note: String) -> Self {
        let today = Local::now().format(DATE_FORMAT).to_string();
        Self::revised(song_title, artist, lyric_text, user_note, today)
    }

    /// Creates an entry that keeps an existing `date_added`. Edits go through
    /// here so a revision never picks up today's date.
    pub fn revised(
        song_title: String,
        artist: String,
        lyric_text: String,
        user_note: String,
        date_added: String,
    ) -> Self {
        Self {
            song_title,
            artist,
            lyric_text,
            user_note,
            date_added,
        }
    }

    pub fn has_note(&self) -> bool {
        !self.user_note.trim().is_empty()
    }

    /// True if `needle` (already lowercased) occurs in the title, artist or
    /// lyric text. The note is not searched.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.song_title.to_lowercase().contains(needle)
            || self.artist.to_lowercase().contains(needle)
            || self.lyric_text.to_lowercase().contains(needle)
    }
}

impl fmt::Display for LyricEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {}\n\"{}\"\nNote: {}\nDate: {}",
            self.song_title, self.artist, self.lyric_text, self.user_note, self.date_added
        )
    }
}
