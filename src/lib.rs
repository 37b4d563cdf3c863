//! Lyric journal: per-user lyric entries stored as JSON, plus a small
//! username/password registry.
pub mod accounts;
pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod journal;
pub mod models;
pub mod session;
pub mod validation;

pub use crate::accounts::AccountStore;
pub use crate::error::{AppError, AppResult, StoreError, StoreResult, ValidationError};
pub use crate::journal::JournalStore;
pub use crate::models::LyricEntry;
pub use crate::session::{EntryChanges, Session};
