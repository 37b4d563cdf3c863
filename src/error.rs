// src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("Invalid username or password. Please try again.")]
    InvalidCredentials,
    #[error("No entry numbered {0}. Use 'list' to see entry numbers.")]
    NoSuchEntry(usize),
    #[error("CLI error: {0}")]
    Cli(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Input rejected at the command boundary. Messages are shown to the user as-is.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter both username and password.")]
    MissingCredentials,
    #[error("Username must be at least {0} characters long.")]
    UsernameTooShort(usize),
    #[error("Password must be at least {0} characters long.")]
    PasswordTooShort(usize),
    #[error("Username cannot contain '/' or '\\'.")]
    UsernameHasPathSeparator,
    #[error("Username '{0}' is already taken. Please choose a different username.")]
    UsernameTaken(String),
    #[error("Please fill in Song Title, Artist, and Lyric Text fields.")]
    MissingEntryFields,
}

pub type AppResult<T> = Result<T, AppError>;
pub type StoreResult<T> = Result<T, StoreError>;
