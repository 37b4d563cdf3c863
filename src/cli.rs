// src/cli.rs
use crate::accounts::AccountStore;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::LyricEntry;
use crate::session::{EntryChanges, Session};
use crate::validation::EntryFields;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

/// Keep the lyrics that mean something to you.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding users.json and the per-user journal files
    #[clap(long, global = true, value_parser, env = "LYRIC_JOURNAL_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Account to log in as
    #[clap(short, long, global = true, env = "LYRIC_JOURNAL_USER")]
    pub user: Option<String>,

    /// Password for the account. Prompted for when not given.
    #[clap(long, global = true, env = "LYRIC_JOURNAL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new account
    Register {
        username: String,
    },
    /// List every registered username
    Users,
    /// Add a lyric to your journal
    Add {
        #[clap(short, long)]
        title: String,
        #[clap(short, long)]
        artist: String,
        #[clap(short, long)]
        lyric: String,
        #[clap(short, long, default_value = "")]
        note: String,
    },
    /// Show all entries
    List,
    /// Find entries by title, artist or lyric text
    Search {
        keyword: String,
    },
    /// Show one entry in full
    Show {
        /// Entry number as printed by `list`
        number: usize,
    },
    /// Change an entry. Fields left out keep their current value.
    Edit {
        number: usize,
        #[clap(short, long)]
        title: Option<String>,
        #[clap(short, long)]
        artist: Option<String>,
        #[clap(short, long)]
        lyric: Option<String>,
        #[clap(short, long)]
        note: Option<String>,
    },
    /// Remove an entry
    Delete {
        number: usize,
        /// Skip the confirmation prompt
        #[clap(short, long)]
        yes: bool,
    },
}

pub fn handle_cli_command(cli: Cli, accounts: &AccountStore, config: &Config) -> AppResult<()> {
    log::debug!("Handling CLI command: {:?}", cli.command);
    match cli.command {
        Commands::Register { ref username } => {
            log::info!("Executing 'register' command for {:?}", username);
            let password = match cli.password.clone() {
                Some(password) => password,
                None => {
                    let password = prompt_password("Choose a password: ")?;
                    let confirm = prompt_password("Confirm password: ")?;
                    if password != confirm {
                        log::warn!("Password confirmation failed: passwords do not match.");
                        return Err(AppError::Cli("Passwords do not match.".to_string()));
                    }
                    password
                }
            };
            let session = Session::register(accounts, config, username, &password)?;
            println!(
                "Registration successful! Welcome to LyricJournal, {}!",
                session.username()
            );
            session.logout()?;
            Ok(())
        }
        Commands::Users => {
            let session = login(&cli, accounts, config)?;
            let mut names: Vec<String> = accounts.list_usernames().into_iter().collect();
            names.sort();
            println!("Registered users ({}):", names.len());
            for name in &names {
                println!("  - {}", name);
            }
            session.logout()?;
            Ok(())
        }
        Commands::Add {
            ref title,
            ref artist,
            ref lyric,
            ref note,
        } => {
            let fields = EntryFields::new(title, artist, lyric, note)?;
            let mut session = login(&cli, accounts, config)?;
            let added = session.add_entry(fields)?;
            println!("Lyric added: {} by {}", added.song_title, added.artist);
            session.logout()?;
            Ok(())
        }
        Commands::List => {
            let session = login(&cli, accounts, config)?;
            print_entries(session.entries());
            session.logout()?;
            Ok(())
        }
        Commands::Search { ref keyword } => {
            let session = login(&cli, accounts, config)?;
            let results = session.search(keyword);
            log::info!("Search for {:?} matched {} entries", keyword, results.len());
            print_entries(&results);
            session.logout()?;
            Ok(())
        }
        Commands::Show { number } => {
            let session = login(&cli, accounts, config)?;
            println!("{}", session.entry(to_index(number)?)?);
            session.logout()?;
            Ok(())
        }
        Commands::Edit {
            number,
            ref title,
            ref artist,
            ref lyric,
            ref note,
        } => {
            let index = to_index(number)?;
            let changes = EntryChanges {
                song_title: title.clone(),
                artist: artist.clone(),
                lyric_text: lyric.clone(),
                user_note: note.clone(),
            };
            let mut session = login(&cli, accounts, config)?;
            let updated = session.edit_entry(index, changes)?;
            println!("Entry {} updated: {} by {}", number, updated.song_title, updated.artist);
            session.logout()?;
            Ok(())
        }
        Commands::Delete { number, yes } => {
            let index = to_index(number)?;
            let mut session = login(&cli, accounts, config)?;
            let title = session.entry(index)?.song_title.clone();
            if !yes && !confirm(&format!("Delete '{}'? (y/N): ", title))? {
                println!("Delete cancelled.");
                log::info!("Delete of entry {} cancelled by user.", number);
                return session.logout().map_err(AppError::from);
            }
            session.delete_entry(index)?;
            println!("Entry deleted successfully.");
            session.logout()?;
            Ok(())
        }
    }
}

fn login(cli: &Cli, accounts: &AccountStore, config: &Config) -> AppResult<Session> {
    let username = cli.user.as_deref().ok_or_else(|| {
        AppError::Cli("No user given. Pass --user or set LYRIC_JOURNAL_USER.".to_string())
    })?;
    let password = match cli.password.clone() {
        Some(password) => password,
        None => prompt_password(&format!("Password for {}: ", username))?,
    };
    Session::login(accounts, config, username, &password)
}

fn prompt_password(prompt: &str) -> AppResult<String> {
    rpassword::prompt_password(prompt).map_err(|e| {
        log::error!("Failed to read password: {}", e);
        AppError::Cli(format!("Failed to read password: {}", e))
    })
}

fn confirm(prompt: &str) -> AppResult<bool> {
    print!("{}", prompt);
    io::stdout().flush().map_err(|e| {
        log::error!("Failed to flush stdout for confirmation: {}", e);
        AppError::Cli(format!("Failed to flush stdout: {}", e))
    })?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer).map_err(|e| {
        log::error!("Failed to read confirmation: {}", e);
        AppError::Cli(format!("Failed to read confirmation: {}", e))
    })?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

/// Entry numbers start at 1.
fn to_index(number: usize) -> AppResult<usize> {
    number.checked_sub(1).ok_or(AppError::NoSuchEntry(number))
}

fn print_entries(entries: &[LyricEntry]) {
    if entries.is_empty() {
        println!("No entries found.");
        return;
    }
    for (i, entry) in entries.iter().enumerate() {
        println!("{}. {} by {}", i + 1, entry.song_title, entry.artist);
        println!("   \"{}\"", entry.lyric_text);
        if entry.has_note() {
            println!("   Note: {}", entry.user_note);
        }
        println!("   Added: {}", entry.date_added);
    }
}
