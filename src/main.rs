// src/main.rs
use clap::Parser;
use lyric_journal::accounts::{self, AccountStore, USERS_FILE_NAME};
use lyric_journal::{cli, config, AppError};

fn main() -> Result<(), AppError> {
    env_logger::init();
    log::info!("Starting LyricJournal");

    let cli_args = cli::Cli::parse();

    let mut config = config::load_config();
    if let Some(dir) = cli_args.data_dir.clone() {
        log::debug!("Data directory overridden on the command line: {:?}", dir);
        config.data_dir = Some(dir);
    }

    let users_path = config.data_dir().join(USERS_FILE_NAME);
    if accounts::is_first_run(&users_path) {
        println!("Welcome to LyricJournal! A default account 'admin' (password 'admin') has been created.");
    }
    let accounts = AccountStore::open(users_path);
    log::info!("Using account file {:?}", accounts.path());

    if let Err(e) = cli::handle_cli_command(cli_args, &accounts, &config) {
        log::error!("Application failed: {:#?}", e);
        eprintln!("Error: {}", e);
        return Err(e);
    }

    log::info!("LyricJournal finished successfully.");
    Ok(())
}
