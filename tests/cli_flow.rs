use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

// Runs the binary against `data_dir`, with config lookups kept inside it too.
fn journal_cmd(data_dir: &Path) -> anyhow::Result<Command> {
    let mut cmd = Command::cargo_bin("lyric-journal")?;
    cmd.env("HOME", data_dir)
        .env("XDG_CONFIG_HOME", data_dir.join("config"))
        .env_remove("LYRIC_JOURNAL_USER")
        .env_remove("LYRIC_JOURNAL_PASSWORD")
        .env("LYRIC_JOURNAL_DATA_DIR", data_dir);
    Ok(cmd)
}

#[test]
fn register_add_search_edit_delete_flow() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let data = dir.path();

    journal_cmd(data)?
        .env("LYRIC_JOURNAL_PASSWORD", "pass1")
        .arg("register")
        .arg("Alice")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to LyricJournal, Alice!"));
    assert!(data.join("users.json").exists());

    journal_cmd(data)?
        .env("LYRIC_JOURNAL_USER", "Alice")
        .env("LYRIC_JOURNAL_PASSWORD", "pass1")
        .args(["add", "-t", "Bohemian Rhapsody", "-a", "Queen", "-l", "Is this the real life?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lyric added: Bohemian Rhapsody by Queen"));
    assert!(data.join("Alice_lyrics.json").exists());

    journal_cmd(data)?
        .env("LYRIC_JOURNAL_USER", "Alice")
        .env("LYRIC_JOURNAL_PASSWORD", "pass1")
        .args(["add", "-t", "Imagine", "-a", "John Lennon", "-l", "Imagine all the people", "-n", "queen of songs"])
        .assert()
        .success();

    journal_cmd(data)?
        .env("LYRIC_JOURNAL_USER", "Alice")
        .env("LYRIC_JOURNAL_PASSWORD", "pass1")
        .args(["search", "QUEEN"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Bohemian Rhapsody by Queen"))
        .stdout(predicate::str::contains("Imagine").not());

    journal_cmd(data)?
        .env("LYRIC_JOURNAL_USER", "Alice")
        .env("LYRIC_JOURNAL_PASSWORD", "pass1")
        .args(["edit", "2", "--artist", "Lennon"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry 2 updated: Imagine by Lennon"));

    journal_cmd(data)?
        .env("LYRIC_JOURNAL_USER", "Alice")
        .env("LYRIC_JOURNAL_PASSWORD", "pass1")
        .args(["show", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imagine by Lennon\n\"Imagine all the people\"\nNote: queen of songs"));

    journal_cmd(data)?
        .env("LYRIC_JOURNAL_USER", "Alice")
        .env("LYRIC_JOURNAL_PASSWORD", "pass1")
        .args(["delete", "1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry deleted successfully."));

    journal_cmd(data)?
        .env("LYRIC_JOURNAL_USER", "Alice")
        .env("LYRIC_JOURNAL_PASSWORD", "pass1")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Imagine by Lennon"))
        .stdout(predicate::str::contains("Bohemian").not());

    Ok(())
}

#[test]
fn first_run_creates_admin_account() -> anyhow::Result<()> {
    let dir = tempdir()?;

    journal_cmd(dir.path())?
        .env("LYRIC_JOURNAL_USER", "admin")
        .env("LYRIC_JOURNAL_PASSWORD", "admin")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("default account 'admin'"))
        .stdout(predicate::str::contains("No entries found."));

    journal_cmd(dir.path())?
        .env("LYRIC_JOURNAL_USER", "admin")
        .env("LYRIC_JOURNAL_PASSWORD", "admin")
        .arg("users")
        .assert()
        .success()
        .stdout(predicate::str::contains("default account").not())
        .stdout(predicate::str::contains("  - admin"));

    Ok(())
}

#[test]
fn rejected_inputs_report_errors() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let data = dir.path();

    journal_cmd(data)?
        .env("LYRIC_JOURNAL_PASSWORD", "pass")
        .args(["register", "ab"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Username must be at least 3 characters long."));

    journal_cmd(data)?
        .env("LYRIC_JOURNAL_PASSWORD", "pass")
        .args(["register", "ADMIN"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already taken"));

    journal_cmd(data)?
        .env("LYRIC_JOURNAL_USER", "admin")
        .env("LYRIC_JOURNAL_PASSWORD", "Admin")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid username or password."));

    journal_cmd(data)?
        .env("LYRIC_JOURNAL_USER", "admin")
        .env("LYRIC_JOURNAL_PASSWORD", "admin")
        .args(["add", "-t", " ", "-a", "Queen", "-l", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please fill in Song Title, Artist, and Lyric Text fields."));

    journal_cmd(data)?
        .env("LYRIC_JOURNAL_USER", "admin")
        .env("LYRIC_JOURNAL_PASSWORD", "admin")
        .args(["delete", "3", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No entry numbered 3"));

    Ok(())
}
