use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn library(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("library").unwrap();
    cmd.env("LIBRARY_CLI_DATA_DIR", data_dir.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_add_and_list() {
    let dir = TempDir::new().unwrap();

    library(&dir)
        .args(["book", "add", "1", "--title", "Dune", "--author", "Herbert", "--category", "Fiction"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added book: #1 Dune by Herbert"));

    library(&dir)
        .args(["book", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dune").and(predicate::str::contains("Available")));
}

#[test]
fn test_duplicate_id_fails() {
    let dir = TempDir::new().unwrap();

    library(&dir).args(["book", "add", "7"]).assert().success();
    library(&dir)
        .args(["book", "add", "7", "--title", "Other"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Book already exists: 7"));
}

#[test]
fn test_borrow_return_cycle() {
    let dir = TempDir::new().unwrap();

    library(&dir)
        .args(["book", "add", "1", "-t", "Dune", "-a", "Herbert", "-c", "Fiction"])
        .assert()
        .success();

    library(&dir)
        .args(["loan", "borrow", "1", "--name", "Alice", "--contact", "a@x.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Borrower: Alice (a@x.com)"));

    library(&dir)
        .args(["loan", "borrow", "1", "--name", "Bob"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already borrowed"));

    library(&dir)
        .args(["book", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: Borrowed"));

    library(&dir)
        .args(["loan", "return", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No fine due."));

    library(&dir)
        .args(["loan", "return", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not borrowed"));
}

#[test]
fn test_filter_by_category() {
    let dir = TempDir::new().unwrap();

    library(&dir)
        .args(["book", "add", "1", "-t", "Dune", "-c", "Fiction"])
        .assert()
        .success();
    library(&dir)
        .args(["book", "add", "2", "-t", "Cosmos", "-c", "Science"])
        .assert()
        .success();

    library(&dir)
        .args(["book", "filter", "Fiction"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dune").and(predicate::str::contains("Cosmos").not()));
}

#[test]
fn test_menu_from_stdin() {
    let dir = TempDir::new().unwrap();

    library(&dir)
        .write_stdin("1\n5\nRebecca\ndu Maurier\nGothic\n2\n7\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Book added successfully!")
                .and(predicate::str::contains("Rebecca"))
                .and(predicate::str::contains("Exiting Library.")),
        );

    library(&dir)
        .args(["book", "show", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Author: du Maurier"));
}

#[test]
fn test_data_file_is_obfuscated() {
    let dir = TempDir::new().unwrap();

    library(&dir)
        .args(["book", "add", "1", "-t", "Dune"])
        .assert()
        .success();

    let raw = std::fs::read(dir.path().join("data").join("library_books.dat")).unwrap();
    assert!(!String::from_utf8_lossy(&raw).contains("Dune"));
}

#[test]
fn test_config_shows_paths() {
    let dir = TempDir::new().unwrap();

    library(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("library_books.dat").and(predicate::str::contains("14 days")));
}

#[test]
fn test_return_prints_result_before_save_error() {
    let dir = TempDir::new().unwrap();

    library(&dir)
        .args(["book", "add", "1", "-t", "Dune"])
        .assert()
        .success();
    library(&dir)
        .args(["loan", "borrow", "1", "--name", "Alice"])
        .assert()
        .success();

    std::fs::create_dir(dir.path().join("data").join("library_books.dat.tmp")).unwrap();

    library(&dir)
        .args(["loan", "return", "1"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Returned: #1 Dune").and(predicate::str::contains("No fine due.")))
        .stderr(predicate::str::contains("Storage error"));
}

#[test]
fn test_invalid_date_format_is_rejected() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.json"), r#"{"date_format": "%Q"}"#).unwrap();

    library(&dir)
        .args(["book", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("date_format"));
}
