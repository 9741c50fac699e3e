use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn fixture() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("words.txt"), "cat bat\ncats\n").unwrap();
    fs::write(dir.path().join("corpus.txt"), "cat cat cat cat bat dog\n").unwrap();
    dir
}

fn spellsuggest(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("spellsuggest").unwrap();
    cmd.current_dir(dir)
        .env_remove("SPELLSUGGEST_DICTIONARY")
        .env_remove("SPELLSUGGEST_CORPUS")
        .env_remove("RUST_LOG")
        .args(["--no-color", "--personal-dict"])
        .arg(dir.join("personal.txt"))
        .arg("--dictionary")
        .arg(dir.join("words.txt"))
        .arg("--corpus")
        .arg(dir.join("corpus.txt"));
    cmd
}

#[test]
fn test_known_word_is_ranked_first() {
    let dir = fixture();
    spellsuggest(dir.path())
        .arg("cat")
        .assert()
        .success()
        .stdout(predicate::str::contains("cat known (frequency 5)"))
        .stdout(predicate::str::contains("CAT (0, 5), BAT (1, 2), CATS (1, 1)"))
        .stdout(predicate::str::contains("All words recognized"));
}

#[test]
fn test_unknown_word_fails() {
    let dir = fixture();
    spellsuggest(dir.path())
        .arg("caat")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("caat unknown"))
        .stdout(predicate::str::contains("CAT (1, 5)"));
}

#[test]
fn test_no_fail() {
    let dir = fixture();
    spellsuggest(dir.path())
        .args(["--no-fail", "zzzzzzzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no suggestions"));
}

#[test]
fn test_json_output() {
    let dir = fixture();
    let output = spellsuggest(dir.path())
        .args(["--format", "json", "--no-fail", "bat", "ct"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["checked"], 2);
    assert_eq!(json["unknown_count"], 1);
    assert_eq!(json["reports"][0]["status"], "known");
    assert_eq!(json["reports"][0]["suggestions"][0]["word"], "BAT");
    assert_eq!(json["reports"][1]["suggestions"][0]["word"], "CAT");
    assert_eq!(json["reports"][1]["suggestions"][0]["edit_distance"], 1);
}

#[test]
fn test_max_suggestions() {
    let dir = fixture();
    spellsuggest(dir.path())
        .args(["-n", "1", "cat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CAT (0, 5)"))
        .stdout(predicate::str::contains("BAT").not());
}

#[test]
fn test_freq_command() {
    let dir = fixture();
    spellsuggest(dir.path())
        .args(["freq", "cat", "xyz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cat 5"))
        .stdout(predicate::str::contains("word not found"));
}

#[test]
fn test_add_to_personal_dict() {
    let dir = fixture();
    spellsuggest(dir.path())
        .args(["--add-to-dict", "ferris"])
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(dir.path().join("personal.txt")).unwrap(),
        "ferris\n"
    );

    spellsuggest(dir.path())
        .arg("ferris")
        .assert()
        .success()
        .stdout(predicate::str::contains("ferris known (frequency 1)"));
}

#[test]
fn test_missing_word_list() {
    let dir = tempdir().unwrap();
    spellsuggest(dir.path())
        .arg("cat")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Word list not found"));
}

#[test]
fn test_interactive_without_terminal_fails() {
    let dir = fixture();
    spellsuggest(dir.path())
        .arg("--interactive")
        .write_stdin("cat\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read word from terminal"));
}

#[test]
fn test_dict_info() {
    let dir = fixture();
    spellsuggest(dir.path())
        .args(["dict", "info"])
        .arg(dir.path().join("words.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Words: 3"))
        .stdout(predicate::str::contains("Total frequency: 8"));
}

#[test]
fn test_completion() {
    Command::cargo_bin("spellsuggest")
        .unwrap()
        .args(["--completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("spellsuggest"));
}
