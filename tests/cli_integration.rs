use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn tango(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tango").unwrap();
    cmd.env("TANGO_HOME", home).env_remove("TANGO_LOG");
    cmd
}

#[test]
fn test_naked_invocation_lists_bundled_words() {
    let home = tempfile::tempdir().unwrap();

    tango(home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("食べます"))
        .stdout(predicate::str::contains("Total words: 34"));

    // Listing alone never writes the collection.
    assert!(!home.path().join("vocabularies.json").exists());
}

#[test]
fn test_add_search_export() {
    let home = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();

    tango(home.path())
        .args(["add", "--kanji", "男", "--hiragana", "おとこ", "--vietnamese", "đàn ông"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Filled romaji: otoko"))
        .stdout(predicate::str::contains("Added 35: 男"));

    tango(home.path())
        .args(["search", "OTOKO"])
        .assert()
        .success()
        .stdout(predicate::str::contains("男"))
        .stdout(predicate::str::contains("Showing 1 of 35 words"));

    tango(home.path())
        .args(["export", "-o"])
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 35 entries"));

    let exported = fs::read_to_string(out.path().join("vocabularies.json")).unwrap();
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&exported).unwrap();
    assert_eq!(parsed.len(), 35);
    assert_eq!(parsed[34]["romaji"], "otoko");
    assert!(exported.contains("\n  {\n    \""));
}

#[test]
fn test_search_by_type() {
    let home = tempfile::tempdir().unwrap();

    tango(home.path())
        .args(["search", "uống", "-t", "vietnamese"])
        .assert()
        .success()
        .stdout(predicate::str::contains("飲みます"))
        .stdout(predicate::str::contains("食べます").not());

    tango(home.path())
        .args(["search", "xyz", "--type", "vietnamese"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No words found."));

    tango(home.path())
        .args(["list", "-q", "たべ", "-t", "hiragana"])
        .assert()
        .success()
        .stdout(predicate::str::contains("食べます"));
}

#[test]
fn test_unknown_search_type_matches_nothing() {
    let home = tempfile::tempdir().unwrap();

    tango(home.path())
        .args(["search", "tabe", "-t", "kanji"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No words found."))
        .stderr(predicate::str::contains("unknown search type"));
}

#[test]
fn test_delete_shifts_numbers_and_rejects_out_of_range() {
    let home = tempfile::tempdir().unwrap();

    tango(home.path())
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 1: 食べます"));

    tango(home.path())
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. 飲みます"))
        .stdout(predicate::str::contains("Total words: 33"));

    tango(home.path())
        .args(["rm", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Entry 999 is out of range"))
        .stderr(predicate::str::contains("33 entries"));

    tango(home.path())
        .args(["rm", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid entry selector"));
}

#[test]
fn test_edit_changes_only_given_fields() {
    let home = tempfile::tempdir().unwrap();

    tango(home.path())
        .args(["edit", "2", "--vietnamese", "uống (lịch sự)"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated 2: 飲みます"));

    let stored = fs::read_to_string(home.path().join("vocabularies.json")).unwrap();
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&stored).unwrap();
    assert_eq!(parsed[1]["vietnamese"], "uống (lịch sự)");
    assert_eq!(parsed[1]["romaji"], "nomimasu");

    tango(home.path())
        .args(["edit", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to change"));
}

#[test]
fn test_invalid_stored_json_falls_back_to_defaults() {
    let home = tempfile::tempdir().unwrap();
    fs::write(home.path().join("vocabularies.json"), "{ broken").unwrap();

    tango(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total words: 34"));
}

#[test]
fn test_doctor_repairs_stored_entries() {
    let home = tempfile::tempdir().unwrap();
    fs::write(
        home.path().join("vocabularies.json"),
        r#"[{"kanji":"北","hiragana":"きた","romaji":null,"vietnamese":"phía bắc","level":5}]"#,
    )
    .unwrap();

    tango(home.path())
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("Inconsistencies found and fixed"));

    tango(home.path())
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("No inconsistencies found"));

    let stored = fs::read_to_string(home.path().join("vocabularies.json")).unwrap();
    assert!(!stored.contains("level"));
    assert!(stored.contains(r#""romaji":"""#));
}

#[test]
fn test_fill_readings_uses_reading_table() {
    let home = tempfile::tempdir().unwrap();
    fs::write(
        home.path().join("vocabularies.json"),
        r#"[{"kanji":"学校","hiragana":"","romaji":"","vietnamese":"trường học"}]"#,
    )
    .unwrap();

    tango(home.path())
        .arg("fill-readings")
        .assert()
        .success()
        .stdout(predicate::str::contains("Filled 1 hiragana and 1 romaji"));

    tango(home.path())
        .args(["search", "gakkou"])
        .assert()
        .success()
        .stdout(predicate::str::contains("がっこう"));
}

#[test]
fn test_config_sets_default_search_type() {
    let home = tempfile::tempdir().unwrap();

    tango(home.path())
        .args(["config", "search_type", "vietnamese"])
        .assert()
        .success()
        .stdout(predicate::str::contains("search_type set to vietnamese"));

    tango(home.path())
        .args(["search", "ăn"])
        .assert()
        .success()
        .stdout(predicate::str::contains("食べます"));

    tango(home.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("search_type = vietnamese"))
        .stdout(predicate::str::contains("export_file = vocabularies.json"));
}

#[test]
fn test_data_dir_flag_overrides_env() {
    let home = tempfile::tempdir().unwrap();
    let other = tempfile::tempdir().unwrap();

    tango(home.path())
        .arg("--data-dir")
        .arg(other.path())
        .args(["add", "--hiragana", "ねこ", "--vietnamese", "con mèo"])
        .assert()
        .success();

    assert!(other.path().join("vocabularies.json").exists());
    assert!(!home.path().join("vocabularies.json").exists());
}

#[test]
fn test_foreign_ids_and_dates_survive_add() {
    let home = tempfile::tempdir().unwrap();
    fs::write(
        home.path().join("vocabularies.json"),
        r#"[{"id":"42","kanji":"猫","hiragana":"ねこ","romaji":"neko","vietnamese":"con mèo","dateAdded":"2024-01-05"}]"#,
    )
    .unwrap();

    tango(home.path())
        .args(["add", "--kanji", "犬", "--hiragana", "いぬ", "--vietnamese", "con chó"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 2: 犬"));

    let stored = fs::read_to_string(home.path().join("vocabularies.json")).unwrap();
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&stored).unwrap();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0]["id"], "42");
    assert_eq!(parsed[0]["dateAdded"], "2024-01-05");
}
