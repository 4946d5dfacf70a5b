use assert_cmd::Command;
use predicates::prelude::*;

fn callsynth() -> Command {
    Command::cargo_bin("callsynth").unwrap()
}

#[test]
fn catalog_json_lists_every_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let output = callsynth()
        .current_dir(dir.path())
        .args(["catalog", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let items: Vec<serde_json::Value> = serde_json::from_slice(&output).unwrap();
    assert_eq!(items.len(), 66);
    for item in &items {
        assert!(item["category"].is_string());
        assert!(item["detail"].is_string());
        let label = item["label"].as_u64().unwrap();
        assert!(label == 0 || label == 1);
    }
}

#[test]
fn config_prints_the_default_path() {
    let dir = tempfile::tempdir().unwrap();
    callsynth()
        .current_dir(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("callsynth"));
}

#[test]
fn generate_requires_the_api_key() {
    let dir = tempfile::tempdir().unwrap();
    callsynth()
        .current_dir(dir.path())
        .env_remove("GEMINI_API_KEY")
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}

#[test]
fn synthesize_requires_speech_credentials() {
    let dir = tempfile::tempdir().unwrap();
    callsynth()
        .current_dir(dir.path())
        .env_remove("AZURE_SPEECH_KEY")
        .env_remove("AZURE_SPEECH_REGION")
        .arg("synthesize")
        .assert()
        .failure()
        .stderr(predicate::str::contains("AZURE_SPEECH_KEY"));
}

#[test]
fn check_fails_on_a_missing_raw_csv() {
    let dir = tempfile::tempdir().unwrap();
    callsynth()
        .current_dir(dir.path())
        .args(["check", "--csv", "absent.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.csv"));
}

#[test]
fn unknown_backend_names_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    callsynth()
        .current_dir(dir.path())
        .env("GEMINI_API_KEY", "test-key")
        .args(["generate", "--backend", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown generation backend"));
}
