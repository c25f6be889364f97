use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn write_json_model(root: &Path) -> std::path::PathBuf {
    let path = root.join("model.json");
    fs::write(
        &path,
        r#"{
  "schema_version": 1,
  "dimension": 2,
  "vectors": {
    "apple": [1.0, 0.0],
    "banana": [1.0, 0.0],
    "cherry": [0.0, 1.0],
    "plum": [0.0, 1.0]
  }
}"#,
    )
    .unwrap();
    path
}

fn write_corpus(root: &Path) -> std::path::PathBuf {
    let path = root.join("titles.txt");
    fs::write(
        &path,
        "apple banana\nbanana apple\ncherry plum\nplum cherry\napple banana\n",
    )
    .unwrap();
    path
}

fn setup() -> (TempDir, std::path::PathBuf, std::path::PathBuf) {
    let temp = tempdir().unwrap();
    let model = write_json_model(temp.path());
    let corpus = write_corpus(temp.path());
    (temp, model, corpus)
}

#[test]
fn text_report_orders_clusters_and_deduplicates() {
    let (_temp, model, corpus) = setup();

    Command::cargo_bin("textclust")
        .expect("binary")
        .arg(&model)
        .arg(&corpus)
        .assert()
        .success()
        .stdout(predicate::str::contains("Sentences: 4"))
        .stdout(predicate::str::contains("Clusters: 2"))
        .stdout(predicate::str::contains("cluster 0 mean_distance:0.000000 :"))
        .stdout(predicate::str::contains("applebanana"))
        .stdout(predicate::str::contains("cherryplum"))
        .stdout(predicate::str::contains("---------"));
}

#[test]
fn json_report_is_machine_readable() {
    let (_temp, model, corpus) = setup();

    let output = Command::cargo_bin("textclust")
        .expect("binary")
        .arg(&model)
        .arg(&corpus)
        .arg("--json")
        .output()
        .expect("command run");
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(report["sentence_count"], 4);
    assert_eq!(report["cluster_count"], 2);
    assert_eq!(report["converged"], true);

    let clusters = report["clusters"].as_array().expect("clusters array");
    assert_eq!(clusters.len(), 2);
    for cluster in clusters {
        assert_eq!(cluster["mean_distance"].as_f64(), Some(0.0));
        assert_eq!(cluster["size"], 2);
        assert_eq!(cluster["samples"].as_array().map(Vec::len), Some(2));
    }
}

#[test]
fn samples_flag_caps_printed_sentences() {
    let (_temp, model, corpus) = setup();

    let output = Command::cargo_bin("textclust")
        .expect("binary")
        .arg(&model)
        .arg(&corpus)
        .arg("--json")
        .arg("--samples")
        .arg("1")
        .output()
        .expect("command run");
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    for cluster in report["clusters"].as_array().expect("clusters array") {
        assert_eq!(cluster["samples"].as_array().map(Vec::len), Some(1));
        // The cap trims samples, not the recorded cluster size.
        assert_eq!(cluster["size"], 2);
    }
}

#[test]
fn word2vec_text_model_with_whitespace_segmenter() {
    let temp = tempdir().unwrap();
    let model = temp.path().join("model.w2v");
    fs::write(
        &model,
        "4 2\napple 1.0 0.0\nbanana 1.0 0.0\ncherry 0.0 1.0\nplum 0.0 1.0\n",
    )
    .unwrap();
    let corpus = write_corpus(temp.path());

    Command::cargo_bin("textclust")
        .expect("binary")
        .arg(&model)
        .arg(&corpus)
        .arg("--segmenter")
        .arg("whitespace")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sentences: 4"))
        .stdout(predicate::str::contains("Clusters: 2"));
}

#[test]
fn missing_corpus_names_the_failing_stage() {
    let temp = tempdir().unwrap();
    let model = write_json_model(temp.path());

    Command::cargo_bin("textclust")
        .expect("binary")
        .arg(&model)
        .arg(temp.path().join("absent.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load corpus"));
}

#[test]
fn malformed_model_names_the_failing_stage() {
    let temp = tempdir().unwrap();
    let model = temp.path().join("model.json");
    fs::write(&model, r#"{"schema_version":9,"dimension":2,"vectors":{}}"#).unwrap();
    let corpus = write_corpus(temp.path());

    Command::cargo_bin("textclust")
        .expect("binary")
        .arg(&model)
        .arg(&corpus)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load embedding store"));
}
