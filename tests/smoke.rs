use std::{fs, path::PathBuf};

use assert_cmd::Command;

fn bundled_rules() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources/negex_triggers.txt")
}

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("clinical-negex").expect("binary exists");
    cmd.env_remove("NEGATION_RULES_PATH").env("RUST_LOG", "warn");
    cmd
}

#[test]
fn cli_help_runs() {
    cli().arg("--help").assert().success();
}

#[test]
fn missing_rules_path_fails_before_analysis() {
    let dir = tempfile::tempdir().unwrap();
    cli()
        .current_dir(dir.path())
        .args(["sentence", "--text", "no lesions", "--entity", "lesions"])
        .assert()
        .failure();
}

#[test]
fn rules_command_lists_priority_order() {
    let output = cli()
        .arg("rules")
        .arg("--rules")
        .arg(bundled_rules())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    let first = stdout.lines().next().unwrap();
    assert!(first.contains("[PREN]") || first.contains("[POST]") || first.contains("[CONJ]"));
    assert!(stdout.contains("does not exist"));
}

#[test]
fn sentence_command_prints_verdicts() {
    let output = cli()
        .args(["sentence", "--text", "CT shows lesions exist but no sacrum"])
        .args(["--entity", "lesions", "--entity", "sacrum", "--rules"])
        .arg(bundled_rules())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let polarities: Vec<bool> = report["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["polarity"].as_bool().unwrap())
        .collect();
    assert_eq!(polarities, vec![false, true]);
}

#[test]
fn analyze_command_writes_csv() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = dir.path().join("corpus");
    fs::create_dir(&corpus).unwrap();
    fs::write(
        corpus.join("notes.jsonl"),
        concat!(
            r#"{"id":"a","text":"Patient denies fever.","mentions":[{"begin":15,"end":20}]}"#,
            "\n",
            r#"{"id":"b","text":"Mild cough noted.","mentions":[{"begin":5,"end":10}]}"#,
            "\n"
        ),
    )
    .unwrap();
    let out = dir.path().join("out/negations.csv");

    cli()
        .arg("analyze")
        .arg("--input")
        .arg(&corpus)
        .arg("--output")
        .arg(&out)
        .args(["--format", "csv", "--rules"])
        .arg(bundled_rules())
        .assert()
        .success();

    let written = fs::read_to_string(out).unwrap();
    let rows: Vec<&str> = written.lines().collect();
    assert_eq!(
        rows,
        vec![
            "document_id,sentence,begin,end,text,polarity",
            "a,0,15,20,fever,true",
            "b,0,5,10,cough,false",
        ]
    );
}
