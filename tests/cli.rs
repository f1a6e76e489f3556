//! Runs the binary on saved trace logs.

use std::{
    fs,
    path::Path,
    process::{Command, Output},
};

const SIL: &str = "xx^xx-sil+k=o/A:xx+xx+xx/B:xx-xx_xx/C:xx_xx+xx/D:09+xx_xx/E:xx_xx!xx_xx-xx/F:xx_xx#xx_xx@xx_xx|xx_xx/G:3_3%0_xx_xx/H:xx_xx/I:xx-xx@xx+xx&xx-xx|xx+xx/J:1_3/K:1+1-3";
const KO: &str = "xx^sil-k+o=N/A:-2+1+3/B:xx-xx_xx/C:09_xx+xx/D:xx+xx_xx/E:xx_xx!xx_xx-xx/F:3_3#0_xx@1_1|1_3/G:xx_xx%xx_xx_xx/H:xx_xx/I:1-3@1+1&1-1|1+3/J:xx_xx/K:1+1-3";

fn write_log(dir: &Path, labels: &[String]) -> String {
    let path = dir.join("trace.log");
    let log = format!(
        "[Text analysis result]\n今日,名詞,副詞可能,*,*,*,*,今日,キョウ,キョー,1/2,C1,-1\n[Output label]\n{}\n[Global parameter]\n",
        labels.join("\n")
    );
    fs::write(&path, log).unwrap();
    path.display().to_string()
}

fn good_labels() -> Vec<String> {
    vec![format!("0 2000000 {SIL}"), format!("2000000 2650000 {KO}")]
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_openjtalk-label-getter"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8(output.stdout.clone())
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}

#[test]
fn prints_timed_phonemes() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), &good_labels());

    let output = run(&["--input-log", &log]);

    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec!["0.0000 0.2000 sil", "0.2000 0.2650 k"]
    );
}

#[test]
fn prints_untimed_full_context_labels() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), &good_labels());

    let output = run(&[
        "--input-log",
        &log,
        "--output-type",
        "full_context_label",
        "--without-span",
    ]);

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec![SIL, KO]);
}

#[test]
fn prints_yomi_characters() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), &good_labels());

    let output = run(&["--input-log", &log, "--output-type", "yomi", "--without-span"]);

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["キ", "ョ", "ー"]);
}

#[test]
fn timed_yomi_fails_before_running_open_jtalk() {
    let dir = tempfile::tempdir().unwrap();
    let missing_command = dir.path().join("open_jtalk");

    let output = run(&[
        "今日",
        "--openjtalk-command",
        &missing_command.display().to_string(),
        "--output-type",
        "yomi",
    ]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid request"), "{stderr}");
    assert!(!stderr.contains("spawning"), "{stderr}");
}

#[test]
fn unknown_output_type_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), &good_labels());

    let output = run(&["--input-log", &log, "--output-type", "kana"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn malformed_log_prints_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut labels = good_labels();
    labels.push(format!("2650000 {KO}"));
    let log = write_log(dir.path(), &labels);

    let output = run(&["--input-log", &log]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("malformed label"), "{stderr}");
}
