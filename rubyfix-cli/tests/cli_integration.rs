//! Integration tests for the rubyfix CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

fn merged_run(base: &str, reading: &str) -> String {
    format!(
        "<w:r><w:ruby><w:rt><w:r><w:t>{reading}</w:t></w:r></w:rt><w:rubyBase><w:r><w:t>{base}</w:t></w:r></w:rubyBase></w:ruby></w:r>"
    )
}

fn document_xml() -> String {
    format!(
        r#"<w:document xmlns:w="{W_NS}"><w:body><w:p>{}</w:p><w:p><w:r><w:t>二行目</w:t></w:r></w:p></w:body></w:document>"#,
        merged_run("読んで", "よんで")
    )
}

fn flat_package() -> String {
    format!(
        r#"<?xml version="1.0" standalone="yes"?><pkg:package xmlns:pkg="http://schemas.microsoft.com/office/2006/xmlPackage"><pkg:part pkg:name="/word/document.xml"><pkg:xmlData>{}</pkg:xmlData></pkg:part></pkg:package>"#,
        document_xml()
    )
}

fn write_flat(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, flat_package()).unwrap();
    path
}

fn write_docx(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let mut zip = ZipWriter::new(File::create(&path).unwrap());
    zip.start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(document_xml().as_bytes()).unwrap();
    zip.finish().unwrap();
    path
}

fn rubyfix() -> Command {
    let mut cmd = Command::cargo_bin("rubyfix").unwrap();
    cmd.env_remove("RUBYFIX_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_fix_flat_xml() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_flat(temp_dir.path(), "song.xml");

    rubyfix()
        .arg("fix")
        .arg("-i")
        .arg(&input)
        .assert()
        .success()
        .stdout(format!(
            "[Success processing file '{}']\n",
            input.display()
        ));

    let fixed = fs::read_to_string(temp_dir.path().join("song.C.xml")).unwrap();
    assert!(fixed.contains(&merged_run("読", "よ")));
    assert!(fixed.contains("<w:r><w:t>んで</w:t></w:r>"));
    assert!(fixed.contains("<w:r><w:t>二行目</w:t></w:r>"));
}

#[test]
fn test_fix_directory_of_docx() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("album");
    fs::create_dir(&nested).unwrap();
    write_docx(&nested, "one.docx");
    write_docx(&nested, "two.docx");
    fs::write(nested.join("notes.txt"), "ignored").unwrap();

    rubyfix()
        .arg("fix")
        .arg("-q")
        .arg("-j")
        .arg("2")
        .arg("-i")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("one.docx']"))
        .stdout(predicate::str::contains("two.docx']"))
        .stdout(predicate::str::contains("notes.txt").not());

    assert!(nested.join("one.C.docx").is_file());
    assert!(nested.join("two.C.docx").is_file());
}

#[test]
fn test_failures_do_not_stop_the_batch() {
    let temp_dir = TempDir::new().unwrap();
    let good = write_flat(temp_dir.path(), "good.xml");
    let bad = temp_dir.path().join("bad.txt");
    fs::write(&bad, "text").unwrap();

    rubyfix()
        .arg("fix")
        .arg("-i")
        .arg(&bad)
        .arg("missing.docx")
        .arg(&good)
        .assert()
        .success()
        .stdout(format!(
            "[Error processing file '{}': file format not supported]\n[Unable to process 'missing.docx']\n[Success processing file '{}']\n",
            bad.display(),
            good.display()
        ));
}

#[test]
fn test_second_fix_does_not_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_flat(temp_dir.path(), "song.xml");

    rubyfix().arg("fix").arg("-i").arg(&input).assert().success();
    rubyfix()
        .arg("fix")
        .arg("-i")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("output already exists"));

    rubyfix()
        .arg("fix")
        .arg("--overwrite")
        .arg("-i")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[Success processing file"));
}

#[test]
fn test_custom_suffix_from_config() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_flat(temp_dir.path(), "song.xml");
    let config = temp_dir.path().join("rubyfix.toml");
    fs::write(&config, "[output]\nsuffix = \"fixed\"\n").unwrap();

    rubyfix()
        .arg("fix")
        .arg("-c")
        .arg(&config)
        .arg("-i")
        .arg(&input)
        .assert()
        .success();
    assert!(temp_dir.path().join("song.fixed.xml").is_file());

    rubyfix()
        .arg("fix")
        .arg("-c")
        .arg(&config)
        .arg("-s")
        .arg("flag")
        .arg("-i")
        .arg(&input)
        .assert()
        .success();
    assert!(temp_dir.path().join("song.flag.xml").is_file());
}

#[test]
fn test_empty_suffix_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_flat(temp_dir.path(), "song.xml");

    rubyfix()
        .arg("fix")
        .arg("-s")
        .arg("")
        .arg("-i")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("output suffix must not be empty"));
}

#[test]
fn test_extract_text() {
    let temp_dir = TempDir::new().unwrap();
    let first = write_docx(temp_dir.path(), "a.docx");
    let second = write_flat(temp_dir.path(), "b.xml");

    rubyfix()
        .arg("extract")
        .arg("-i")
        .arg(&first)
        .arg(&second)
        .assert()
        .success()
        .stdout("よんで\n二行目\n\n\nよんで\n二行目\n");
}

#[test]
fn test_extract_json_report_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_docx(temp_dir.path(), "a.docx");
    let report = temp_dir.path().join("report.json");

    rubyfix()
        .arg("extract")
        .arg("-f")
        .arg("json")
        .arg("-o")
        .arg(&report)
        .arg("-i")
        .arg(&input)
        .assert()
        .success()
        .stdout("");

    let content = fs::read_to_string(&report).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed[0]["status"], "success");
    assert_eq!(parsed[0]["text"], "よんで\n二行目\n");
}

#[test]
fn test_markdown_report() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_flat(temp_dir.path(), "song.xml");

    rubyfix()
        .arg("fix")
        .arg("-f")
        .arg("markdown")
        .arg("-i")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("| File | Status | Details |"))
        .stdout(predicate::str::contains("1 of 1 ruby run(s) split"))
        .stdout(predicate::str::contains("*Inputs: 1, failed: 0*"));
}

#[test]
fn test_invalid_pattern_reported() {
    rubyfix()
        .arg("fix")
        .arg("-i")
        .arg("[")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "[Error processing '[': Invalid file pattern",
        ));
}

#[test]
fn test_align_text() {
    rubyfix()
        .arg("align")
        .arg("--base")
        .arg("読んで")
        .arg("--reading")
        .arg("よんで")
        .assert()
        .success()
        .stdout("読\tよ\nんで\n");
}

#[test]
fn test_align_json() {
    rubyfix()
        .arg("align")
        .arg("-b")
        .arg("お茶")
        .arg("-r")
        .arg("おちゃ")
        .arg("-f")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"category\": \"hiragana\""))
        .stdout(predicate::str::contains("\"reading\": \"ちゃ\""));
}

#[test]
fn test_align_single_segment_fails() {
    rubyfix()
        .arg("align")
        .arg("--base")
        .arg("東京")
        .arg("--reading")
        .arg("とうきょう")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot split '東京'"));
}

#[test]
fn test_generate_config() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("rubyfix.toml");

    rubyfix()
        .arg("generate-config")
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration template written"));

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("[output]"));
    assert!(content.contains("suffix = \"C\""));

    rubyfix()
        .arg("generate-config")
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_missing_input_argument() {
    rubyfix()
        .arg("fix")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--input"));
}
