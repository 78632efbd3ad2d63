use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::process::Command;

const RECORDS: &str = include_str!("data/records.json");
const INVALID: &str = include_str!("data/invalid.json");

// indents and newlines are important in this string so don't format!
const EXPECTED: &str = "@book{devOpsTroubleshooting,
  author = {Kyle Rankin},
  title = {DevOps Troubleshooting: Linux Server Best Practices},
  year = {2012},
  isbn = {9780321832047}
}
@inproceedings{lamport1978,
  author = {Leslie Lamport},
  booktitle = {Communications of the ACM},
  editor = {Editor, The and Editor, Another},
  title = {Time, Clocks, and the Ordering of Events in a Distributed System},
  year = {1978}
}
";

// We check the --help output in order to confirm that the clap cli is setup correctly.
// Any arguments that are incorrectly will cause clap to panic regardless of the arguments or
// options provided.
#[test]
fn check_clap_cli_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("bibtexer")?;

    cmd.arg("--help");
    cmd.assert().success();

    Ok(())
}

#[test]
fn encode_records_to_stdout() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let input = dir.child("records.json");
    input.write_str(RECORDS)?;

    let mut cmd = Command::cargo_bin("bibtexer")?;
    cmd.arg(input.path());
    cmd.assert().success().stdout(EXPECTED);

    Ok(())
}

#[test]
fn encode_records_to_output_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let input = dir.child("records.json");
    input.write_str(RECORDS)?;

    let mut cmd = Command::cargo_bin("bibtexer")?;
    cmd.arg(input.path()).arg("-o").arg(dir.child("refs").path());
    cmd.assert().success().stdout("");

    dir.child("refs.bib").assert(EXPECTED);

    Ok(())
}

#[test]
fn existing_output_file_is_not_overwritten() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let input = dir.child("records.json");
    input.write_str(RECORDS)?;
    let output = dir.child("refs.bib");
    output.write_str("keep me")?;

    let mut cmd = Command::cargo_bin("bibtexer")?;
    cmd.arg(input.path()).arg("--output").arg(output.path());
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));
    output.assert("keep me");

    let mut cmd = Command::cargo_bin("bibtexer")?;
    cmd.arg(input.path())
        .arg("--output")
        .arg(output.path())
        .arg("--force");
    cmd.assert().success();
    output.assert(EXPECTED);

    Ok(())
}

#[test]
fn invalid_records_are_skipped() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let input = dir.child("invalid.json");
    input.write_str(INVALID)?;

    let mut cmd = Command::cargo_bin("bibtexer")?;
    cmd.arg(input.path());
    cmd.assert()
        .success()
        .stdout("@misc{x\n}\n")
        .stderr(predicate::str::contains("Missing entry type"))
        .stderr(predicate::str::contains("Unsupported type"));

    Ok(())
}

#[test]
fn strict_fails_on_invalid_record() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let input = dir.child("invalid.json");
    input.write_str(INVALID)?;

    let mut cmd = Command::cargo_bin("bibtexer")?;
    cmd.arg(input.path()).arg("--strict");
    cmd.assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("Cannot encode entry 'noType'"));

    Ok(())
}

#[test]
fn glob_patterns_are_expanded_in_sorted_order() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    dir.child("b.json")
        .write_str(r#"[{"entry_type": "misc", "citation_key": "b"}]"#)?;
    dir.child("a.json")
        .write_str(r#"[{"entry_type": "misc", "citation_key": "a"}]"#)?;

    let mut cmd = Command::cargo_bin("bibtexer")?;
    cmd.arg(format!("{}/*.json", dir.path().display()));
    cmd.assert()
        .success()
        .stdout("@misc{a\n}\n@misc{b\n}\n");

    Ok(())
}

#[test]
fn missing_input_file_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;

    let mut cmd = Command::cargo_bin("bibtexer")?;
    cmd.arg(dir.child("nothing.json").path());
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("No file found matching"));

    Ok(())
}
