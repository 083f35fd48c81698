use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const VARS: &[&str] = &["DOC", "CRATE", "TOKEN", "TRAVIS_REPO_SLUG", "DOC_DIR", "PAGES_BRANCH", "PAGES_HOST", "PIP_SUDO"];

fn xtask() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_xtask"));
    for var in VARS {
        cmd.env_remove(var);
    }
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn publish_without_gate_is_a_no_op() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    xtask()
        .current_dir(dir.path())
        .args(["docs", "publish"])
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping documentation export"));

    assert_eq!(fs::read_dir(dir.path())?.count(), 0);
    Ok(())
}

#[test]
fn publish_with_non_exact_gate_is_a_no_op() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    xtask()
        .current_dir(dir.path())
        .env("DOC", "TRUE")
        .env("CRATE", "little")
        .args(["docs", "publish"])
        .assert()
        .success();

    assert!(!dir.path().join("target").exists());
    Ok(())
}

#[test]
fn dry_run_prints_redacted_plan() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    xtask()
        .current_dir(dir.path())
        .env("DOC", "true")
        .env("CRATE", "little")
        .env("TOKEN", "s3cr3t-T0ken")
        .env("TRAVIS_REPO_SLUG", "Nercury/little-rs")
        .args(["docs", "publish", "--dry-run"])
        .assert()
        .success()
        .stderr(predicate::str::contains("cargo doc"))
        .stderr(predicate::str::contains(
            "git push -fq https://***@github.com/Nercury/little-rs.git gh-pages",
        ))
        .stderr(predicate::str::contains("s3cr3t-T0ken").not());

    assert_eq!(fs::read_dir(dir.path())?.count(), 0);
    Ok(())
}

#[test]
fn open_gate_without_crate_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    xtask()
        .current_dir(dir.path())
        .env("DOC", "true")
        .args(["docs", "publish", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CRATE"));
    Ok(())
}

#[test]
fn redirect_writes_single_index() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    xtask()
        .args(["docs", "redirect", "--crate", "little", "--root"])
        .arg(dir.path())
        .assert()
        .success();

    let doc_dir = dir.path().join("target").join("doc");
    assert_eq!(fs::read_dir(&doc_dir)?.count(), 1);
    assert_eq!(
        fs::read_to_string(doc_dir.join("index.html"))?,
        "<meta http-equiv=refresh content=0;url=little/index.html>\n"
    );
    Ok(())
}

#[test]
fn redirect_falls_back_to_crate_variable() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    xtask()
        .current_dir(dir.path())
        .env("CRATE", "little")
        .args(["docs", "redirect"])
        .assert()
        .success();

    assert!(
        fs::read_to_string(dir.path().join("target/doc/index.html"))?.contains("url=little/index.html")
    );
    Ok(())
}

#[test]
fn explicit_config_file_must_exist_when_gate_is_open() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    xtask()
        .current_dir(dir.path())
        .env("DOC", "true")
        .args(["docs", "publish", "--config", "missing.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config error"));
    Ok(())
}

#[test]
fn closed_gate_ignores_broken_settings() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("publish.toml"), "pages_branch = [unterminated")?;

    xtask()
        .current_dir(dir.path())
        .env("DOC", "false")
        .env("PIP_SUDO", "maybe")
        .args(["docs", "publish"])
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping documentation export"));

    xtask()
        .current_dir(dir.path())
        .args(["docs", "publish", "--config", "missing.toml"])
        .assert()
        .success();

    assert_eq!(fs::read_dir(dir.path())?.count(), 1);
    Ok(())
}
