use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_site(root: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let docs = root.join("docs");
    fs::create_dir_all(&docs)?;
    fs::write(
        root.join("nexion.yml"),
        r#"
site:
  title: "Test"
  repository: "https://github.com/example/docs"
paths:
  docs: "docs"
docs:
  default_slug: "getting-started"
"#,
    )?;
    fs::write(
        docs.join("getting-started.mdx"),
        "---\nupdated: 2025-02-01\n---\n# Getting Started\n\nWelcome.\n",
    )?;
    fs::write(
        docs.join("guide.md"),
        "# Intro\n\nText.\n\n## Setup\n\nMore.\n\n### Wallet\n\n#### Hidden\n\n## Usage\n\nEnd.\n",
    )?;
    Ok(())
}

fn nexion(root: &Path) -> Result<Command, Box<dyn std::error::Error>> {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("nexion")?;
    cmd.current_dir(root)
        .env("LANG", "C")
        .env_remove("LC_ALL")
        .env_remove("LC_MESSAGES")
        .env_remove("NEXION_CONFIG");
    Ok(cmd)
}

fn demo_config() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("site")
        .join("nexion.yml")
}

#[test]
fn docs_list_json_is_ordered() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_site(dir.path())?;

    let assert = nexion(dir.path())?
        .args(["docs", "list", "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let value: Value = serde_json::from_str(&stdout)?;
    let arr = value.as_array().expect("json array");
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["slug"], "getting-started");
    assert_eq!(arr[0]["label"], "Getting Started");
    assert_eq!(arr[0]["source_path"], "/docs/getting-started.mdx");
    assert_eq!(arr[0]["updated"], "2025-02-01");
    assert_eq!(arr[1]["slug"], "guide");
    assert_eq!(arr[1]["title"], "Intro");
    Ok(())
}

#[test]
fn docs_toc_lists_three_levels() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_site(dir.path())?;

    let assert = nexion(dir.path())?
        .args(["docs", "toc", "guide", "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let value: Value = serde_json::from_str(&stdout)?;
    let ids: Vec<&str> = value
        .as_array()
        .expect("json array")
        .iter()
        .filter_map(|h| h["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["intro", "setup", "wallet", "usage"]);

    nexion(dir.path())?
        .args(["docs", "toc", "guide", "--lang", "zh"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("目录"))
        .stdout(predicate::str::contains("    - Wallet (#wallet)"));
    Ok(())
}

#[test]
fn docs_show_unknown_slug_links_back() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_site(dir.path())?;

    nexion(dir.path())?
        .args(["docs", "show", "__nonexistent__"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Documentation not found"))
        .stdout(predicate::str::contains("Back to Docs: getting-started"));

    let assert = nexion(dir.path())?
        .args(["docs", "show", "__nonexistent__", "--format", "json"])
        .assert()
        .success();
    let value: Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(value["found"], false);
    assert_eq!(value["fallback"], "getting-started");

    nexion(dir.path())?
        .args(["docs", "show", "<script>", "--format", "html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<h1>Documentation not found</h1>"))
        .stdout(predicate::str::contains(
            r#"<a href="/docs/getting-started">Back to Docs</a>"#,
        ))
        .stdout(predicate::str::contains("<script>").not());
    Ok(())
}

#[test]
fn docs_show_scrolls_to_anchor() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_site(dir.path())?;

    nexion(dir.path())?
        .args(["docs", "show", "guide", "--anchor", "usage"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Usage"))
        .stdout(predicate::str::contains("Edit this page: https://github.com/example/docs\n"))
        .stdout(predicate::str::contains("Report Issue: https://github.com/example/docs/issues"));

    nexion(dir.path())?
        .args(["docs", "show", "guide", "--format", "html"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"<h2 id="setup">"#));
    Ok(())
}

#[test]
fn verify_demo_site_has_no_errors() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let assert = nexion(dir.path())?
        .arg("--config")
        .arg(demo_config())
        .args(["verify", "--json"])
        .assert()
        .success();

    let value: Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(value["errors"], 0);
    assert_eq!(value["warnings"], 0);
    assert_eq!(value["documents"], 3);
    Ok(())
}

#[test]
fn verify_reports_missing_default_document() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_site(dir.path())?;
    fs::remove_file(dir.path().join("docs/getting-started.mdx"))?;

    let assert = nexion(dir.path())?
        .args(["verify", "--json"])
        .assert()
        .success();
    let value: Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(value["errors"], 1);
    assert_eq!(value["diagnostics"][0]["code"], "docs.missing-default");
    Ok(())
}
