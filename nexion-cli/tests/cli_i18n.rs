use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_site(root: &Path) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(root.join("docs"))?;
    fs::write(
        root.join("nexion.yml"),
        "site:\n  title: \"Test\"\npaths:\n  docs: \"docs\"\n",
    )?;
    fs::write(root.join("docs/getting-started.md"), "# Getting Started\n")?;
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

#[test]
fn switching_language_persists_between_runs() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_site(dir.path())?;

    nexion(dir.path())?
        .args(["i18n", "get", "nav.home"])
        .assert()
        .success()
        .stdout("Home\n");

    nexion(dir.path())?
        .args(["i18n", "lang", "zh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zh (中文)"));
    assert!(dir.path().join(".nexion/preferences.json").exists());

    nexion(dir.path())?
        .args(["i18n", "get", "nav.home"])
        .assert()
        .success()
        .stdout("首页\n");

    nexion(dir.path())?
        .args(["i18n", "get", "nav.home", "--lang", "en"])
        .assert()
        .success()
        .stdout("Home\n");

    nexion(dir.path())?
        .args(["i18n", "lang"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("zh"));
    Ok(())
}

#[test]
fn locale_environment_picks_initial_language() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_site(dir.path())?;

    nexion(dir.path())?
        .env("LANG", "zh_CN.UTF-8")
        .args(["i18n", "get", "docs.toc"])
        .assert()
        .success()
        .stdout("目录\n");
    Ok(())
}

#[test]
fn unknown_language_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_site(dir.path())?;

    nexion(dir.path())?
        .args(["i18n", "lang", "klingon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported language 'klingon'"));

    nexion(dir.path())?
        .args(["i18n", "lang"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("en"));
    Ok(())
}

#[test]
fn missing_keys_and_objects() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_site(dir.path())?;

    nexion(dir.path())?
        .args(["i18n", "get", "nav.nowhere"])
        .assert()
        .success()
        .stdout("nav.nowhere\n");

    nexion(dir.path())?
        .args(["i18n", "get", "pricing.fees", "--object"])
        .assert()
        .success()
        .stdout(predicate::str::contains("price: 0.1 OKB"));

    nexion(dir.path())?
        .args(["i18n", "languages"])
        .assert()
        .success()
        .stdout(predicate::str::contains("* en   English\n"))
        .stdout(predicate::str::contains("  zh   中文\n"));
    Ok(())
}

#[test]
fn init_scaffolds_a_loadable_project() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let root = dir.path().join("site");

    nexion(dir.path())?
        .arg("init")
        .arg(&root)
        .assert()
        .success();
    assert!(root.join("nexion.yml").exists());
    assert!(root.join("docs/getting-started.md").exists());

    nexion(&root)?
        .args(["docs", "toc", "getting-started"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Install (#install)"));
    Ok(())
}
