//! Translation lookups and language switching.

use super::{lang_override, load_site};
use anyhow::{bail, Result};
use nexion_core::Resolved;
use std::path::Path;

/// Resolve a key under the active (or requested) language
pub fn get_translation(
    config_path: &Path,
    key: &str,
    lang: Option<&str>,
    object: bool,
) -> Result<()> {
    let site = load_site(config_path)?;
    let scoped = lang_override(&site, lang);
    let localizer = scoped.as_ref().unwrap_or(site.localizer());

    if !object {
        println!("{}", localizer.resolve(key));
        return Ok(());
    }

    match localizer.resolve_object(key) {
        Resolved::Value(entry) => print!("{}", serde_yaml::to_string(entry)?),
        Resolved::Missing(placeholder) => println!("{}", placeholder),
    }
    Ok(())
}

/// Print the active language, or switch and persist a new one
pub fn active_language(config_path: &Path, code: Option<&str>) -> Result<()> {
    let site = load_site(config_path)?;
    let localizer = site.localizer();

    let Some(code) = code else {
        let active = localizer.active_language();
        println!("{} ({})", active.code(), active.native_name());
        return Ok(());
    };

    if !localizer.set_active_language(code) {
        let supported: Vec<&str> = localizer.languages().iter().map(|l| l.code()).collect();
        bail!(
            "Unsupported language '{}' (supported: {})",
            code,
            supported.join(", ")
        );
    }

    let active = localizer.active_language();
    println!("✓ Language set to {} ({})", active.code(), active.native_name());
    Ok(())
}

/// List the languages the catalog provides
pub fn list_languages(config_path: &Path) -> Result<()> {
    let site = load_site(config_path)?;
    let localizer = site.localizer();
    let active = localizer.active_language();

    for language in localizer.languages() {
        let marker = if language == active { "*" } else { " " };
        if language.name() == language.native_name() {
            println!("{} {:<4} {}", marker, language.code(), language.name());
        } else {
            println!(
                "{} {:<4} {} ({})",
                marker,
                language.code(),
                language.native_name(),
                language.name()
            );
        }
    }
    Ok(())
}
