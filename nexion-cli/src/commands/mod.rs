//! CLI command implementations.

pub mod docs;
pub mod i18n;
pub mod init;
pub mod verify;

pub use docs::{list_docs, show_doc, show_toc, ShowOptions};
pub use i18n::{active_language, get_translation, list_languages};
pub use init::init_project;
pub use verify::verify_site;

use anyhow::{Context, Result};
use nexion_core::{Config, Localizer, Site};
use nexion_types::Language;
use std::path::Path;

/// Load configuration and the site it describes
pub(crate) fn load_site(config_path: &Path) -> Result<Site> {
    let config = Config::from_file(config_path)
        .with_context(|| format!("Failed to load configuration from {:?}", config_path))?;
    Site::load(config).context("Failed to load site")
}

/// A one-off localizer for `--lang`, or `None` to use the site's own.
///
/// Unknown codes are ignored like `set_active_language` does.
pub(crate) fn lang_override(site: &Site, lang: Option<&str>) -> Option<Localizer> {
    let code = lang?;
    let localizer = site.localizer();
    match Language::from_tag(code).filter(|l| localizer.catalog().has_language(*l)) {
        Some(language) => Some(localizer.scoped(language)),
        None => {
            tracing::warn!("Ignoring unsupported language {:?}", code);
            None
        }
    }
}
