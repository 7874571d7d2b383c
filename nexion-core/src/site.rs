//! Site loading - wires configuration, translations, and documents together.

use crate::config::Config;
use crate::content::MarkdownProcessor;
use crate::diagnostics::Diagnostic;
use crate::docs::{discover_documents, DiscoverError, DocumentIndex, IndexError};
use crate::i18n::{
    CatalogError, FilePreferenceStore, LocaleSignal, Localizer, TranslationCatalog,
};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Translation error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Discovery error: {0}")]
    Discover(#[from] DiscoverError),

    #[error("Index error: {0}")]
    Index(#[from] IndexError),
}

/// A loaded site: localization context plus document index
#[derive(Debug)]
pub struct Site {
    config: Config,
    localizer: Localizer,
    index: DocumentIndex,
    diagnostics: Vec<Diagnostic>,
}

impl Site {
    /// Load the site, detecting the initial language from the environment
    pub fn load(config: Config) -> Result<Self, SiteError> {
        Self::load_with_signal(config, &LocaleSignal::from_env())
    }

    pub fn load_with_signal(config: Config, signal: &LocaleSignal) -> Result<Self, SiteError> {
        let catalog = match config.locales_dir() {
            Some(dir) => Arc::new(TranslationCatalog::from_dir(&dir)?),
            None => TranslationCatalog::builtin(),
        };

        let store = FilePreferenceStore::in_dir(&config.state_dir());
        let localizer = Localizer::detect(
            catalog,
            config.i18n.default_language,
            config.i18n.fallback_language,
            Box::new(store),
            signal,
        );

        let discovered = discover_documents(&config.docs_dir(), &MarkdownProcessor::new())?;
        let index = DocumentIndex::new(discovered.documents)?
            .with_default_slug(config.docs.default_slug.as_str());

        tracing::info!(
            "Loaded {} documents, language {}",
            index.len(),
            localizer.active_language()
        );

        Ok(Self {
            config,
            localizer,
            index,
            diagnostics: discovered.diagnostics,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn localizer(&self) -> &Localizer {
        &self.localizer
    }

    pub fn index(&self) -> &DocumentIndex {
        &self.index
    }

    /// Check translations and documents for problems
    pub fn verify(&self) -> Vec<Diagnostic> {
        let mut diagnostics = self.diagnostics.clone();
        diagnostics.extend(self.index.diagnostics().iter().cloned());

        let default_slug = &self.config.docs.default_slug;
        if self.index.find_by_slug(default_slug).is_none() {
            diagnostics.push(
                Diagnostic::error(
                    "docs.missing-default",
                    format!("Default document '{}' does not exist", default_slug),
                )
                .with_context(self.config.docs_dir().display().to_string()),
            );
        }

        for doc in self.index.list_all() {
            for heading in doc.outline() {
                if !heading.has_anchor() {
                    diagnostics.push(
                        Diagnostic::warning(
                            "docs.heading-without-id",
                            format!("Heading '{}' has no anchor id", heading.text),
                        )
                        .with_doc(doc.slug.as_str(), &doc.source_path),
                    );
                }
            }
        }

        let catalog = self.localizer.catalog();
        for language in [
            self.config.i18n.default_language,
            self.config.i18n.fallback_language,
        ] {
            if !catalog.has_language(language) {
                diagnostics.push(Diagnostic::error(
                    "i18n.missing-language",
                    format!("No translations for configured language {}", language),
                ));
            }
        }

        for missing in catalog.parity_report() {
            diagnostics.push(
                Diagnostic::warning(
                    "i18n.missing-key",
                    format!(
                        "Key '{}' has no {} translation",
                        missing.key, missing.language
                    ),
                )
                .with_context(missing.language.code()),
            );
        }

        diagnostics
    }
}
