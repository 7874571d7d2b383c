//! Localization context: resolves dotted keys under the active language.

use super::catalog::{Entry, TranslationCatalog};
use super::detect::LocaleSignal;
use super::preference::{MemoryPreferenceStore, PreferenceStore};
use nexion_types::Language;
use parking_lot::RwLock;
use regex::{Captures, Regex};
use serde::de::DeserializeOwned;
use std::sync::{Arc, OnceLock};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ResolveError {
    #[error("Missing translation key: {0}")]
    MissingKey(String),

    #[error("Translation '{key}' has an unexpected shape: {reason}")]
    ShapeMismatch { key: String, reason: String },
}

/// Result of an object-mode lookup
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<'a> {
    Value(&'a Entry),
    /// Key absent everywhere; carries the key path as placeholder
    Missing(String),
}

impl<'a> Resolved<'a> {
    pub fn entry(&self) -> Option<&'a Entry> {
        match self {
            Resolved::Value(entry) => Some(entry),
            Resolved::Missing(_) => None,
        }
    }

    /// List items, or an empty slice for anything else
    pub fn items(&self) -> &'a [Entry] {
        self.entry().and_then(Entry::as_list).unwrap_or(&[])
    }
}

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{\{\s*([^{}\s]+)\s*\}\}").expect("static regex"))
}

/// An injectable localization context.
///
/// The catalog is shared and immutable; only the active language changes.
/// Every `resolve*` call reads the active language at call time.
pub struct Localizer {
    catalog: Arc<TranslationCatalog>,
    fallback: Language,
    active: RwLock<Language>,
    store: Box<dyn PreferenceStore>,
}

impl Localizer {
    /// Context with a fixed initial language and an in-memory preference store
    pub fn new(catalog: Arc<TranslationCatalog>, fallback: Language, initial: Language) -> Self {
        Self {
            catalog,
            fallback,
            active: RwLock::new(initial),
            store: Box::new(MemoryPreferenceStore::new()),
        }
    }

    /// Pick the initial language: stored preference, then the runtime locale,
    /// then `default`. Only languages the catalog provides are accepted.
    pub fn detect(
        catalog: Arc<TranslationCatalog>,
        default: Language,
        fallback: Language,
        store: Box<dyn PreferenceStore>,
        signal: &LocaleSignal,
    ) -> Self {
        let stored = match store.load() {
            Ok(stored) => stored,
            Err(err) => {
                tracing::warn!("Could not read language preference: {}", err);
                None
            }
        };

        let initial = stored
            .filter(|lang| catalog.has_language(*lang))
            .or_else(|| signal.languages().find(|lang| catalog.has_language(*lang)))
            .unwrap_or(default);

        tracing::debug!("Initial language: {}", initial);

        Self {
            catalog,
            fallback,
            active: RwLock::new(initial),
            store,
        }
    }

    /// A context over the same catalog fixed to `language`; changes made to it
    /// are not persisted
    pub fn scoped(&self, language: Language) -> Localizer {
        Localizer::new(Arc::clone(&self.catalog), self.fallback, language)
    }

    pub fn catalog(&self) -> &TranslationCatalog {
        &self.catalog
    }

    pub fn fallback_language(&self) -> Language {
        self.fallback
    }

    pub fn active_language(&self) -> Language {
        *self.active.read()
    }

    /// Languages the catalog provides, for a language switcher
    pub fn languages(&self) -> Vec<Language> {
        self.catalog.languages()
    }

    /// Activate a language by code.
    ///
    /// Unknown codes and languages missing from the catalog are ignored with a
    /// warning; returns whether the active language was changed.
    pub fn set_active_language(&self, code: &str) -> bool {
        match Language::from_tag(code) {
            Some(language) => self.set_language(language),
            None => {
                tracing::warn!("Ignoring unknown language code {:?}", code);
                false
            }
        }
    }

    /// Activate a language and persist the choice
    pub fn set_language(&self, language: Language) -> bool {
        if !self.catalog.has_language(language) {
            tracing::warn!("No translations for language {}", language);
            return false;
        }

        *self.active.write() = language;

        if let Err(err) = self.store.save(language) {
            tracing::warn!("Could not persist language preference: {}", err);
        }
        true
    }

    fn lookup(&self, key: &str) -> Option<&Entry> {
        let active = self.active_language();
        self.catalog.lookup(active, key).or_else(|| {
            if active == self.fallback {
                None
            } else {
                self.catalog.lookup(self.fallback, key)
            }
        })
    }

    /// Resolve a key to display text.
    ///
    /// Falls back to the fallback language; when the key is missing there too,
    /// or names a structured value, the key path itself is returned.
    pub fn resolve(&self, key: &str) -> String {
        match self.lookup(key) {
            Some(entry) => entry.to_text().unwrap_or_else(|| {
                tracing::warn!(
                    "Translation '{}' is a {}, not text; use resolve_object",
                    key,
                    entry.kind()
                );
                key.to_string()
            }),
            None => {
                tracing::debug!("Missing translation key '{}'", key);
                key.to_string()
            }
        }
    }

    /// Resolve a key and substitute `{{name}}` placeholders
    pub fn resolve_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        let template = self.resolve(key);
        placeholder_regex()
            .replace_all(&template, |caps: &Captures| {
                let name = &caps[1];
                args.iter()
                    .find(|(arg, _)| *arg == name)
                    .map(|(_, value)| value.to_string())
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    /// Resolve a key to its structured value without checking its shape
    pub fn resolve_object(&self, key: &str) -> Resolved<'_> {
        match self.lookup(key) {
            Some(entry) => Resolved::Value(entry),
            None => {
                tracing::debug!("Missing translation key '{}'", key);
                Resolved::Missing(key.to_string())
            }
        }
    }

    /// Resolve a key and deserialize it into `T`, checking its shape
    pub fn resolve_as<T: DeserializeOwned>(&self, key: &str) -> Result<T, ResolveError> {
        let entry = self
            .lookup(key)
            .ok_or_else(|| ResolveError::MissingKey(key.to_string()))?;
        let shape_error = |err: serde_json::Error| ResolveError::ShapeMismatch {
            key: key.to_string(),
            reason: err.to_string(),
        };
        let value = serde_json::to_value(entry).map_err(shape_error)?;
        serde_json::from_value(value).map_err(shape_error)
    }
}

impl std::fmt::Debug for Localizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Localizer")
            .field("active", &self.active_language())
            .field("fallback", &self.fallback)
            .field("languages", &self.catalog.languages())
            .finish()
    }
}
