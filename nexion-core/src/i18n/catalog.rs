//! Translation catalog: per-language trees of translated entries.

use include_dir::{include_dir, Dir};
use nexion_types::Language;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Translation resources shipped with the site
static BUILTIN_LOCALES: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/locales");

static BUILTIN: Lazy<Arc<TranslationCatalog>> = Lazy::new(|| {
    match TranslationCatalog::from_embedded(&BUILTIN_LOCALES) {
        Ok(catalog) => Arc::new(catalog),
        Err(err) => {
            // Lookups degrade to key placeholders rather than failing the site
            tracing::error!("Failed to load built-in translations: {}", err);
            Arc::new(TranslationCatalog::new())
        }
    }
});

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read translations {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid translations for '{language}': {source}")]
    Yaml {
        language: Language,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Translations for '{0}' must be a table of keys")]
    NotATable(Language),
}

/// One node of a translation tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Text(String),
    Bool(bool),
    Number(serde_json::Number),
    List(Vec<Entry>),
    Table(BTreeMap<String, Entry>),
}

impl Entry {
    /// Follow a dotted path; list elements are addressed by index
    pub fn get(&self, path: &str) -> Option<&Entry> {
        if path.is_empty() {
            return None;
        }
        path.split('.').try_fold(self, |node, segment| match node {
            Entry::Table(map) => map.get(segment),
            Entry::List(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Entry::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Display text for scalar leaves; numbers and booleans are rendered
    pub fn to_text(&self) -> Option<String> {
        match self {
            Entry::Text(text) => Some(text.clone()),
            Entry::Bool(value) => Some(value.to_string()),
            Entry::Number(value) => Some(value.to_string()),
            Entry::List(_) | Entry::Table(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Entry]> {
        match self {
            Entry::List(items) => Some(items),
            _ => None,
        }
    }

    /// Short shape name used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Entry::Text(_) => "text",
            Entry::Bool(_) => "bool",
            Entry::Number(_) => "number",
            Entry::List(_) => "list",
            Entry::Table(_) => "table",
        }
    }

    fn collect_paths(&self, prefix: &str, out: &mut BTreeSet<String>) {
        let join = |segment: &str| {
            if prefix.is_empty() {
                segment.to_string()
            } else {
                format!("{}.{}", prefix, segment)
            }
        };
        match self {
            Entry::Text(_) | Entry::Bool(_) | Entry::Number(_) => {
                out.insert(prefix.to_string());
            }
            Entry::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    item.collect_paths(&join(&i.to_string()), out);
                }
            }
            Entry::Table(map) => {
                for (key, value) in map {
                    value.collect_paths(&join(key), out);
                }
            }
        }
    }
}

/// A key path one language lacks while another defines it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingKey {
    pub language: Language,
    pub key: String,
}

/// Immutable mapping from language to translation tree
#[derive(Debug, Clone, Default)]
pub struct TranslationCatalog {
    resources: BTreeMap<Language, Entry>,
}

impl TranslationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog embedded in the binary, parsed once
    pub fn builtin() -> Arc<TranslationCatalog> {
        Arc::clone(&BUILTIN)
    }

    /// Add a language's tree, replacing any previous one
    pub fn with_language(mut self, language: Language, root: Entry) -> Self {
        self.resources.insert(language, root);
        self
    }

    /// Parse a YAML document as the tree for one language
    pub fn add_yaml(&mut self, language: Language, yaml: &str) -> Result<(), CatalogError> {
        let root: Entry =
            serde_yaml::from_str(yaml).map_err(|source| CatalogError::Yaml { language, source })?;
        if !matches!(root, Entry::Table(_)) {
            return Err(CatalogError::NotATable(language));
        }
        self.resources.insert(language, root);
        Ok(())
    }

    /// Load every `<code>.yml` / `<code>.yaml` file in a directory
    pub fn from_dir(dir: &Path) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        let entries = fs::read_dir(dir).map_err(|source| CatalogError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.extension()
                    .is_some_and(|ext| ext == "yml" || ext == "yaml")
            })
            .collect();
        paths.sort();

        for path in paths {
            let Some(language) = language_of(&path) else {
                tracing::warn!("Ignoring translations with unknown language: {:?}", path);
                continue;
            };
            if catalog.has_language(language) {
                tracing::warn!(
                    "Translations for '{}' loaded more than once; {:?} replaces the earlier file",
                    language,
                    path
                );
            }
            let yaml = fs::read_to_string(&path).map_err(|source| CatalogError::Io {
                path: path.clone(),
                source,
            })?;
            catalog.add_yaml(language, &yaml)?;
        }

        tracing::debug!(
            "Loaded translations for {} languages from {:?}",
            catalog.resources.len(),
            dir
        );
        Ok(catalog)
    }

    fn from_embedded(dir: &Dir<'_>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for file in dir.files() {
            let Some(language) = language_of(file.path()) else {
                continue;
            };
            let yaml = file.contents_utf8().unwrap_or_default();
            catalog.add_yaml(language, yaml)?;
        }
        Ok(catalog)
    }

    pub fn has_language(&self, language: Language) -> bool {
        self.resources.contains_key(&language)
    }

    /// Languages present in the catalog, in code order
    pub fn languages(&self) -> Vec<Language> {
        self.resources.keys().copied().collect()
    }

    /// Look up a dotted key in one language, without fallback
    pub fn lookup(&self, language: Language, key: &str) -> Option<&Entry> {
        self.resources.get(&language)?.get(key)
    }

    /// All leaf key paths defined for a language
    pub fn key_paths(&self, language: Language) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        if let Some(root) = self.resources.get(&language) {
            root.collect_paths("", &mut out);
        }
        out
    }

    /// Key paths some language defines but another lacks
    pub fn parity_report(&self) -> Vec<MissingKey> {
        let per_language: Vec<(Language, BTreeSet<String>)> = self
            .resources
            .keys()
            .map(|lang| (*lang, self.key_paths(*lang)))
            .collect();

        let all: BTreeSet<&String> = per_language.iter().flat_map(|(_, keys)| keys).collect();

        let mut missing = Vec::new();
        for (language, keys) in &per_language {
            for key in &all {
                if !keys.contains(*key) {
                    missing.push(MissingKey {
                        language: *language,
                        key: (*key).clone(),
                    });
                }
            }
        }
        missing
    }
}

fn language_of(path: &Path) -> Option<Language> {
    let stem = path.file_stem()?.to_str()?;
    Language::from_tag(stem)
}
