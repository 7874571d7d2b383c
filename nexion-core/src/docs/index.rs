//! Slug-addressed index over the fixed set of documents.

use super::DocumentEntry;
use crate::diagnostics::Diagnostic;
use nexion_types::DocSlug;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum IndexError {
    #[error("Duplicate slug '{slug}': {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },
}

/// Result of a slug lookup
#[derive(Debug, Clone, Copy)]
pub enum DocLookup<'a> {
    Found(&'a DocumentEntry),
    /// No document has the requested slug; `fallback` is the page to link back to
    NotFound {
        requested: &'a str,
        fallback: Option<&'a DocumentEntry>,
    },
}

impl<'a> DocLookup<'a> {
    pub fn found(self) -> Option<&'a DocumentEntry> {
        match self {
            DocLookup::Found(entry) => Some(entry),
            DocLookup::NotFound { .. } => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, DocLookup::Found(_))
    }
}

/// Immutable, ordered set of documents
#[derive(Debug, Clone)]
pub struct DocumentIndex {
    entries: Vec<DocumentEntry>,
    by_slug: HashMap<DocSlug, usize>,
    default_slug: Option<DocSlug>,
    diagnostics: Vec<Diagnostic>,
}

impl DocumentIndex {
    /// Build the index.
    ///
    /// Entries are ordered by source path. Two entries with the same slug are
    /// rejected; slugs that only differ by case are kept and reported.
    pub fn new(mut entries: Vec<DocumentEntry>) -> Result<Self, IndexError> {
        entries.sort_by(|a, b| a.source_path.cmp(&b.source_path));

        let mut by_slug: HashMap<DocSlug, usize> = HashMap::with_capacity(entries.len());
        let mut folded: HashMap<String, usize> = HashMap::new();
        let mut diagnostics = Vec::new();

        for (idx, entry) in entries.iter().enumerate() {
            if let Some(&existing) = by_slug.get(&entry.slug) {
                tracing::warn!("Duplicate slug: {}", entry.slug);
                return Err(IndexError::DuplicateSlug {
                    slug: entry.slug.to_string(),
                    first: entries[existing].source_path.clone(),
                    second: entry.source_path.clone(),
                });
            }
            by_slug.insert(entry.slug.clone(), idx);

            let key = entry.slug.as_str().to_lowercase();
            if let Some(&other) = folded.get(&key) {
                let other = &entries[other];
                diagnostics.push(
                    Diagnostic::warning(
                        "docs.slug-case-collision",
                        format!(
                            "Slug '{}' differs from '{}' only by case",
                            entry.slug, other.slug
                        ),
                    )
                    .with_doc(entry.slug.as_str(), &entry.source_path)
                    .with_context(other.source_path.clone()),
                );
            } else {
                folded.insert(key, idx);
            }
        }

        tracing::debug!("Indexed {} documents", entries.len());

        Ok(Self {
            entries,
            by_slug,
            default_slug: None,
            diagnostics,
        })
    }

    /// Set the document that not-found pages link back to
    pub fn with_default_slug(mut self, slug: impl Into<DocSlug>) -> Self {
        self.default_slug = Some(slug.into());
        self
    }

    /// All documents in stable source-path order
    pub fn list_all(&self) -> &[DocumentEntry] {
        &self.entries
    }

    /// Look up a document by slug
    pub fn get_by_slug<'a>(&'a self, slug: &'a str) -> DocLookup<'a> {
        match self.find_by_slug(slug) {
            Some(entry) => DocLookup::Found(entry),
            None => DocLookup::NotFound {
                requested: slug,
                fallback: self.default_document(),
            },
        }
    }

    /// Find a document by slug
    pub fn find_by_slug(&self, slug: &str) -> Option<&DocumentEntry> {
        self.by_slug
            .get(&DocSlug::from(slug))
            .map(|&idx| &self.entries[idx])
    }

    /// Configured default document, else the first one listed
    pub fn default_document(&self) -> Option<&DocumentEntry> {
        self.default_slug
            .as_ref()
            .and_then(|slug| self.find_by_slug(slug.as_str()))
            .or_else(|| self.entries.first())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Non-fatal findings from building the index
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
