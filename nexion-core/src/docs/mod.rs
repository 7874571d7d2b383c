//! Documentation pages: entries, slug-addressed index, and discovery.

pub mod discover;
pub mod index;

use crate::content::markdown::RenderedDocument;
use crate::content::ContentNode;
use crate::outline::extract_outline;
use crate::slug::derive_doc_slug;
use nexion_types::{DocSlug, HeadingEntry};

pub use discover::{discover_documents, DiscoverError, Discovered};
pub use index::{DocLookup, DocumentIndex, IndexError};

/// A single documentation page
#[derive(Debug, Clone)]
pub struct DocumentEntry {
    pub slug: DocSlug,
    /// Where the document came from, e.g. `/docs/getting-started.md`
    pub source_path: String,
    pub title: String,
    pub description: Option<String>,
    /// Last updated date (`YYYY-MM-DD`)
    pub updated: Option<String>,
    pub content: ContentNode,
}

impl DocumentEntry {
    /// Entry whose slug is derived from `source_path`
    pub fn new(source_path: impl Into<String>, content: ContentNode) -> Self {
        let source_path = source_path.into();
        let slug = derive_doc_slug(&source_path);
        Self::with_slug(slug, source_path, content)
    }

    /// Entry with an explicit slug
    pub fn with_slug(slug: DocSlug, source_path: impl Into<String>, content: ContentNode) -> Self {
        let title = first_h1(&content).unwrap_or_else(|| slug.nav_label());
        Self {
            slug,
            source_path: source_path.into(),
            title,
            description: None,
            updated: None,
            content,
        }
    }

    /// Entry from a rendered source; frontmatter overrides the title
    pub fn from_rendered(source_path: impl Into<String>, rendered: RenderedDocument) -> Self {
        let mut entry = Self::new(source_path, rendered.content);
        let fm = rendered.frontmatter;
        if let Some(title) = fm.title.filter(|t| !t.trim().is_empty()) {
            entry.title = title;
        }
        entry.description = fm.description;
        entry.updated = fm.updated;
        entry
    }

    /// Navigation label ("getting-started" → "Getting Started")
    pub fn nav_label(&self) -> String {
        self.slug.nav_label()
    }

    /// Outline of this document's headings
    pub fn outline(&self) -> Vec<HeadingEntry> {
        extract_outline(&self.content)
    }
}

fn first_h1(content: &ContentNode) -> Option<String> {
    content
        .descendants()
        .filter_map(ContentNode::as_element)
        .find(|el| el.heading_level() == Some(1))
        .map(|el| ContentNode::Element(el.clone()).text_content().trim().to_string())
        .filter(|title| !title.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MarkdownProcessor;

    #[test]
    fn test_title_from_first_heading() {
        let content = MarkdownProcessor::new().render("## Intro\n\n# Wallet Setup\n");
        let entry = DocumentEntry::new("/docs/wallet.md", content);
        assert_eq!(entry.slug.as_str(), "wallet");
        assert_eq!(entry.title, "Wallet Setup");
    }

    #[test]
    fn test_title_falls_back_to_label() {
        let entry = DocumentEntry::new("/docs/getting-started.mdx", ContentNode::root(vec![]));
        assert_eq!(entry.title, "Getting Started");
    }

    #[test]
    fn test_frontmatter_title_wins() {
        let rendered = MarkdownProcessor::new()
            .render_document("---\ntitle: FAQ\nupdated: 2025-03-01\n---\n# Questions\n")
            .unwrap();
        let entry = DocumentEntry::from_rendered("/docs/faq.md", rendered);
        assert_eq!(entry.title, "FAQ");
        assert_eq!(entry.updated.as_deref(), Some("2025-03-01"));
        assert_eq!(entry.outline()[0].id, "questions");
    }
}
