//! # nexion-core
//!
//! Core library for the Nexion documentation site.
//!
//! This crate resolves localized UI text, indexes the documentation pages by
//! slug, and extracts per-page outlines used for in-page navigation.

pub mod config;
pub mod content;
pub mod diagnostics;
pub mod docs;
pub mod frontmatter;
pub mod i18n;
pub mod outline;
pub mod site;
pub mod slug;

pub use config::Config;
pub use content::{html_escape, ContentNode, Element, MarkdownProcessor};
pub use diagnostics::{Diagnostic, DiagnosticSeverity};
pub use docs::{discover_documents, DocLookup, DocumentEntry, DocumentIndex};
pub use i18n::{Localizer, Resolved, TranslationCatalog};
pub use outline::{extract_outline, scroll_to_heading, ContentViewport, ScrollViewport};
pub use site::{Site, SiteError};
pub use slug::slugify;
