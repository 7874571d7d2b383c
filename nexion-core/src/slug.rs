//! Slug generation for document identifiers and heading anchors.

use nexion_types::DocSlug;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

/// File extensions recognized as documents
pub const DOCUMENT_EXTENSIONS: &[&str] = &["mdx", "md"];

static HYPHEN_RUNS: OnceLock<Regex> = OnceLock::new();

fn hyphen_runs() -> &'static Regex {
    HYPHEN_RUNS.get_or_init(|| Regex::new(r"-+").expect("static regex"))
}

/// Convert a string to a URL-safe slug
///
/// Rules:
/// - Lowercase
/// - Replace whitespace with hyphens
/// - Remove special characters (except hyphens)
/// - Collapse multiple hyphens
/// - Trim leading/trailing hyphens
///
/// # Examples
///
/// ```
/// use nexion_core::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("Rust & Safety"), "rust-safety");
/// assert_eq!(slugify("快速开始"), "快速开始");
/// ```
pub fn slugify(input: &str) -> String {
    let lowercased = input.to_lowercase();

    // Replace whitespace and underscores with hyphens
    let with_hyphens = lowercased
        .graphemes(true)
        .map(|g| match g {
            " " | "_" | "\t" | "\n" => "-",
            _ => g,
        })
        .collect::<String>();

    // Keep ascii alphanumerics, hyphens and unicode letters
    let cleaned = with_hyphens
        .graphemes(true)
        .filter_map(|g| {
            let c = g.chars().next()?;
            if c.is_ascii_alphanumeric() || c == '-' || c.is_alphanumeric() {
                Some(g)
            } else {
                None
            }
        })
        .collect::<String>();

    let collapsed = hyphen_runs().replace_all(&cleaned, "-");

    collapsed.trim_matches('-').to_string()
}

/// Derive a document slug from its source path.
///
/// Takes the final path segment and strips a document extension. No case or
/// whitespace normalization happens, so `Guide.md` and `guide.md` produce
/// distinct slugs.
///
/// ```
/// use nexion_core::slug::derive_doc_slug;
///
/// assert_eq!(derive_doc_slug("/docs/guides/getting-started.mdx").as_str(), "getting-started");
/// assert_eq!(derive_doc_slug("FAQ.md").as_str(), "FAQ");
/// ```
pub fn derive_doc_slug(source_path: &str) -> DocSlug {
    let file = source_path
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(source_path);

    let stem = DOCUMENT_EXTENSIONS
        .iter()
        .find_map(|ext| {
            file.strip_suffix(ext)
                .and_then(|rest| rest.strip_suffix('.'))
        })
        .unwrap_or(file);

    DocSlug::new(stem)
}

/// Whether a path names a document file
pub fn is_document_path(path: &str) -> bool {
    DOCUMENT_EXTENSIONS
        .iter()
        .any(|ext| path.strip_suffix(ext).is_some_and(|rest| rest.ends_with('.')))
}

/// Allocates unique heading anchors within a single document.
///
/// The first heading with a given slug keeps it, later ones get `-1`, `-2`, ...
/// Explicit ids are reserved up front so generated anchors step around them.
#[derive(Debug, Default)]
pub struct HeadingIds {
    seen: HashMap<String, usize>,
    assigned: HashSet<String>,
}

impl HeadingIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve an id that was set explicitly in the source
    pub fn reserve(&mut self, id: &str) {
        self.seen.entry(id.to_string()).or_insert(0);
    }

    /// Claim an explicit id for a heading.
    ///
    /// The first heading to claim an id keeps it. A repeated explicit id is
    /// suffixed like a generated one.
    pub fn claim(&mut self, id: &str) -> String {
        if self.assigned.insert(id.to_string()) {
            self.seen.entry(id.to_string()).or_insert(0);
            return id.to_string();
        }
        self.suffixed(id)
    }

    /// Allocate a unique id for the given heading text
    pub fn allocate(&mut self, text: &str) -> String {
        let base = slugify(text);
        let base = if base.is_empty() {
            "section".to_string()
        } else {
            base
        };

        if self.seen.contains_key(&base) {
            return self.suffixed(&base);
        }
        self.seen.insert(base.clone(), 0);
        self.assigned.insert(base.clone());
        base
    }

    fn suffixed(&mut self, base: &str) -> String {
        let mut count = self.seen.get(base).copied().unwrap_or(0);
        let candidate = loop {
            count += 1;
            let candidate = format!("{}-{}", base, count);
            if !self.seen.contains_key(&candidate) {
                break candidate;
            }
        };
        self.seen.insert(base.to_string(), count);
        self.seen.insert(candidate.clone(), 0);
        self.assigned.insert(candidate.clone());
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Getting Started"), "getting-started");
    }

    #[test]
    fn test_special_characters() {
        assert_eq!(slugify("Rust & Safety"), "rust-safety");
        assert_eq!(slugify("C++ Programming"), "c-programming");
        assert_eq!(slugify("What's new?"), "whats-new");
    }

    #[test]
    fn test_unicode() {
        assert_eq!(slugify("安装 Nexion"), "安装-nexion");
        assert_eq!(slugify("Café"), "café");
    }

    #[test]
    fn test_empty_and_special_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("   "), "");
    }

    #[test]
    fn test_derive_doc_slug() {
        assert_eq!(derive_doc_slug("/docs/intro.md").as_str(), "intro");
        assert_eq!(derive_doc_slug("/docs/a/b/wallet-setup.mdx").as_str(), "wallet-setup");
        assert_eq!(derive_doc_slug("docs\\win\\Notes.md").as_str(), "Notes");
        assert_eq!(derive_doc_slug("/docs/My Doc.md").as_str(), "My Doc");
        // only a trailing document extension is stripped
        assert_eq!(derive_doc_slug("/docs/archive.md.bak").as_str(), "archive.md.bak");
        assert_eq!(derive_doc_slug("/docs/readme").as_str(), "readme");
    }

    #[test]
    fn test_is_document_path() {
        assert!(is_document_path("a/b.md"));
        assert!(is_document_path("a/b.mdx"));
        assert!(!is_document_path("a/b.txt"));
        assert!(!is_document_path("a/bmd"));
    }

    #[test]
    fn test_heading_ids_dedupe() {
        let mut ids = HeadingIds::new();
        assert_eq!(ids.allocate("Usage"), "usage");
        assert_eq!(ids.allocate("Usage"), "usage-1");
        assert_eq!(ids.allocate("Usage"), "usage-2");
        assert_eq!(ids.allocate("Setup"), "setup");
    }

    #[test]
    fn test_heading_ids_respect_reserved() {
        let mut ids = HeadingIds::new();
        ids.reserve("usage-1");
        assert_eq!(ids.allocate("Usage"), "usage");
        assert_eq!(ids.allocate("Usage"), "usage-2");
        assert_eq!(ids.allocate("???"), "section");
    }

    #[test]
    fn test_heading_ids_repeated_explicit_id() {
        let mut ids = HeadingIds::new();
        ids.reserve("install");
        assert_eq!(ids.claim("install"), "install");
        assert_eq!(ids.claim("install"), "install-1");
        assert_eq!(ids.allocate("Install"), "install-2");
    }
}
