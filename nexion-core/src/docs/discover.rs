//! Load documentation sources from disk.

use super::DocumentEntry;
use crate::content::MarkdownProcessor;
use crate::diagnostics::Diagnostic;
use crate::slug::is_document_path;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Prefix for every discovered document's source path
pub const DOCS_MOUNT: &str = "/docs";

#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error("Docs directory not found: {0}")]
    MissingDir(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Documents found under a directory, plus files that were skipped
#[derive(Debug, Default)]
pub struct Discovered {
    pub documents: Vec<DocumentEntry>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Render every `.md`/`.mdx` file under `dir`.
///
/// Files with broken frontmatter are skipped and reported as diagnostics.
pub fn discover_documents(
    dir: &Path,
    processor: &MarkdownProcessor,
) -> Result<Discovered, DiscoverError> {
    if !dir.is_dir() {
        return Err(DiscoverError::MissingDir(dir.to_path_buf()));
    }

    let mut files: Vec<(PathBuf, String)> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            let rel = e
                .path()
                .strip_prefix(dir)
                .unwrap_or(e.path())
                .to_string_lossy()
                .replace('\\', "/");
            let source_path = format!("{}/{}", DOCS_MOUNT, rel);
            is_document_path(&source_path).then(|| (e.into_path(), source_path))
        })
        .collect();
    files.sort_by(|a, b| a.1.cmp(&b.1));

    tracing::info!("Found {} documents in {}", files.len(), dir.display());

    let mut discovered = Discovered::default();
    for (path, source_path) in files {
        let source = fs::read_to_string(&path)?;
        match processor.render_document(&source) {
            Ok(rendered) => {
                let mut entry = DocumentEntry::from_rendered(source_path, rendered);
                if entry.updated.is_none() {
                    entry.updated = modified_date(&path);
                }
                discovered.documents.push(entry);
            }
            Err(e) => {
                tracing::error!("Failed to parse {:?}: {}", path, e);
                discovered.diagnostics.push(
                    Diagnostic::error("docs.parse-error", e.to_string())
                        .with_context(source_path),
                );
            }
        }
    }

    Ok(discovered)
}

fn modified_date(path: &Path) -> Option<String> {
    let modified = fs::metadata(path).and_then(|m| m.modified()).ok()?;
    let modified: DateTime<Utc> = modified.into();
    Some(modified.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, body: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    #[test]
    fn test_discovers_md_and_mdx() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "getting-started.mdx", "# Getting Started\n");
        write(tmp.path(), "guides/wallet.md", "# Wallet\n\n## Connect\n");
        write(tmp.path(), "notes.txt", "ignored");

        let found = discover_documents(tmp.path(), &MarkdownProcessor::new()).unwrap();
        let paths: Vec<_> = found.documents.iter().map(|d| d.source_path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["/docs/getting-started.mdx", "/docs/guides/wallet.md"]
        );
        assert_eq!(found.documents[1].slug.as_str(), "wallet");
        assert!(found.documents[1].updated.is_some());
        assert!(found.diagnostics.is_empty());
    }

    #[test]
    fn test_bad_frontmatter_is_reported() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "broken.md", "---\ntitle: [unclosed\n---\n# Broken\n");
        write(tmp.path(), "ok.md", "# Ok\n");

        let found = discover_documents(tmp.path(), &MarkdownProcessor::new()).unwrap();
        assert_eq!(found.documents.len(), 1);
        assert_eq!(found.diagnostics[0].code, "docs.parse-error");
        assert_eq!(found.diagnostics[0].context.as_deref(), Some("/docs/broken.md"));
    }

    #[test]
    fn test_missing_dir() {
        let tmp = TempDir::new().unwrap();
        let err = discover_documents(&tmp.path().join("nope"), &MarkdownProcessor::new());
        assert!(matches!(err, Err(DiscoverError::MissingDir(_))));
    }
}
