//! Diagnostics surfaced by `verify` and the site loader.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Diagnostic {
    /// Stable machine-readable code, e.g. `i18n.missing-key`
    pub code: String,
    pub message: String,
    pub severity: DiagnosticSeverity,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_slug: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Diagnostic {
    pub fn new(code: &str, severity: DiagnosticSeverity, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            severity,
            doc_slug: None,
            source_path: None,
            context: None,
        }
    }

    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Self::new(code, DiagnosticSeverity::Error, message)
    }

    pub fn warning(code: &str, message: impl Into<String>) -> Self {
        Self::new(code, DiagnosticSeverity::Warning, message)
    }

    pub fn with_doc(mut self, slug: &str, source_path: &str) -> Self {
        self.doc_slug = Some(slug.to_string());
        self.source_path = Some(source_path.to_string());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// Count diagnostics of one severity
pub fn count(diagnostics: &[Diagnostic], severity: DiagnosticSeverity) -> usize {
    diagnostics.iter().filter(|d| d.severity == severity).count()
}
