//! Verify translations and documents and emit diagnostics.

use super::load_site;
use anyhow::Result;
use nexion_core::diagnostics::count;
use nexion_core::{Diagnostic, DiagnosticSeverity};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct VerificationSummary<'a> {
    documents: usize,
    languages: Vec<&'static str>,
    errors: usize,
    warnings: usize,
    infos: usize,
    diagnostics: &'a [Diagnostic],
}

/// Load the site and surface diagnostics.
pub fn verify_site(config_path: &Path, json: bool) -> Result<()> {
    let site = load_site(config_path)?;
    let diagnostics = site.verify();

    let summary = VerificationSummary {
        documents: site.index().len(),
        languages: site.localizer().languages().iter().map(|l| l.code()).collect(),
        errors: count(&diagnostics, DiagnosticSeverity::Error),
        warnings: count(&diagnostics, DiagnosticSeverity::Warning),
        infos: count(&diagnostics, DiagnosticSeverity::Info),
        diagnostics: &diagnostics,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "Verification complete: {} documents, {} errors, {} warnings, {} info",
        summary.documents, summary.errors, summary.warnings, summary.infos
    );
    for diag in &diagnostics {
        let slug = diag
            .doc_slug
            .as_deref()
            .map(|s| format!(" [{}]", s))
            .unwrap_or_default();
        let source = diag
            .source_path
            .as_deref()
            .map(|s| format!(" ({})", s))
            .unwrap_or_default();
        println!(
            "- {:?} {}{}{}: {}",
            diag.severity, diag.code, slug, source, diag.message
        );
        if let Some(ctx) = &diag.context {
            println!("  context: {}", ctx);
        }
    }

    Ok(())
}
