//! Browse documents: list, show, and table of contents.

use super::{lang_override, load_site};
use crate::DocFormat;
use anyhow::{Context, Result};
use nexion_core::outline::scroll_to_heading;
use nexion_core::{html_escape, ContentViewport, DocLookup, DocumentEntry, Localizer, Site};
use nexion_types::HeadingEntry;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct DocSummary<'a> {
    slug: &'a str,
    title: &'a str,
    label: String,
    source_path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated: Option<&'a str>,
}

impl<'a> From<&'a DocumentEntry> for DocSummary<'a> {
    fn from(doc: &'a DocumentEntry) -> Self {
        Self {
            slug: doc.slug.as_str(),
            title: &doc.title,
            label: doc.nav_label(),
            source_path: &doc.source_path,
            updated: doc.updated.as_deref(),
        }
    }
}

#[derive(Serialize)]
struct DocPayload<'a> {
    #[serde(flatten)]
    summary: DocSummary<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    outline: Vec<HeadingEntry>,
    html: String,
}

#[derive(Serialize)]
struct NotFoundPayload<'a> {
    found: bool,
    requested: &'a str,
    message: String,
    fallback: Option<&'a str>,
}

pub struct ShowOptions {
    pub format: DocFormat,
    pub lang: Option<String>,
    pub anchor: Option<String>,
}

/// List every document in navigation order
pub fn list_docs(config_path: &Path, json: bool) -> Result<()> {
    let site = load_site(config_path)?;
    let docs: Vec<DocSummary> = site.index().list_all().iter().map(DocSummary::from).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&docs)?);
        return Ok(());
    }

    println!("{}", site.localizer().resolve("docs.navigation"));
    for doc in &docs {
        println!("  {:<24} {}", doc.slug, doc.label);
    }
    Ok(())
}

/// Show a single document, or the not-found page for unknown slugs
pub fn show_doc(config_path: &Path, slug: &str, opts: ShowOptions) -> Result<()> {
    let site = load_site(config_path)?;
    let scoped = lang_override(&site, opts.lang.as_deref());
    let localizer = scoped.as_ref().unwrap_or(site.localizer());

    let doc = match site.index().get_by_slug(slug) {
        DocLookup::Found(doc) => doc,
        DocLookup::NotFound {
            requested,
            fallback,
        } => {
            tracing::debug!("No document for slug {:?}", requested);
            return print_not_found(localizer, requested, fallback, opts.format);
        }
    };

    match opts.format {
        DocFormat::Json => {
            let payload = DocPayload {
                summary: DocSummary::from(doc),
                description: doc.description.as_deref(),
                outline: doc.outline(),
                html: doc.content.to_html(),
            };
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        DocFormat::Html => {
            println!("{}", doc.content.to_html());
        }
        DocFormat::Text => {
            let mut viewport = ContentViewport::from_content(&doc.content);
            if let Some(anchor) = opts.anchor.as_deref() {
                if !scroll_to_heading(&mut viewport, anchor) {
                    tracing::warn!("No heading with id {:?} in {}", anchor, doc.slug);
                }
            }
            if viewport.scroll_top() == 0 {
                println!("{}\n", doc.title);
            }
            for line in viewport.visible() {
                println!("{}", line);
            }
            print_footer(&site, localizer, doc);
        }
    }

    Ok(())
}

fn print_not_found(
    localizer: &Localizer,
    requested: &str,
    fallback: Option<&DocumentEntry>,
    format: DocFormat,
) -> Result<()> {
    let message = localizer.resolve("docs.notFound");
    match format {
        DocFormat::Json => {
            let payload = NotFoundPayload {
                found: false,
                requested,
                message,
                fallback: fallback.map(|doc| doc.slug.as_str()),
            };
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        DocFormat::Html => {
            println!("<h1>{}</h1>", html_escape(&message));
            if let Some(doc) = fallback {
                println!(
                    "<a href=\"/docs/{}\">{}</a>",
                    html_escape(doc.slug.as_str()),
                    html_escape(&localizer.resolve("docs.backToDocs"))
                );
            }
        }
        DocFormat::Text => {
            println!("{}", message);
            if let Some(doc) = fallback {
                println!("← {}: {}", localizer.resolve("docs.backToDocs"), doc.slug);
            }
        }
    }
    Ok(())
}

fn print_footer(site: &Site, localizer: &Localizer, doc: &DocumentEntry) {
    println!();
    if let Some(updated) = &doc.updated {
        println!("{}: {}", localizer.resolve("docs.lastUpdated"), updated);
    }
    if let Some(url) = site.config().edit_url() {
        println!("{}: {}", localizer.resolve("docs.editPage"), url);
    }
    if let Some(url) = site.config().issues_url() {
        println!("{}: {}", localizer.resolve("docs.reportIssue"), url);
    }
}

/// Print a document's outline, indented by heading level
pub fn show_toc(config_path: &Path, slug: &str, json: bool, lang: Option<&str>) -> Result<()> {
    let site = load_site(config_path)?;
    let scoped = lang_override(&site, lang);
    let localizer = scoped.as_ref().unwrap_or(site.localizer());

    let doc = site
        .index()
        .find_by_slug(slug)
        .with_context(|| format!("{}: {}", localizer.resolve("docs.notFound"), slug))?;
    let outline = doc.outline();

    if json {
        println!("{}", serde_json::to_string_pretty(&outline)?);
        return Ok(());
    }

    println!("{}", localizer.resolve("docs.toc"));
    for heading in &outline {
        let indent = "  ".repeat(usize::from(heading.level.saturating_sub(1)));
        if heading.has_anchor() {
            println!("{}- {} (#{})", indent, heading.text, heading.id);
        } else {
            println!("{}- {}", indent, heading.text);
        }
    }
    Ok(())
}
