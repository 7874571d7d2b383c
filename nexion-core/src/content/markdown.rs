//! Markdown to content tree conversion.
//!
//! Heading anchors are assigned here: explicit `{#id}` attributes win, other
//! headings get a slug of their text. Every id is unique within the document,
//! so a repeated `{#id}` is suffixed too. The heading's contents are then
//! wrapped in a self-link.

use super::{ContentNode, Element};
use crate::frontmatter::{parse_frontmatter, Frontmatter, FrontmatterError};
use crate::slug::HeadingIds;
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};

/// Markdown processor producing [`ContentNode`] trees
pub struct MarkdownProcessor {
    options: Options,
}

/// Output of rendering a single document source
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub frontmatter: Frontmatter,
    pub content: ContentNode,
}

impl MarkdownProcessor {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

        Self { options }
    }

    /// Split frontmatter from the body and render the body
    pub fn render_document(&self, source: &str) -> Result<RenderedDocument, FrontmatterError> {
        let (frontmatter, body) = parse_frontmatter(source)?;
        Ok(RenderedDocument {
            frontmatter,
            content: self.render(&body),
        })
    }

    /// Render markdown into a content tree rooted at an `article` element
    pub fn render(&self, markdown: &str) -> ContentNode {
        let events: Vec<Event> = Parser::new_ext(markdown, self.options).collect();

        let mut ids = HeadingIds::new();
        for event in &events {
            if let Event::Start(Tag::Heading { id: Some(id), .. }) = event {
                ids.reserve(id);
            }
        }

        let mut builder = TreeBuilder::new(ids);
        for event in events {
            builder.push(event);
        }
        builder.finish()
    }
}

impl Default for MarkdownProcessor {
    fn default() -> Self {
        Self::new()
    }
}

struct TreeBuilder {
    stack: Vec<Element>,
    /// Number of elements opened by each still-open tag
    frames: Vec<usize>,
    ids: HeadingIds,
    in_table_head: bool,
}

impl TreeBuilder {
    fn new(ids: HeadingIds) -> Self {
        Self {
            stack: vec![Element::new("article")],
            frames: Vec::new(),
            ids,
            in_table_head: false,
        }
    }

    fn push(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(_) => self.close(),
            Event::Text(text) => self.append(ContentNode::text(text.to_string())),
            Event::Code(code) => self.append(ContentNode::element(
                "code",
                vec![ContentNode::text(code.to_string())],
            )),
            Event::Html(html) | Event::InlineHtml(html) => {
                self.append(ContentNode::Html(html.to_string()))
            }
            Event::SoftBreak => self.append(ContentNode::text("\n")),
            Event::HardBreak => self.append(ContentNode::element("br", vec![])),
            Event::Rule => self.append(ContentNode::element("hr", vec![])),
            Event::FootnoteReference(label) => self.append(ContentNode::element(
                "sup",
                vec![
                    ContentNode::element("a", vec![ContentNode::text(label.to_string())])
                        .with_attr("href", format!("#{}", label)),
                ],
            )),
            Event::TaskListMarker(checked) => {
                let mut input = ContentNode::element("input", vec![])
                    .with_attr("type", "checkbox")
                    .with_attr("disabled", "");
                if checked {
                    input = input.with_attr("checked", "");
                }
                self.append(input);
            }
            other => tracing::debug!("Skipping unsupported markdown event: {:?}", other),
        }
    }

    fn open(&mut self, tag: Tag) {
        let opened = match tag {
            Tag::Paragraph => self.open_one(Element::new("p")),
            Tag::Heading {
                level, id, classes, ..
            } => {
                let mut el = Element::new(format!("h{}", level as u32));
                if let Some(id) = id {
                    el.attrs.insert("id".into(), id.to_string());
                }
                if !classes.is_empty() {
                    let classes: Vec<String> = classes.iter().map(|c| c.to_string()).collect();
                    el.attrs.insert("class".into(), classes.join(" "));
                }
                self.open_one(el)
            }
            Tag::BlockQuote(_) => self.open_one(Element::new("blockquote")),
            Tag::CodeBlock(kind) => {
                let mut code = Element::new("code");
                if let CodeBlockKind::Fenced(lang) = kind {
                    let lang = lang.split_whitespace().next().unwrap_or_default();
                    if !lang.is_empty() {
                        code.attrs
                            .insert("class".into(), format!("language-{}", lang));
                    }
                }
                self.stack.push(Element::new("pre"));
                self.stack.push(code);
                2
            }
            Tag::List(Some(start)) => {
                let mut el = Element::new("ol");
                if start != 1 {
                    el.attrs.insert("start".into(), start.to_string());
                }
                self.open_one(el)
            }
            Tag::List(None) => self.open_one(Element::new("ul")),
            Tag::Item => self.open_one(Element::new("li")),
            Tag::FootnoteDefinition(label) => {
                let mut el = Element::new("div");
                el.attrs.insert("class".into(), "footnote-definition".into());
                el.attrs.insert("id".into(), label.to_string());
                self.open_one(el)
            }
            Tag::Table(_) => self.open_one(Element::new("table")),
            Tag::TableHead => {
                self.in_table_head = true;
                self.stack.push(Element::new("thead"));
                self.stack.push(Element::new("tr"));
                2
            }
            Tag::TableRow => self.open_one(Element::new("tr")),
            Tag::TableCell => {
                let cell = if self.in_table_head { "th" } else { "td" };
                self.open_one(Element::new(cell))
            }
            Tag::Emphasis => self.open_one(Element::new("em")),
            Tag::Strong => self.open_one(Element::new("strong")),
            Tag::Strikethrough => self.open_one(Element::new("del")),
            Tag::Link {
                dest_url, title, ..
            } => {
                let mut el = Element::new("a");
                el.attrs.insert("href".into(), dest_url.to_string());
                if !title.is_empty() {
                    el.attrs.insert("title".into(), title.to_string());
                }
                self.open_one(el)
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                let mut el = Element::new("img");
                el.attrs.insert("src".into(), dest_url.to_string());
                if !title.is_empty() {
                    el.attrs.insert("title".into(), title.to_string());
                }
                self.open_one(el)
            }
            // Raw HTML events are appended to the enclosing element
            Tag::HtmlBlock => 0,
            _ => self.open_one(Element::new("div")),
        };
        self.frames.push(opened);
    }

    fn open_one(&mut self, el: Element) -> usize {
        self.stack.push(el);
        1
    }

    fn close(&mut self) {
        let count = self.frames.pop().unwrap_or(0);
        for _ in 0..count {
            // The root is never popped here
            if self.stack.len() <= 1 {
                break;
            }
            if let Some(el) = self.stack.pop() {
                let el = self.finish_element(el);
                self.append(ContentNode::Element(el));
            }
        }
    }

    fn finish_element(&mut self, mut el: Element) -> Element {
        if el.tag == "thead" {
            self.in_table_head = false;
        }

        if el.tag == "img" {
            let alt = ContentNode::Element(el.clone()).text_content();
            el.children.clear();
            el.attrs.insert("alt".into(), alt);
            return el;
        }

        if el.heading_level().is_some() {
            let id = match el.id().map(str::to_string) {
                Some(explicit) => self.ids.claim(&explicit),
                None => {
                    let text = ContentNode::Element(el.clone()).text_content();
                    self.ids.allocate(&text)
                }
            };
            el.attrs.insert("id".into(), id.clone());
            let children = std::mem::take(&mut el.children);
            el.children = vec![ContentNode::element("a", children)
                .with_attr("href", format!("#{}", id))
                .with_attr("class", "heading-anchor")];
        }

        el
    }

    fn append(&mut self, node: ContentNode) {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
        }
    }

    fn finish(mut self) -> ContentNode {
        while self.stack.len() > 1 {
            if let Some(el) = self.stack.pop() {
                let el = self.finish_element(el);
                self.append(ContentNode::Element(el));
            }
        }
        self.stack
            .pop()
            .map(ContentNode::Element)
            .unwrap_or_else(|| ContentNode::root(Vec::new()))
    }
}
