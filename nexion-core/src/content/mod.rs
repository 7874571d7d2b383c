//! Rendered document content as a small DOM-like tree.
//!
//! The markdown pipeline produces a [`ContentNode`] per document. Heading
//! elements carry their anchor in the `id` attribute; everything downstream
//! (outline extraction, text layout, HTML output) reads the tree only.

pub mod layout;
pub mod markdown;

use std::collections::BTreeMap;

pub use layout::{layout_text, TextLayout};
pub use markdown::MarkdownProcessor;

/// Elements rendered without a closing tag
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input"];

#[derive(Debug, Clone, PartialEq)]
pub enum ContentNode {
    Element(Element),
    Text(String),
    /// Raw HTML passed through from the source
    Html(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    pub children: Vec<ContentNode>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Heading depth for `h1`..`h6`
    pub fn heading_level(&self) -> Option<u8> {
        match self.tag.as_str() {
            "h1" => Some(1),
            "h2" => Some(2),
            "h3" => Some(3),
            "h4" => Some(4),
            "h5" => Some(5),
            "h6" => Some(6),
            _ => None,
        }
    }
}

impl ContentNode {
    /// Document root
    pub fn root(children: Vec<ContentNode>) -> Self {
        ContentNode::Element(Element {
            children,
            ..Element::new("article")
        })
    }

    pub fn element(tag: impl Into<String>, children: Vec<ContentNode>) -> Self {
        ContentNode::Element(Element {
            children,
            ..Element::new(tag)
        })
    }

    pub fn text(text: impl Into<String>) -> Self {
        ContentNode::Text(text.into())
    }

    /// Builder helper to set an attribute on an element node
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let ContentNode::Element(el) = &mut self {
            el.attrs.insert(name.into(), value.into());
        }
        self
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            ContentNode::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn children(&self) -> &[ContentNode] {
        match self {
            ContentNode::Element(el) => &el.children,
            _ => &[],
        }
    }

    /// Concatenated text of this node and all its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self {
            ContentNode::Text(text) => out.push_str(text),
            ContentNode::Html(_) => {}
            ContentNode::Element(el) => {
                for child in &el.children {
                    child.push_text(out);
                }
            }
        }
    }

    /// Pre-order iterator over this node and its descendants
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// First element whose `id` attribute equals `id`
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if id.is_empty() {
            return None;
        }
        self.descendants()
            .filter_map(ContentNode::as_element)
            .find(|el| el.id() == Some(id))
    }

    /// Serialize the tree to HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.push_html(&mut out);
        out
    }

    fn push_html(&self, out: &mut String) {
        match self {
            ContentNode::Text(text) => out.push_str(&html_escape(text)),
            ContentNode::Html(raw) => out.push_str(raw),
            ContentNode::Element(el) => {
                out.push('<');
                out.push_str(&el.tag);
                for (name, value) in &el.attrs {
                    out.push_str(&format!(" {}=\"{}\"", name, html_escape(value)));
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&el.tag.as_str()) {
                    return;
                }
                for child in &el.children {
                    child.push_html(out);
                }
                out.push_str(&format!("</{}>", el.tag));
            }
        }
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a ContentNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a ContentNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// Escape text for an HTML body or attribute value
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ContentNode {
        ContentNode::root(vec![
            ContentNode::element("h1", vec![ContentNode::text("Intro")]).with_attr("id", "intro"),
            ContentNode::element(
                "p",
                vec![
                    ContentNode::text("Use "),
                    ContentNode::element("code", vec![ContentNode::text("<nexion>")]),
                ],
            ),
        ])
    }

    #[test]
    fn test_text_content_flattens() {
        let root = sample();
        assert_eq!(root.text_content(), "IntroUse <nexion>");
    }

    #[test]
    fn test_descendants_pre_order() {
        let root = sample();
        let tags: Vec<&str> = root
            .descendants()
            .filter_map(ContentNode::as_element)
            .map(|el| el.tag.as_str())
            .collect();
        assert_eq!(tags, vec!["article", "h1", "p", "code"]);
    }

    #[test]
    fn test_find_by_id() {
        let root = sample();
        assert_eq!(root.find_by_id("intro").map(|el| el.tag.as_str()), Some("h1"));
        assert!(root.find_by_id("missing").is_none());
        assert!(root.find_by_id("").is_none());
    }

    #[test]
    fn test_to_html_escapes() {
        let root = sample();
        assert_eq!(
            root.to_html(),
            "<article><h1 id=\"intro\">Intro</h1><p>Use <code>&lt;nexion&gt;</code></p></article>"
        );
    }

    #[test]
    fn test_void_elements() {
        let hr = ContentNode::element("hr", vec![]);
        assert_eq!(hr.to_html(), "<hr>");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(html_escape("快速开始"), "快速开始");
    }
}
