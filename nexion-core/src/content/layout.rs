//! Plain text layout of a content tree.
//!
//! Each rendered line is one row of the viewport; heading rows are recorded
//! as anchor offsets so the viewport can scroll to them.

use super::{ContentNode, Element};
use std::collections::HashMap;

/// Block-level tags; anything else is laid out inline
const BLOCK_TAGS: &[&str] = &[
    "article",
    "div",
    "section",
    "blockquote",
    "p",
    "pre",
    "ul",
    "ol",
    "li",
    "table",
    "thead",
    "tbody",
    "tr",
    "hr",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextLayout {
    pub lines: Vec<String>,
    /// Heading id → row of the heading line
    pub anchors: HashMap<String, usize>,
}

impl TextLayout {
    pub fn anchor(&self, id: &str) -> Option<usize> {
        self.anchors.get(id).copied()
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }
}

/// Lay out a content tree as text rows
pub fn layout_text(root: &ContentNode) -> TextLayout {
    let mut writer = Writer::default();
    writer.block(root, "");
    while writer.layout.lines.last().is_some_and(|l| l.is_empty()) {
        writer.layout.lines.pop();
    }
    writer.layout
}

fn is_block(node: &ContentNode) -> bool {
    node.as_element()
        .is_some_and(|el| BLOCK_TAGS.contains(&el.tag.as_str()))
}

fn inline_text(nodes: &[ContentNode]) -> String {
    let mut text = String::new();
    for node in nodes {
        match node {
            ContentNode::Element(el) if el.tag == "br" => text.push('\n'),
            other => text.push_str(&other.text_content()),
        }
    }
    text
}

#[derive(Default)]
struct Writer {
    layout: TextLayout,
}

impl Writer {
    fn gap(&mut self) {
        if self.layout.lines.last().is_some_and(|l| !l.is_empty()) {
            self.layout.lines.push(String::new());
        }
    }

    fn line(&mut self, indent: &str, text: &str) {
        self.layout.lines.push(format!("{}{}", indent, text.trim_end()));
    }

    fn paragraph(&mut self, indent: &str, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.gap();
        for row in text.lines() {
            self.line(indent, row.trim());
        }
    }

    fn block(&mut self, node: &ContentNode, indent: &str) {
        let el = match node {
            ContentNode::Element(el) => el,
            ContentNode::Text(text) => return self.paragraph(indent, text),
            ContentNode::Html(_) => return,
        };

        if let Some(level) = el.heading_level() {
            self.gap();
            if let Some(id) = el.id().filter(|id| !id.is_empty()) {
                self.layout
                    .anchors
                    .entry(id.to_string())
                    .or_insert(self.layout.lines.len());
            }
            let marker = "#".repeat(level as usize);
            let text = inline_text(&el.children).replace('\n', " ");
            self.line(indent, &format!("{} {}", marker, text.trim()));
            return;
        }

        match el.tag.as_str() {
            "p" => self.paragraph(indent, &inline_text(&el.children)),
            "pre" => {
                self.gap();
                let code = node.text_content();
                for row in code.trim_end_matches('\n').lines() {
                    self.line(&format!("{}    ", indent), row);
                }
            }
            "hr" => {
                self.gap();
                self.line(indent, "---");
            }
            "blockquote" => self.children(el, &format!("{}> ", indent)),
            "ul" | "ol" => self.list(el, indent),
            "table" | "thead" | "tbody" => self.children(el, indent),
            "tr" => {
                let cells: Vec<String> = el
                    .children
                    .iter()
                    .map(|cell| cell.text_content().trim().to_string())
                    .collect();
                self.line(indent, &cells.join(" | "));
            }
            _ if is_block(node) => self.children(el, indent),
            _ => self.paragraph(indent, &node.text_content()),
        }
    }

    fn children(&mut self, el: &Element, indent: &str) {
        // Runs of inline children form one paragraph
        let mut inline: Vec<ContentNode> = Vec::new();
        for child in &el.children {
            if is_block(child) {
                if !inline.is_empty() {
                    self.paragraph(indent, &inline_text(&inline));
                    inline.clear();
                }
                self.block(child, indent);
            } else {
                inline.push(child.clone());
            }
        }
        if !inline.is_empty() {
            self.paragraph(indent, &inline_text(&inline));
        }
    }

    fn list(&mut self, el: &Element, indent: &str) {
        self.gap();
        let ordered = el.tag == "ol";
        let start: usize = el
            .attr("start")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1);
        let nested = format!("{}  ", indent);

        let items = el.children.iter().filter_map(ContentNode::as_element);
        for (n, item) in items.enumerate() {
            let marker = if ordered {
                format!("{}. ", start + n)
            } else {
                "- ".to_string()
            };

            let (blocks, inline): (Vec<&ContentNode>, Vec<&ContentNode>) =
                item.children.iter().partition(|c| is_block(c));
            let inline: Vec<ContentNode> = inline.into_iter().cloned().collect();
            let mut first = inline_text(&inline).trim().replace('\n', " ");

            let mut rest = blocks.into_iter().peekable();
            // Loose list items wrap their text in a paragraph
            if first.is_empty() {
                if let Some(p) = rest.next_if(|b| b.as_element().is_some_and(|e| e.tag == "p")) {
                    first = p.text_content().trim().replace('\n', " ");
                }
            }

            self.line(indent, &format!("{}{}", marker, first));
            for block in rest {
                if block.as_element().is_some_and(|e| e.tag == "ul" || e.tag == "ol") {
                    if let Some(list) = block.as_element() {
                        self.nested_list(list, &nested);
                    }
                } else {
                    self.block(block, &nested);
                }
            }
        }
    }

    fn nested_list(&mut self, el: &Element, indent: &str) {
        // No blank row between an item and its sublist
        let before = self.layout.lines.len();
        self.list(el, indent);
        if self.layout.lines.get(before).is_some_and(|l| l.is_empty()) {
            self.layout.lines.remove(before);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MarkdownProcessor;

    fn layout(md: &str) -> TextLayout {
        layout_text(&MarkdownProcessor::new().render(md))
    }

    #[test]
    fn test_headings_and_paragraphs() {
        let out = layout("# Intro\n\nWelcome to\nNexion.\n\n## Setup\n\nInstall it.\n");
        assert_eq!(
            out.lines,
            vec![
                "# Intro",
                "",
                "Welcome to",
                "Nexion.",
                "",
                "## Setup",
                "",
                "Install it.",
            ]
        );
        assert_eq!(out.anchor("intro"), Some(0));
        assert_eq!(out.anchor("setup"), Some(5));
        assert_eq!(out.anchor("missing"), None);
    }

    #[test]
    fn test_lists() {
        let out = layout("- one\n- two\n  - nested\n\n1. first\n2. second\n");
        assert_eq!(
            out.lines,
            vec!["- one", "- two", "  - nested", "", "1. first", "2. second"]
        );
    }

    #[test]
    fn test_code_block_indented() {
        let out = layout("```\nnexion connect\n```\n");
        assert_eq!(out.lines, vec!["    nexion connect"]);
    }

    #[test]
    fn test_blockquote_prefixed() {
        let out = layout("> keep your seed phrase offline\n");
        assert_eq!(out.lines, vec!["> keep your seed phrase offline"]);
    }
}
