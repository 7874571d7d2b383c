//! Table of contents extraction and in-page heading navigation.

use crate::content::{layout_text, ContentNode, TextLayout};
use nexion_types::HeadingEntry;

/// Deepest heading level included in an outline
pub const MAX_OUTLINE_LEVEL: u8 = 3;

/// Rows kept visible above a heading after scrolling to it
pub const SCROLL_MARGIN: usize = 8;

/// Build the outline of a rendered document.
///
/// Walks the tree in document order and harvests `h1`..`h3` elements. Ids are
/// taken as-is from the tree; a heading without one yields an empty id.
pub fn extract_outline(root: &ContentNode) -> Vec<HeadingEntry> {
    root.descendants()
        .filter_map(ContentNode::as_element)
        .filter_map(|el| {
            let level = el.heading_level().filter(|l| *l <= MAX_OUTLINE_LEVEL)?;
            let text = el
                .children
                .iter()
                .map(ContentNode::text_content)
                .collect::<String>();
            Some(HeadingEntry {
                id: el.id().unwrap_or_default().to_string(),
                text,
                level,
            })
        })
        .collect()
}

/// A scrollable content region hosting a rendered document.
pub trait ScrollViewport {
    /// Offset of the element with the given anchor id, if present
    fn anchor_offset(&self, id: &str) -> Option<usize>;

    /// Scroll the region (not the page) so `top` is the first visible row
    fn scroll_to(&mut self, top: usize);

    /// Replace the location fragment without scrolling the page
    fn replace_fragment(&mut self, id: &str);
}

/// Scroll a viewport to the heading with the given id.
///
/// Returns `false` and leaves the viewport untouched when the id is empty or
/// not present in the viewport.
pub fn scroll_to_heading<V: ScrollViewport + ?Sized>(viewport: &mut V, id: &str) -> bool {
    if id.is_empty() {
        return false;
    }
    let Some(offset) = viewport.anchor_offset(id) else {
        tracing::debug!("No heading with id {:?} in viewport", id);
        return false;
    };

    viewport.scroll_to(offset.saturating_sub(SCROLL_MARGIN));
    viewport.replace_fragment(id);
    true
}

/// Text viewport over a laid out document
#[derive(Debug, Clone)]
pub struct ContentViewport {
    layout: TextLayout,
    scroll_top: usize,
    fragment: Option<String>,
}

impl ContentViewport {
    pub fn new(layout: TextLayout) -> Self {
        Self {
            layout,
            scroll_top: 0,
            fragment: None,
        }
    }

    pub fn from_content(root: &ContentNode) -> Self {
        Self::new(layout_text(root))
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// Current location fragment, without the leading `#`
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn lines(&self) -> &[String] {
        &self.layout.lines
    }

    /// Rows from the scroll position onward
    pub fn visible(&self) -> &[String] {
        let start = self.scroll_top.min(self.layout.lines.len());
        &self.layout.lines[start..]
    }
}

impl ScrollViewport for ContentViewport {
    fn anchor_offset(&self, id: &str) -> Option<usize> {
        self.layout.anchor(id)
    }

    fn scroll_to(&mut self, top: usize) {
        let max = self.layout.height().saturating_sub(1);
        self.scroll_top = top.min(max);
    }

    fn replace_fragment(&mut self, id: &str) {
        self.fragment = Some(id.to_string());
    }
}
