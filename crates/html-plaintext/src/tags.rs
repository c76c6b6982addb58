//! Tag taxonomy driving the structural effect of each element.

/// Elements that produce no output at all, descendants included
pub const IGNORED_ELEMENTS: &[&str] = &["script", "style", "object", "applet", "iframe"];

/// Elements surrounded by a double line break
pub const PARAGRAPH_ELEMENTS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "table", "ol", "ul", "dl", "dd",
    "blockquote", "dialog", "figure", "aside", "section",
];

/// Elements surrounded by a single line break
pub const BLOCK_ELEMENTS: &[&str] = &[
    "div", "address", "li", "dt", "center", "del", "article", "header",
    "footer", "nav", "pre", "legend", "tr",
];

/// Structural category of a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// Skipped along with its whole subtree
    Ignored,
    /// Bracketed by paragraph breaks
    Paragraph,
    /// Bracketed by block breaks
    Block,
    /// No structural effect; only children render
    Inline,
}

impl TagKind {
    /// Classify a lowercase tag name. Matching is case-sensitive.
    pub fn of(tag: &str) -> Self {
        if IGNORED_ELEMENTS.contains(&tag) {
            TagKind::Ignored
        } else if PARAGRAPH_ELEMENTS.contains(&tag) {
            TagKind::Paragraph
        } else if BLOCK_ELEMENTS.contains(&tag) {
            TagKind::Block
        } else {
            TagKind::Inline
        }
    }
}
