//! PlainTextService - the main entry point for DOM to plain-text conversion.

use crate::node::Node;
use crate::render::render;
use crate::{PlainTextError, Result};

/// Horizontal rule emitted for `<hr>`: 31 dashes
pub const DEFAULT_HR: &str = "-------------------------------";

/// When to follow a link's text with its URL in parentheses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkAnnotation {
    /// Annotate every absolute URL whose link has visible text
    Always,
    /// Like `Always`, but skip links whose text already is the URL
    #[default]
    Deduplicated,
}

/// Options for PlainTextService
#[derive(Debug, Clone)]
pub struct PlainTextOptions {
    /// Horizontal rule string
    pub hr: String,

    /// Link annotation policy
    pub link_annotation: LinkAnnotation,

    /// Tags skipped along with their content, in addition to
    /// `script`, `style`, `object`, `applet` and `iframe`
    pub ignore_tags: Vec<String>,
}

impl Default for PlainTextOptions {
    fn default() -> Self {
        Self {
            hr: DEFAULT_HR.to_string(),
            link_annotation: LinkAnnotation::Deduplicated,
            ignore_tags: Vec::new(),
        }
    }
}

/// The main service for converting DOM nodes to plain text
#[derive(Debug, Clone, Default)]
pub struct PlainTextService {
    options: PlainTextOptions,
}

impl PlainTextService {
    /// Create a new PlainTextService with default options
    pub fn new() -> Self {
        Self {
            options: PlainTextOptions::default(),
        }
    }

    /// Create a PlainTextService with custom options
    pub fn with_options(options: PlainTextOptions) -> Self {
        Self { options }
    }

    /// Convert a DOM Node tree to plain text.
    ///
    /// `root` must be an element, document or document fragment.
    pub fn plain_text(&self, root: &Node) -> Result<String> {
        if !root.is_container() {
            return Err(PlainTextError::InvalidInput(format!(
                "expected an element, document or fragment root, got {:?}",
                root.node_type
            )));
        }

        Ok(render(root, &self.options))
    }

    /// Parse an HTML string and convert its body to plain text
    #[cfg(feature = "html")]
    pub fn plain_text_html(&self, html: &str) -> Result<String> {
        if html.is_empty() {
            return Ok(String::new());
        }

        log::debug!("parsing {} bytes of HTML", html.len());
        let body = crate::html::parse_html(html);
        self.plain_text(&body)
    }

    /// Skip elements with this tag along with their content
    pub fn ignore(&mut self, tag: &str) -> &mut Self {
        self.options.ignore_tags.push(tag.to_lowercase());
        self
    }

    /// Get the current options
    pub fn options(&self) -> &PlainTextOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut PlainTextOptions {
        &mut self.options
    }
}
