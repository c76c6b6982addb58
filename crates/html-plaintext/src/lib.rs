//! # html-plaintext
//!
//! Convert DOM nodes to a readable plain-text approximation.
//!
//! Markup collapses into line breaks, bullets, numbered lists, table-like
//! column separators and inline link annotations. Scripts, styles, embedded
//! objects and inline styling tags are discarded.
//!
//! ## Design
//!
//! The renderer accepts a CDP-style DOM [`Node`] structure rather than markup,
//! so any HTML parser can feed it. The `html` feature (on by default) bundles a
//! front end built on `scraper`.
//!
//! ## Example (Node-based)
//!
//! ```rust
//! use html_plaintext::{Node, PlainTextService};
//!
//! let service = PlainTextService::new();
//!
//! let mut body = Node::element("body");
//! let mut h1 = Node::element("h1");
//! h1.add_child(Node::text("Hello"));
//! body.add_child(h1);
//! body.add_child(Node::text("World"));
//!
//! let text = service.plain_text(&body).unwrap();
//! assert_eq!(text, "Hello\n\nWorld");
//! ```
//!
//! ## Example (HTML string)
//!
//! ```rust
//! let text = html_plaintext::plain_text(Some("<p>Hello <em>World</em></p>")).unwrap();
//! assert_eq!(text.as_deref(), Some("Hello World"));
//!
//! assert_eq!(html_plaintext::plain_text(None).unwrap(), None);
//! ```

#[cfg(feature = "html")]
pub mod html;
mod list;
pub mod node;
mod render;
mod service;
pub mod tags;
mod utilities;

#[cfg(feature = "html")]
pub use html::parse_html;
pub use node::{Node, NodeType};
pub use service::{LinkAnnotation, PlainTextOptions, PlainTextService, DEFAULT_HR};
pub use tags::TagKind;

/// Error type for plain-text conversion
#[derive(Debug, thiserror::Error)]
pub enum PlainTextError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, PlainTextError>;

/// Convert a string of HTML into plain text with the default options.
///
/// Absent input yields `Ok(None)`; an empty string yields `Ok(Some(""))`.
#[cfg(feature = "html")]
pub fn plain_text(html: Option<&str>) -> Result<Option<String>> {
    let Some(html) = html else {
        return Ok(None);
    };
    PlainTextService::new().plain_text_html(html).map(Some)
}
