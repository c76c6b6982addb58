//! HTML parsing support.
//!
//! This module parses HTML strings and converts the document body to the
//! CDP-style Node structure consumed by the renderer.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::Node;

/// Parse an HTML string and return its `<body>` as a Node tree.
///
/// Falls back to the `<html>` element when the document has no body
/// (e.g. framesets). Comments are kept as comment nodes, which render to
/// nothing; doctypes and processing instructions are dropped. Entities are
/// decoded by the parser.
///
/// # Example
///
/// ```rust
/// use html_plaintext::{parse_html, PlainTextService};
///
/// let body = parse_html("<h1>Hello <em>World</em></h1>");
/// assert_eq!(body.tag_name(), "body");
///
/// let service = PlainTextService::new();
/// assert_eq!(service.plain_text(&body).unwrap(), "Hello World");
/// ```
pub fn parse_html(html: &str) -> Node {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let body = root
        .children()
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().name() == "body")
        .unwrap_or(root);

    scraper_to_node(body)
}

/// Convert a scraper ElementRef to our Node structure
fn scraper_to_node(element: ElementRef) -> Node {
    let tag = element.value().name();

    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();

    let mut node = if attrs.is_empty() {
        Node::element(tag)
    } else {
        Node::element_with_attrs(tag, attrs)
    };

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                node.add_child(Node::text(&text.text));
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(scraper_to_node(child_element));
                }
            }
            ScraperNode::Comment(comment) => {
                node.add_child(Node::comment(&comment.comment));
            }
            ScraperNode::ProcessingInstruction(_) | ScraperNode::Doctype(_) => {}
            // only ever the tree root, never a child of an element
            ScraperNode::Document | ScraperNode::Fragment => {}
        }
    }

    node
}
