//! Convert a Node tree to plain text.
//!
//! The walk is depth-first with an explicit work stack, so nesting depth is
//! bounded by the heap rather than the call stack. Every element gets an entry
//! hook (breaks, list markers, row separators) before its children and an exit
//! hook (breaks, cell separators, link annotations) after them. The root only
//! gets its entry hook.

use log::{debug, trace};

use crate::list::{ListKind, Ordinal};
use crate::node::Node;
use crate::service::{LinkAnnotation, PlainTextOptions};
use crate::tags::TagKind;
use crate::utilities::{
    collapse_whitespace, duplicates_href, finalize, is_absolute_url, BREAKING_WHITESPACE,
};

/// Formatting state inherited by the children of an element
#[derive(Debug, Clone, Copy, Default)]
struct Context {
    preformatted: bool,
    ul_depth: usize,
    ol_depth: usize,
    list: ListKind,
    /// Index into [`Renderer::counters`] of the nearest enclosing `ol`
    counter: Option<usize>,
}

enum Task<'a> {
    Visit(&'a Node, Context),
    Leave(&'a Node),
}

struct Renderer<'o> {
    options: &'o PlainTextOptions,
    out: String,
    /// One counter per `ol` entered, shared by every `li` beneath it
    counters: Vec<Ordinal>,
}

/// Render `root` and everything beneath it as plain text
pub fn render(root: &Node, options: &PlainTextOptions) -> String {
    let mut renderer = Renderer {
        options,
        out: String::new(),
        counters: Vec::new(),
    };

    let mut stack = Vec::new();
    renderer.open(root, &root.tag_name(), Context::default(), &mut stack);

    while let Some(task) = stack.pop() {
        match task {
            Task::Visit(node, ctx) => renderer.visit(node, ctx, &mut stack),
            Task::Leave(node) => renderer.close(node),
        }
    }

    let text = finalize(&renderer.out);
    debug!(
        "rendered <{}>: {} bytes buffered, {} bytes of text, {} ordered lists",
        root.tag_name(),
        renderer.out.len(),
        text.len(),
        renderer.counters.len()
    );
    text
}

impl<'o> Renderer<'o> {
    fn visit<'a>(&mut self, node: &'a Node, ctx: Context, stack: &mut Vec<Task<'a>>) {
        if node.is_text() {
            self.push_text(node.node_value.as_deref().unwrap_or_default(), ctx);
            return;
        }
        if !node.is_container() {
            return;
        }

        let tag = node.tag_name();
        if tag == "plaintext" {
            self.out.push_str(&node.text_content());
            return;
        }
        if self.is_ignored(&tag) {
            trace!("skipping <{}> subtree", tag);
            return;
        }

        stack.push(Task::Leave(node));
        self.open(node, &tag, ctx, stack);
    }

    fn open<'a>(&mut self, node: &'a Node, tag: &str, ctx: Context, stack: &mut Vec<Task<'a>>) {
        match TagKind::of(tag) {
            TagKind::Paragraph => append_paragraph_break(&mut self.out),
            TagKind::Block => append_block_break(&mut self.out),
            TagKind::Ignored | TagKind::Inline => {}
        }

        match tag {
            "li" => self.push_list_marker(ctx),
            "tr" => self.out.push_str("| "),
            _ => {}
        }

        let child_ctx = self.child_context(tag, ctx);
        stack.extend(node.children().rev().map(|child| Task::Visit(child, child_ctx)));
    }

    fn close(&mut self, node: &Node) {
        let tag = node.tag_name();
        match tag.as_str() {
            "br" => {
                chomp_space(&mut self.out);
                self.out.push('\n');
            }
            "hr" => {
                chomp_space(&mut self.out);
                if !self.out.ends_with('\n') {
                    self.out.push('\n');
                }
                self.out.push_str(&self.options.hr);
                self.out.push('\n');
            }
            "td" | "th" => self.out.push_str(" | "),
            "a" => self.annotate_link(node),
            _ => match TagKind::of(&tag) {
                TagKind::Paragraph => append_paragraph_break(&mut self.out),
                TagKind::Block => append_block_break(&mut self.out),
                TagKind::Ignored | TagKind::Inline => {}
            },
        }
    }

    fn child_context(&mut self, tag: &str, ctx: Context) -> Context {
        match tag {
            "ul" => Context {
                ul_depth: ctx.ul_depth + 1,
                list: ListKind::Unordered,
                ..ctx
            },
            "ol" => {
                let ol_depth = ctx.ol_depth + 1;
                self.counters.push(Ordinal::for_depth(ol_depth));
                Context {
                    ol_depth,
                    list: ListKind::Ordered,
                    counter: Some(self.counters.len() - 1),
                    ..ctx
                }
            }
            "pre" => {
                // list items inside a pre count on their own copy of the ordinal
                let counter = ctx.counter.and_then(|i| {
                    let forked = *self.counters.get(i)?;
                    self.counters.push(forked);
                    Some(self.counters.len() - 1)
                });
                Context {
                    preformatted: true,
                    counter,
                    ..ctx
                }
            }
            _ => ctx,
        }
    }

    fn push_text(&mut self, text: &str, ctx: Context) {
        if ctx.preformatted {
            self.out.push_str(text);
            return;
        }

        let collapsed = collapse_whitespace(text);
        let chunk = if self.out.ends_with(BREAKING_WHITESPACE) {
            collapsed.trim_start_matches(' ')
        } else {
            collapsed.as_str()
        };
        self.out.push_str(chunk);
    }

    fn push_list_marker(&mut self, ctx: Context) {
        match ctx.list {
            ListKind::Unordered => {
                self.out.push_str(&"*".repeat(ctx.ul_depth));
                self.out.push(' ');
            }
            ListKind::Ordered => {
                if let Some(ordinal) = ctx.counter.and_then(|i| self.counters.get_mut(i)) {
                    self.out.push_str(&ordinal.to_string());
                    self.out.push_str(". ");
                    ordinal.advance();
                }
            }
            ListKind::None => {}
        }
    }

    fn annotate_link(&mut self, node: &Node) {
        let Some(href) = node.attr("href") else {
            return;
        };

        let collapsed = collapse_whitespace(&node.text_content());
        let text = collapsed.trim_matches(' ');
        if text.is_empty() {
            return;
        }

        if !is_absolute_url(href) {
            return;
        }
        if self.options.link_annotation == LinkAnnotation::Deduplicated
            && duplicates_href(href, text)
        {
            return;
        }

        self.out.push_str(" (");
        self.out.push_str(href);
        self.out.push_str(") ");
    }

    fn is_ignored(&self, tag: &str) -> bool {
        TagKind::of(tag) == TagKind::Ignored || self.options.ignore_tags.iter().any(|t| t == tag)
    }
}

fn chomp_space(out: &mut String) {
    if out.ends_with(' ') {
        out.pop();
    }
}

/// End the buffer with exactly two newlines
fn append_paragraph_break(out: &mut String) {
    chomp_space(out);
    if out.ends_with('\n') {
        if !out.ends_with("\n\n") {
            out.push('\n');
        }
    } else {
        out.push_str("\n\n");
    }
}

/// End the buffer with at least one newline
fn append_block_break(out: &mut String) {
    chomp_space(out);
    if !out.ends_with('\n') {
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn el(tag: &str, children: Vec<Node>) -> Node {
        children
            .into_iter()
            .fold(Node::element(tag), |parent, child| parent.with_child(child))
    }

    fn t(text: &str) -> Node {
        Node::text(text)
    }

    fn li(text: &str) -> Node {
        el("li", vec![t(text)])
    }

    fn render_default(root: &Node) -> String {
        render(root, &PlainTextOptions::default())
    }

    #[test]
    fn test_paragraph_break_idempotent() {
        for start in ["", "text", "text ", "text\n", "text\n\n"] {
            let mut once = start.to_string();
            append_paragraph_break(&mut once);
            let mut twice = once.clone();
            append_paragraph_break(&mut twice);
            assert_eq!(once, twice, "start {start:?}");
            assert!(once.ends_with("\n\n") && !once.ends_with("\n\n\n"));
        }
    }

    #[test]
    fn test_block_break_idempotent() {
        for start in ["text", "text ", "text\n"] {
            let mut once = start.to_string();
            append_block_break(&mut once);
            let mut twice = once.clone();
            append_block_break(&mut twice);
            assert_eq!(once, twice, "start {start:?}");
            assert_eq!(once, "text\n");
        }
    }

    #[test]
    fn test_breaks_merge() {
        let mut out = "text ".to_string();
        append_block_break(&mut out);
        append_paragraph_break(&mut out);
        append_block_break(&mut out);
        assert_eq!(out, "text\n\n");
    }

    #[test]
    fn test_bullet_list() {
        let body = el(
            "body",
            vec![
                t("List"),
                el(
                    "ul",
                    vec![
                        li("one"),
                        el("li", vec![t("two"), el("ul", vec![li("a"), li("b")])]),
                        li("three"),
                    ],
                ),
            ],
        );
        assert_eq!(
            render_default(&body),
            "List\n\n* one\n* two\n\n** a\n** b\n\n* three"
        );
    }

    #[test]
    fn test_numbered_list() {
        let body = el(
            "body",
            vec![
                t("List"),
                el(
                    "ol",
                    vec![
                        li("one"),
                        el("li", vec![t("two"), el("ol", vec![li("a"), li("b")])]),
                        li("three"),
                    ],
                ),
            ],
        );
        assert_eq!(
            render_default(&body),
            "List\n\n1. one\n2. two\n\na. a\nb. b\n\n3. three"
        );
    }

    #[test]
    fn test_list_kinds_nest_independently() {
        let body = el(
            "body",
            vec![el(
                "ul",
                vec![el(
                    "li",
                    vec![
                        t("x"),
                        el(
                            "ol",
                            vec![el("li", vec![t("y"), el("ul", vec![li("z")])])],
                        ),
                    ],
                )],
            )],
        );
        assert_eq!(render_default(&body), "* x\n\n1. y\n\n** z");
    }

    #[test]
    fn test_third_level_ordered_list_uses_digits() {
        let inner = el("ol", vec![li("c")]);
        let middle = el("ol", vec![el("li", vec![t("b"), inner])]);
        let outer = el("ol", vec![el("li", vec![t("a"), middle])]);
        let body = el("body", vec![outer]);
        assert_eq!(render_default(&body), "1. a\n\na. b\n\n1. c");
    }

    #[test]
    fn test_ordinal_shared_through_wrappers() {
        let body = el(
            "body",
            vec![el("ol", vec![li("a"), el("div", vec![li("b")]), li("c")])],
        );
        assert_eq!(render_default(&body), "1. a\n2. b\n3. c");
    }

    #[test]
    fn test_pre_forks_ordinal() {
        let body = el(
            "body",
            vec![el("ol", vec![li("a"), el("pre", vec![li("b"), li("c")]), li("d")])],
        );
        assert_eq!(render_default(&body), "1. a\n2. b\n3. c\n2. d");
    }

    #[test]
    fn test_sibling_lists_restart() {
        let body = el(
            "body",
            vec![el("ol", vec![li("a"), li("b")]), el("ol", vec![li("c")])],
        );
        assert_eq!(render_default(&body), "1. a\n2. b\n\n1. c");
    }

    #[test]
    fn test_list_item_without_list() {
        let body = el("body", vec![li("orphan")]);
        assert_eq!(render_default(&body), "orphan");
    }

    #[test]
    fn test_preformatted_inherited() {
        let body = el(
            "body",
            vec![
                el("div", vec![t("This \n is a \ntest")]),
                el("pre", vec![t("with\n  "), el("b", vec![t("pre   tags")])]),
                t("end"),
            ],
        );
        assert_eq!(render_default(&body), "This is a test\nwith\n  pre   tags\nend");
    }

    #[test]
    fn test_plaintext_dumps_raw_text() {
        let body = el(
            "body",
            vec![
                el("div", vec![t("my\nhtml")]),
                el("plaintext", vec![t("my\n text"), el("p", vec![t(" <raw>")])]),
            ],
        );
        assert_eq!(render_default(&body), "my html\nmy\n text <raw>");
    }

    #[test]
    fn test_cdata_and_comments() {
        let body = el(
            "body",
            vec![t("a "), Node::cdata("b  \n c"), Node::comment("hidden"), t(" d")],
        );
        assert_eq!(render_default(&body), "a b c d");
    }

    #[test]
    fn test_ignored_subtrees() {
        let body = el(
            "body",
            vec![
                t("keep "),
                el("script", vec![t("do_something()")]),
                el("iframe", vec![el("p", vec![t("frame")])]),
                t(" this"),
            ],
        );
        assert_eq!(render_default(&body), "keep this");
    }

    #[test]
    fn test_configured_ignore_tags() {
        let options = PlainTextOptions {
            ignore_tags: vec!["nav".to_string()],
            ..Default::default()
        };
        let body = el(
            "body",
            vec![el("nav", vec![t("menu")]), el("p", vec![t("content")])],
        );
        assert_eq!(render(&body, &options), "content");
    }

    #[test]
    fn test_table_rows() {
        let row = |a: &str, b: &str| {
            el("tr", vec![el("td", vec![t(a)]), el("td", vec![t(b)])])
        };
        let body = el(
            "body",
            vec![el("table", vec![el("tbody", vec![row("1", "2"), row("3", "4")])])],
        );
        assert_eq!(render_default(&body), "| 1 | 2 |\n| 3 | 4 |");
    }

    #[test]
    fn test_custom_hr() {
        let options = PlainTextOptions {
            hr: "~~~".to_string(),
            ..Default::default()
        };
        let body = el("body", vec![t("a"), Node::element("hr"), t("b")]);
        assert_eq!(render(&body, &options), "a\n~~~\nb");
    }

    #[test]
    fn test_link_policies() {
        let link = |href: &str, text: &str| {
            Node::element_with_attrs("a", vec![("href", href)]).with_child(t(text))
        };
        let body = el(
            "body",
            vec![
                link("http://example.com", "http://example.com"),
                t(" "),
                link("mailto:me@example.com", "Mail"),
            ],
        );

        assert_eq!(
            render_default(&body),
            "http://example.com Mail"
        );

        let always = PlainTextOptions {
            link_annotation: LinkAnnotation::Always,
            ..Default::default()
        };
        assert_eq!(
            render(&body, &always),
            "http://example.com (http://example.com) Mail"
        );
    }

    #[test]
    fn test_root_gets_entry_hooks_only() {
        let root = Node::element_with_attrs("a", vec![("href", "http://example.com/x")])
            .with_child(t("link"));
        assert_eq!(render_default(&root), "link");
    }

    #[test]
    fn test_document_fragment_root() {
        let fragment = Node::document_fragment()
            .with_child(el("p", vec![t("one")]))
            .with_child(el("p", vec![t("two")]));
        assert_eq!(render_default(&fragment), "one\n\ntwo");
    }

    #[test]
    fn test_deep_nesting() {
        let mut node = t("deep");
        for _ in 0..2_000 {
            node = el("span", vec![node]);
        }
        let body = el("body", vec![node]);
        assert_eq!(render_default(&body), "deep");
    }
}
