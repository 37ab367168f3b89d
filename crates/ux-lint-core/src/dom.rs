//! Read-only access to a parsed markup tree.
//!
//! Analysis code only needs a handful of capabilities from a document:
//! tag names, attributes, parent/child links and text. [`DocumentTree`]
//! captures exactly that, so the inventory and accessible-name logic work
//! against any tree. [`HtmlTree`] adapts a [`scraper::Html`] document.

use scraper::{ElementRef, Html, Node};

use crate::text::collapse_whitespace;

/// Default cap on characters of body text handed to readability scoring.
pub const DEFAULT_MAX_CHARS: usize = 50_000;

/// Elements whose content is never visible prose.
const NON_CONTENT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// A child of an element: another element or a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Child<'t, N> {
    /// Nested element.
    Element(N),
    /// Text node content.
    Text(&'t str),
}

/// Narrow, read-only view of a parsed document.
///
/// Implementors provide navigation primitives; selection, id lookup and text
/// extraction are derived from them. All sequences are in document order.
pub trait DocumentTree {
    /// Handle to an element. Cheap to copy.
    type Node: Copy;

    /// The root element (`<html>` for HTML documents).
    fn document_element(&self) -> Option<Self::Node>;

    /// Lower-case tag name.
    fn tag_name(&self, node: Self::Node) -> &str;

    /// Attribute value, if present.
    fn attr(&self, node: Self::Node, name: &str) -> Option<&str>;

    /// Parent element; `None` for the root.
    fn parent_element(&self, node: Self::Node) -> Option<Self::Node>;

    /// Element and text children in order. Comments and other node kinds are
    /// omitted.
    fn children(&self, node: Self::Node) -> Vec<Child<'_, Self::Node>>;

    /// Whether the attribute is present (possibly empty).
    fn has_attr(&self, node: Self::Node, name: &str) -> bool {
        self.attr(node, name).is_some()
    }

    /// Element children only.
    fn element_children(&self, node: Self::Node) -> Vec<Self::Node> {
        self.children(node)
            .into_iter()
            .filter_map(|child| match child {
                Child::Element(el) => Some(el),
                Child::Text(_) => None,
            })
            .collect()
    }

    /// All descendant elements of `node` (excluding `node`), pre-order.
    fn descendants(&self, node: Self::Node) -> Vec<Self::Node> {
        let mut found = Vec::new();
        let mut stack: Vec<Self::Node> = self.element_children(node);
        stack.reverse();
        while let Some(next) = stack.pop() {
            found.push(next);
            let mut children = self.element_children(next);
            children.reverse();
            stack.extend(children);
        }
        found
    }

    /// Every element in the document matching `predicate`.
    fn select<P>(&self, mut predicate: P) -> Vec<Self::Node>
    where
        P: FnMut(Self::Node) -> bool,
        Self: Sized,
    {
        let Some(root) = self.document_element() else {
            return Vec::new();
        };
        std::iter::once(root)
            .chain(self.descendants(root))
            .filter(|&node| predicate(node))
            .collect()
    }

    /// Descendants of `scope` matching `predicate`.
    fn select_within<P>(&self, scope: Self::Node, mut predicate: P) -> Vec<Self::Node>
    where
        P: FnMut(Self::Node) -> bool,
        Self: Sized,
    {
        self.descendants(scope)
            .into_iter()
            .filter(|&node| predicate(node))
            .collect()
    }

    /// Every element whose tag is one of `tags`.
    fn select_tags(&self, tags: &[&str]) -> Vec<Self::Node>
    where
        Self: Sized,
    {
        self.select(|node| {
            let tag = self.tag_name(node);
            tags.iter().any(|t| *t == tag)
        })
    }

    /// First element in the document with the given `id`.
    fn element_by_id(&self, id: &str) -> Option<Self::Node>
    where
        Self: Sized,
    {
        if id.is_empty() {
            return None;
        }
        self.select(|node| self.attr(node, "id") == Some(id))
            .into_iter()
            .next()
    }

    /// Nearest inclusive ancestor with the given tag.
    fn closest(&self, node: Self::Node, tag: &str) -> Option<Self::Node> {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if self.tag_name(candidate) == tag {
                return Some(candidate);
            }
            current = self.parent_element(candidate);
        }
        None
    }

    /// Concatenated text of all descendant text nodes.
    fn text_content(&self, node: Self::Node) -> String {
        self.text_content_excluding(node, &[])
    }

    /// Like [`text_content`](Self::text_content) but skipping the subtrees of
    /// descendants whose tag is in `skip_tags`.
    fn text_content_excluding(&self, node: Self::Node, skip_tags: &[&str]) -> String {
        let mut text = String::new();
        let mut stack = self.children(node);
        stack.reverse();
        while let Some(child) = stack.pop() {
            match child {
                Child::Text(run) => text.push_str(run),
                Child::Element(el) => {
                    let tag = self.tag_name(el);
                    if skip_tags.iter().any(|t| *t == tag) {
                        continue;
                    }
                    let mut children = self.children(el);
                    children.reverse();
                    stack.extend(children);
                }
            }
        }
        text
    }
}

/// [`DocumentTree`] over a borrowed [`scraper::Html`] document.
#[derive(Clone, Copy)]
pub struct HtmlTree<'a> {
    html: &'a Html,
}

impl<'a> HtmlTree<'a> {
    /// Wrap a parsed document.
    pub const fn new(html: &'a Html) -> Self {
        Self { html }
    }
}

impl<'a> DocumentTree for HtmlTree<'a> {
    type Node = ElementRef<'a>;

    fn document_element(&self) -> Option<ElementRef<'a>> {
        Some(self.html.root_element())
    }

    fn tag_name(&self, node: ElementRef<'a>) -> &str {
        node.value().name()
    }

    fn attr(&self, node: ElementRef<'a>, name: &str) -> Option<&str> {
        node.value().attr(name)
    }

    fn parent_element(&self, node: ElementRef<'a>) -> Option<ElementRef<'a>> {
        node.parent().and_then(ElementRef::wrap)
    }

    fn children(&self, node: ElementRef<'a>) -> Vec<Child<'_, ElementRef<'a>>> {
        if is_template(node) {
            return Vec::new();
        }
        node.children()
            .filter_map(|child| match child.value() {
                Node::Text(text) => Some(Child::Text(&**text)),
                Node::Element(_) => ElementRef::wrap(child).map(Child::Element),
                _ => None,
            })
            .collect()
    }

    fn descendants(&self, node: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        let mut found = Vec::new();
        let mut stack: Vec<ElementRef<'a>> = element_children(node);
        stack.reverse();
        while let Some(next) = stack.pop() {
            found.push(next);
            let mut children = element_children(next);
            children.reverse();
            stack.extend(children);
        }
        found
    }
}

/// Template content is inert: the parser keeps it as children, a live DOM
/// does not.
fn is_template(node: ElementRef<'_>) -> bool {
    node.value().name() == "template"
}

fn element_children(node: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    if is_template(node) {
        return Vec::new();
    }
    node.children().filter_map(ElementRef::wrap).collect()
}

/// An owned, parsed HTML document.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parse a full HTML document. Parsing is lenient and never fails.
    #[tracing::instrument(skip_all, fields(markup_len = markup.len()))]
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// Borrow the document as a [`DocumentTree`].
    pub const fn tree(&self) -> HtmlTree<'_> {
        HtmlTree::new(&self.html)
    }
}

impl std::fmt::Debug for HtmlDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlDocument").finish_non_exhaustive()
    }
}

/// Visible text of `<body>`, whitespace-collapsed and capped at `max_chars`.
///
/// Script, style, noscript and template content is skipped. Truncated text
/// ends with `…`.
pub fn extract_body_text<T: DocumentTree>(tree: &T, max_chars: usize) -> String {
    let raw = tree
        .select_tags(&["body"])
        .into_iter()
        .next()
        .map(|body| collapse_whitespace(&tree.text_content_excluding(body, NON_CONTENT_TAGS)))
        .unwrap_or_default();

    if raw.chars().count() > max_chars {
        let kept: String = raw.chars().take(max_chars).collect();
        format!("{kept}…")
    } else {
        raw
    }
}
