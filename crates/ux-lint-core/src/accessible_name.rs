//! Best-effort accessible names for controls and interactive elements.
//!
//! This approximates the accessible name computation closely enough for
//! heuristic auditing. It does not implement the full algorithm: roles,
//! `title` fallbacks, CSS-generated content and hidden subtrees are ignored.
//!
//! Two precedence chains exist:
//!
//! - [`control_label`] for form fields: `aria-label`, `aria-labelledby`,
//!   `<label for>`, wrapping `<label>`, then placeholder.
//! - [`accessible_name`] for links, buttons and images: `aria-label`,
//!   `aria-labelledby`, input `value` or control label, `alt`, then own text.
//!
//! An empty string means "no accessible name", never an error.

use std::collections::HashMap;

use crate::dom::DocumentTree;
use crate::text::collapse_whitespace;

/// Prefix marking a placeholder used in place of a real label.
pub const PLACEHOLDER_PREFIX: &str = "(placeholder)";

/// Control tags whose text must not leak into a wrapping label.
const NESTED_CONTROL_TAGS: &[&str] = &["input", "select", "textarea", "button"];

/// Input types whose `value` is the visible button caption.
const VALUE_CAPTION_TYPES: &[&str] = &["submit", "button", "reset"];

/// Resolve the label of a form control.
///
/// Builds a fresh [`NameResolver`]; prefer one shared resolver when naming
/// many elements of the same document.
pub fn control_label<T: DocumentTree>(tree: &T, control: T::Node) -> String {
    NameResolver::new(tree).control_label(control)
}

/// Resolve the accessible name of a link, button, image or other element.
pub fn accessible_name<T: DocumentTree>(tree: &T, element: T::Node) -> String {
    NameResolver::new(tree).accessible_name(element)
}

/// Name resolution over one document, with `id` and `label[for]` lookups
/// indexed up front.
pub struct NameResolver<'t, T: DocumentTree> {
    tree: &'t T,
    by_id: HashMap<&'t str, T::Node>,
    label_for: HashMap<&'t str, T::Node>,
}

impl<'t, T: DocumentTree> NameResolver<'t, T> {
    /// Index every `id` and `label[for]` in the document. First match in
    /// document order wins.
    pub fn new(tree: &'t T) -> Self {
        let mut by_id = HashMap::new();
        let mut label_for = HashMap::new();
        for node in tree.select(|_| true) {
            if let Some(id) = tree.attr(node, "id").filter(|id| !id.is_empty()) {
                by_id.entry(id).or_insert(node);
            }
            if tree.tag_name(node) == "label"
                && let Some(target) = tree.attr(node, "for")
            {
                label_for.entry(target.trim()).or_insert(node);
            }
        }
        Self {
            tree,
            by_id,
            label_for,
        }
    }

    /// The document being resolved against.
    pub const fn tree(&self) -> &'t T {
        self.tree
    }

    /// See [`control_label`].
    pub fn control_label(&self, control: T::Node) -> String {
        let tree = self.tree;
        if let Some(label) = aria_label(tree, control) {
            return label;
        }
        if let Some(label) = self.labelled_by(control) {
            return label;
        }

        let explicit = tree
            .attr(control, "id")
            .filter(|id| !id.is_empty())
            .and_then(|id| self.label_for.get(id));
        if let Some(&label) = explicit {
            let text = element_text(tree, label);
            if !text.is_empty() {
                return text;
            }
        }

        if let Some(wrapping) = tree.closest(control, "label") {
            let text =
                collapse_whitespace(&tree.text_content_excluding(wrapping, NESTED_CONTROL_TAGS));
            if !text.is_empty() {
                return text;
            }
        }

        if let Some(placeholder) = non_blank_attr(tree, control, "placeholder") {
            return format!("{PLACEHOLDER_PREFIX} {}", collapse_whitespace(placeholder));
        }

        String::new()
    }

    /// See [`accessible_name`].
    pub fn accessible_name(&self, element: T::Node) -> String {
        let tree = self.tree;
        if let Some(label) = aria_label(tree, element) {
            return label;
        }
        if let Some(label) = self.labelled_by(element) {
            return label;
        }

        match tree.tag_name(element) {
            "input" => {
                let input_type = tree.attr(element, "type").unwrap_or("").to_lowercase();
                if VALUE_CAPTION_TYPES.iter().any(|t| *t == input_type)
                    && let Some(value) = non_blank_attr(tree, element, "value")
                {
                    return collapse_whitespace(value);
                }
                return self.control_label(element);
            }
            "img" => {
                if let Some(alt) = non_blank_attr(tree, element, "alt") {
                    return collapse_whitespace(alt);
                }
            }
            _ => {}
        }

        element_text(tree, element)
    }

    fn labelled_by(&self, node: T::Node) -> Option<String> {
        let ids = self.tree.attr(node, "aria-labelledby")?;
        let parts: Vec<String> = ids
            .split_whitespace()
            .filter_map(|id| self.by_id.get(id))
            .map(|&referenced| element_text(self.tree, referenced))
            .collect();
        let joined = collapse_whitespace(&parts.join(" "));
        (!joined.is_empty()).then_some(joined)
    }
}

/// Diagnostic descriptor of the form `tag[#id][.firstClass]`.
///
/// Never used to look elements up again.
pub fn element_selector<T: DocumentTree>(tree: &T, element: T::Node) -> String {
    let mut selector = tree.tag_name(element).to_lowercase();
    if let Some(id) = tree.attr(element, "id").filter(|id| !id.is_empty()) {
        selector.push('#');
        selector.push_str(id);
    }
    if let Some(class) = tree
        .attr(element, "class")
        .and_then(|classes| classes.split_whitespace().next())
    {
        selector.push('.');
        selector.push_str(class);
    }
    selector
}

/// Collapsed text content of an element.
pub fn element_text<T: DocumentTree>(tree: &T, element: T::Node) -> String {
    collapse_whitespace(&tree.text_content(element))
}

fn non_blank_attr<'t, T: DocumentTree>(
    tree: &'t T,
    node: T::Node,
    name: &str,
) -> Option<&'t str> {
    tree.attr(node, name).filter(|value| !value.trim().is_empty())
}

fn aria_label<T: DocumentTree>(tree: &T, node: T::Node) -> Option<String> {
    non_blank_attr(tree, node, "aria-label").map(collapse_whitespace)
}
