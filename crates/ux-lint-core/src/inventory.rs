//! UI inventory extraction.
//!
//! Collects page metadata, landmarks, headings, links, buttons, images and
//! forms from a [`DocumentTree`], each category truncated to its first N
//! elements in document order, then runs the issue rules over the result.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::accessible_name::{NameResolver, element_selector, element_text};
use crate::dom::DocumentTree;
use crate::issues::{Issue, PageFacts, detect_issues};
use crate::text::collapse_whitespace;

/// Default per-category element limit.
pub const DEFAULT_MAX_ELEMENTS_PER_CATEGORY: usize = 60;

/// Lower bound on the number of forms kept, regardless of the category limit.
pub const MIN_FORMS: usize = 10;

const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Input types that act as buttons.
const BUTTON_INPUT_TYPES: &[&str] = &["button", "submit", "reset"];

/// Input types that are not data fields.
const NON_FIELD_INPUT_TYPES: &[&str] = &["submit", "button", "reset", "image"];

/// Options for [`extract_ui_inventory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryOptions {
    /// Cap for headings, links, buttons, images and fields per form.
    pub max_elements_per_category: usize,
}

impl Default for InventoryOptions {
    fn default() -> Self {
        Self {
            max_elements_per_category: DEFAULT_MAX_ELEMENTS_PER_CATEGORY,
        }
    }
}

impl InventoryOptions {
    /// Number of forms kept: `max(10, floor(max_elements_per_category / 3))`.
    pub const fn form_limit(&self) -> usize {
        let third = self.max_elements_per_category / 3;
        if third > MIN_FORMS { third } else { MIN_FORMS }
    }
}

/// Page-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Collapsed `<title>` text, empty when absent.
    pub title: String,
    /// Collapsed `<meta name="description">` content, empty when absent.
    pub meta_description: String,
    /// Trimmed root `lang`, `None` when absent or blank.
    pub lang: Option<String>,
}

/// Presence of the structural landmark elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Landmarks {
    /// `<header>` present.
    pub header: bool,
    /// `<nav>` present.
    pub nav: bool,
    /// `<main>` present.
    pub main: bool,
    /// `<footer>` present.
    pub footer: bool,
    /// `<aside>` present.
    pub aside: bool,
}

/// Number of items kept per category, after truncation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Counts {
    /// Headings kept.
    pub headings: usize,
    /// Links kept.
    pub links: usize,
    /// Buttons kept.
    pub buttons: usize,
    /// Images kept.
    pub images: usize,
    /// Forms kept.
    pub forms: usize,
}

/// A heading and its level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Heading {
    /// 1 through 6.
    pub level: u8,
    /// Collapsed text.
    pub text: String,
}

/// A link with an `href`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Link {
    /// Accessible name.
    pub text: String,
    /// Raw `href`, unresolved.
    pub href: String,
    /// Diagnostic selector.
    pub selector: String,
}

/// A button, button-like input, or `role="button"` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Button {
    /// Accessible name, empty when unlabeled.
    pub text: String,
    /// Diagnostic selector.
    pub selector: String,
}

/// An image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Image {
    /// Trimmed `alt`.
    pub alt: String,
    /// Trimmed `src`.
    pub src: String,
    /// Diagnostic selector.
    pub selector: String,
}

/// A data-entry control inside a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Field {
    /// `input`, `select` or `textarea`.
    pub tag: String,
    /// Lower-cased `type`, empty when absent.
    #[serde(rename = "type")]
    pub input_type: String,
    /// Trimmed `name`.
    pub name: String,
    /// Trimmed `id`.
    pub id: String,
    /// Whether `required` is present.
    pub required: bool,
    /// Trimmed `autocomplete`.
    pub autocomplete: String,
    /// Resolved label, empty when unlabeled.
    pub label: String,
    /// Diagnostic selector.
    pub selector: String,
}

/// A form and its data fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Form {
    /// Diagnostic selector.
    pub selector: String,
    /// Data fields in document order.
    pub fields: Vec<Field>,
}

/// Structured inventory of a page's interactive and structural elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    /// Page metadata.
    pub page: Page,
    /// Landmark presence.
    pub landmarks: Landmarks,
    /// Kept item counts.
    pub counts: Counts,
    /// Headings.
    pub headings: Vec<Heading>,
    /// Links.
    pub links: Vec<Link>,
    /// Buttons.
    pub buttons: Vec<Button>,
    /// Images.
    pub images: Vec<Image>,
    /// Forms.
    pub forms: Vec<Form>,
    /// Heuristic issues, in rule order.
    pub issues: Vec<Issue>,
}

/// Build the inventory of a document and detect issues in it.
#[tracing::instrument(skip_all, fields(limit = options.max_elements_per_category))]
pub fn extract_ui_inventory<T: DocumentTree>(tree: &T, options: &InventoryOptions) -> Inventory {
    let limit = options.max_elements_per_category;
    let names = NameResolver::new(tree);

    let headings: Vec<Heading> = tree
        .select_tags(HEADING_TAGS)
        .into_iter()
        .take(limit)
        .map(|heading| Heading {
            level: heading_level(tree.tag_name(heading)),
            text: element_text(tree, heading),
        })
        .collect();

    let links: Vec<Link> = tree
        .select(|node| tree.tag_name(node) == "a" && tree.has_attr(node, "href"))
        .into_iter()
        .take(limit)
        .map(|link| Link {
            text: names.accessible_name(link),
            href: tree.attr(link, "href").unwrap_or_default().to_string(),
            selector: element_selector(tree, link),
        })
        .collect();

    let buttons: Vec<Button> = tree
        .select(|node| is_button(tree, node))
        .into_iter()
        .take(limit)
        .map(|button| Button {
            text: names.accessible_name(button),
            selector: element_selector(tree, button),
        })
        .collect();

    let images: Vec<Image> = tree
        .select_tags(&["img"])
        .into_iter()
        .take(limit)
        .map(|image| Image {
            alt: trimmed_attr(tree, image, "alt"),
            src: trimmed_attr(tree, image, "src"),
            selector: element_selector(tree, image),
        })
        .collect();

    let forms: Vec<Form> = tree
        .select_tags(&["form"])
        .into_iter()
        .take(options.form_limit())
        .map(|form| Form {
            selector: element_selector(tree, form),
            fields: tree
                .select_within(form, |node| is_data_field(tree, node))
                .into_iter()
                .take(limit)
                .map(|control| field(&names, control))
                .collect(),
        })
        .collect();

    let landmarks = Landmarks {
        header: has_tag(tree, "header"),
        nav: has_tag(tree, "nav"),
        main: has_tag(tree, "main"),
        footer: has_tag(tree, "footer"),
        aside: has_tag(tree, "aside"),
    };

    let mut inventory = Inventory {
        page: page(tree),
        landmarks,
        counts: Counts {
            headings: headings.len(),
            links: links.len(),
            buttons: buttons.len(),
            images: images.len(),
            forms: forms.len(),
        },
        headings,
        links,
        buttons,
        images,
        forms,
        issues: Vec::new(),
    };

    // h1s are counted over the whole document, not the truncated heading list.
    let h1_count = tree.select_tags(&["h1"]).len();
    inventory.issues = detect_issues(&PageFacts::collect(&inventory, h1_count));

    tracing::debug!(
        headings = inventory.counts.headings,
        links = inventory.counts.links,
        buttons = inventory.counts.buttons,
        forms = inventory.counts.forms,
        issues = inventory.issues.len(),
        "extracted UI inventory"
    );
    inventory
}

fn page<T: DocumentTree>(tree: &T) -> Page {
    let title = tree
        .select_tags(&["title"])
        .into_iter()
        .next()
        .map(|title| element_text(tree, title))
        .unwrap_or_default();

    let meta_description = tree
        .select(|node| {
            tree.tag_name(node) == "meta" && tree.attr(node, "name") == Some("description")
        })
        .into_iter()
        .next()
        .and_then(|meta| tree.attr(meta, "content"))
        .map(collapse_whitespace)
        .unwrap_or_default();

    let lang = tree
        .document_element()
        .and_then(|root| tree.attr(root, "lang"))
        .map(str::trim)
        .filter(|lang| !lang.is_empty())
        .map(str::to_string);

    Page {
        title,
        meta_description,
        lang,
    }
}

fn field<T: DocumentTree>(names: &NameResolver<'_, T>, control: T::Node) -> Field {
    let tree = names.tree();
    Field {
        tag: tree.tag_name(control).to_lowercase(),
        input_type: tree.attr(control, "type").unwrap_or_default().to_lowercase(),
        name: trimmed_attr(tree, control, "name"),
        id: trimmed_attr(tree, control, "id"),
        required: tree.has_attr(control, "required"),
        autocomplete: trimmed_attr(tree, control, "autocomplete"),
        label: names.control_label(control),
        selector: element_selector(tree, control),
    }
}

fn is_button<T: DocumentTree>(tree: &T, node: T::Node) -> bool {
    match tree.tag_name(node) {
        "button" => true,
        "input" if input_type_in(tree, node, BUTTON_INPUT_TYPES) => true,
        _ => tree.attr(node, "role") == Some("button"),
    }
}

fn is_data_field<T: DocumentTree>(tree: &T, node: T::Node) -> bool {
    match tree.tag_name(node) {
        "select" | "textarea" => true,
        "input" => !input_type_in(tree, node, NON_FIELD_INPUT_TYPES),
        _ => false,
    }
}

fn input_type_in<T: DocumentTree>(tree: &T, node: T::Node, types: &[&str]) -> bool {
    let input_type = tree.attr(node, "type").unwrap_or_default().to_lowercase();
    types.iter().any(|t| *t == input_type)
}

fn has_tag<T: DocumentTree>(tree: &T, tag: &str) -> bool {
    !tree.select(|node| tree.tag_name(node) == tag).is_empty()
}

fn trimmed_attr<T: DocumentTree>(tree: &T, node: T::Node, name: &str) -> String {
    tree.attr(node, name).unwrap_or_default().trim().to_string()
}

fn heading_level(tag: &str) -> u8 {
    tag.strip_prefix('h')
        .and_then(|digit| digit.parse().ok())
        .unwrap_or(1)
}
