//! Heuristic usability issues derived from a UI inventory.
//!
//! Rules are a static, ordered table. Every rule is evaluated and every rule
//! that matches contributes one issue; there is no deduplication or severity
//! escalation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::inventory::Inventory;
use crate::severity::Severity;

/// Link names that say nothing about their destination.
pub const GENERIC_LINK_TEXT: &[&str] = &["click here", "learn more", "more", "here", "read more"];

/// Kind of inventory issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    /// No `<title>`, or an empty one.
    MissingTitle,
    /// No `lang` on the root element.
    MissingLang,
    /// No `<h1>` in the document.
    MissingH1,
    /// More than one `<h1>`.
    MultipleH1,
    /// Buttons without an accessible name.
    UnlabeledButtons,
    /// Links named "click here", "more" and similar.
    GenericLinkText,
    /// Visible form fields without a label.
    UnlabeledFormFields,
}

impl IssueKind {
    /// Returns the kind as a kebab-case string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingTitle => "missing-title",
            Self::MissingLang => "missing-lang",
            Self::MissingH1 => "missing-h1",
            Self::MultipleH1 => "multiple-h1",
            Self::UnlabeledButtons => "unlabeled-buttons",
            Self::GenericLinkText => "generic-link-text",
            Self::UnlabeledFormFields => "unlabeled-form-fields",
        }
    }
}

/// A severity-tagged usability finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Issue {
    /// How much the issue matters.
    pub severity: Severity,
    /// What kind of issue this is.
    #[serde(rename = "type")]
    pub kind: IssueKind,
    /// Human-readable explanation.
    pub message: String,
}

/// Facts about a page that the rules inspect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageFacts<'a> {
    /// Collapsed document title.
    pub title: &'a str,
    /// Root `lang`, if any.
    pub lang: Option<&'a str>,
    /// `<h1>` elements in the whole document, before any truncation.
    pub h1_count: usize,
    /// Collected buttons with an empty name.
    pub unlabeled_buttons: usize,
    /// Collected links whose name is generic.
    pub generic_links: usize,
    /// Name of the first generic link.
    pub generic_link_example: Option<&'a str>,
    /// Collected non-hidden fields with an empty label.
    pub unlabeled_fields: usize,
}

impl<'a> PageFacts<'a> {
    /// Gather facts from an inventory plus the document-wide `<h1>` count.
    pub fn collect(inventory: &'a Inventory, h1_count: usize) -> Self {
        let generic: Vec<&str> = inventory
            .links
            .iter()
            .map(|link| link.text.as_str())
            .filter(|text| is_generic_link_text(text))
            .collect();

        Self {
            title: &inventory.page.title,
            lang: inventory.page.lang.as_deref(),
            h1_count,
            unlabeled_buttons: inventory.buttons.iter().filter(|b| b.text.is_empty()).count(),
            generic_links: generic.len(),
            generic_link_example: generic.first().copied(),
            unlabeled_fields: inventory
                .forms
                .iter()
                .flat_map(|form| &form.fields)
                .filter(|field| field.input_type != "hidden" && field.label.is_empty())
                .count(),
        }
    }
}

/// One heuristic: when `check` returns a message, an issue is emitted.
struct Rule {
    kind: IssueKind,
    severity: Severity,
    check: fn(&PageFacts<'_>) -> Option<String>,
}

static RULES: &[Rule] = &[
    Rule {
        kind: IssueKind::MissingTitle,
        severity: Severity::High,
        check: |facts| {
            facts.title.is_empty().then(|| {
                "Missing or empty <title> (hurts wayfinding, tabs, history, search).".to_string()
            })
        },
    },
    Rule {
        kind: IssueKind::MissingLang,
        severity: Severity::High,
        check: |facts| {
            facts.lang.is_none().then(|| {
                "Missing <html lang=\"…\"> (hurts screen reader pronunciation and some \
                 translation tools)."
                    .to_string()
            })
        },
    },
    Rule {
        kind: IssueKind::MissingH1,
        severity: Severity::Medium,
        check: |facts| {
            (facts.h1_count == 0)
                .then(|| "No <h1> found (hurts page hierarchy and scanning).".to_string())
        },
    },
    Rule {
        kind: IssueKind::MultipleH1,
        severity: Severity::Low,
        check: |facts| {
            (facts.h1_count > 1).then(|| {
                format!(
                    "Multiple <h1> found ({}). Consider a single primary page heading.",
                    facts.h1_count
                )
            })
        },
    },
    Rule {
        kind: IssueKind::UnlabeledButtons,
        severity: Severity::High,
        check: |facts| {
            (facts.unlabeled_buttons > 0).then(|| {
                format!(
                    "{} button(s) appear to have no accessible name (empty text/aria-label).",
                    facts.unlabeled_buttons
                )
            })
        },
    },
    Rule {
        kind: IssueKind::GenericLinkText,
        severity: Severity::Medium,
        check: |facts| {
            facts.generic_link_example.map(|example| {
                format!(
                    "{} link(s) have generic text like “{example}”. Prefer descriptive, \
                     task-oriented link text.",
                    facts.generic_links
                )
            })
        },
    },
    Rule {
        kind: IssueKind::UnlabeledFormFields,
        severity: Severity::High,
        check: |facts| {
            (facts.unlabeled_fields > 0).then(|| {
                format!(
                    "{} form field(s) appear unlabeled (no <label>, aria-label, or \
                     aria-labelledby).",
                    facts.unlabeled_fields
                )
            })
        },
    },
];

/// Evaluate every rule in order against the page facts.
pub fn detect_issues(facts: &PageFacts<'_>) -> Vec<Issue> {
    RULES
        .iter()
        .filter_map(|rule| {
            (rule.check)(facts).map(|message| Issue {
                severity: rule.severity,
                kind: rule.kind,
                message,
            })
        })
        .collect()
}

/// Whether a resolved link name is one of the generic phrases.
pub fn is_generic_link_text(text: &str) -> bool {
    let lower = text.to_lowercase();
    GENERIC_LINK_TEXT.iter().any(|phrase| *phrase == lower)
}
