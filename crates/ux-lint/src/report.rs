//! Analysis results paired with their source, shared by the CLI and MCP server.

use serde::Serialize;
use tracing::instrument;

use ux_lint_core::audit::{self, AuditOptions, AuditReport};
use ux_lint_core::dom::{HtmlDocument, extract_body_text};
use ux_lint_core::render;
use ux_lint_core::{
    AuditError, Inventory, InventoryOptions, ReadabilityLint, ReadabilityOptions,
    extract_ui_inventory, lint_readability_from_text,
};

use crate::source::{LoadedSource, SourceInfo};

/// Results that have a markdown rendering.
pub trait Markdown {
    /// Render with an optional source label in the heading area.
    fn to_markdown(&self, source_label: Option<&str>) -> String;
}

impl Markdown for Inventory {
    fn to_markdown(&self, source_label: Option<&str>) -> String {
        render::render_inventory_markdown(self, source_label)
    }
}

impl Markdown for ReadabilityLint {
    fn to_markdown(&self, source_label: Option<&str>) -> String {
        render::render_readability_markdown(self, source_label)
    }
}

impl Markdown for AuditReport {
    fn to_markdown(&self, source_label: Option<&str>) -> String {
        render::render_audit_markdown(self, source_label)
    }
}

/// A result with the source it was computed from.
///
/// Serializes as `{"source": ..., <result fields>}`.
#[derive(Debug, Clone, Serialize)]
pub struct Report<T> {
    /// Where the input came from.
    pub source: SourceInfo,
    /// The analysis result.
    #[serde(flatten)]
    pub result: T,
}

impl<T: Markdown> Report<T> {
    /// Markdown summary labeled with the source.
    pub fn markdown(&self) -> String {
        self.result.to_markdown(Some(&self.source.label()))
    }
}

impl<T: Serialize> Report<T> {
    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the result cannot be serialized.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Inventory of loaded markup.
#[instrument(skip_all, fields(source = %loaded.source.label()))]
pub fn inventory(loaded: LoadedSource, options: &InventoryOptions) -> Report<Inventory> {
    let document = HtmlDocument::parse(&loaded.content);
    Report {
        source: loaded.source,
        result: extract_ui_inventory(&document.tree(), options),
    }
}

/// Readability of the body text of loaded markup.
#[instrument(skip_all, fields(source = %loaded.source.label(), max_chars = max_chars))]
pub fn readability_of_markup(
    loaded: LoadedSource,
    max_chars: usize,
    options: &ReadabilityOptions,
) -> Report<ReadabilityLint> {
    let document = HtmlDocument::parse(&loaded.content);
    let text = extract_body_text(&document.tree(), max_chars);
    Report {
        source: loaded.source,
        result: lint_readability_from_text(&text, options),
    }
}

/// Readability of plain text.
pub fn readability_of_text(text: &str, options: &ReadabilityOptions) -> Report<ReadabilityLint> {
    Report {
        source: SourceInfo::Text,
        result: lint_readability_from_text(text, options),
    }
}

/// Normalized accessibility engine results.
///
/// # Errors
///
/// Returns [`AuditError`] if the content is not valid results JSON.
pub fn axe(loaded: LoadedSource, options: &AuditOptions) -> Result<Report<AuditReport>, AuditError> {
    Ok(Report {
        result: audit::normalize_axe_json(&loaded.content, options)?,
        source: loaded.source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inline(html: &str) -> LoadedSource {
        LoadedSource {
            content: html.to_string(),
            source: SourceInfo::Html,
        }
    }

    #[test]
    fn report_json_flattens_result_next_to_source() {
        let report = inventory(
            inline(r#"<html lang="en"><title>T</title><h1>Hi</h1></html>"#),
            &InventoryOptions::default(),
        );
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["source"]["type"], "html");
        assert_eq!(json["page"]["title"], "T");
        assert_eq!(json["counts"]["headings"], 1);
    }

    #[test]
    fn markdown_carries_source_label() {
        let report = inventory(inline("<h1>Hi</h1>"), &InventoryOptions::default());
        assert!(report.markdown().contains("inline HTML"));
    }

    #[test]
    fn markup_readability_ignores_scripts() {
        let report = readability_of_markup(
            inline("<body><p>The cat sat.</p><script>var x = 1;</script></body>"),
            1_000,
            &ReadabilityOptions::default(),
        );
        assert_eq!(report.result.metrics.counts.words, 3);
        assert_eq!(report.result.metrics.counts.sentences, 1);
    }

    #[test]
    fn text_readability_reports_text_source() {
        let report = readability_of_text("Short text here.", &ReadabilityOptions::default());
        assert_eq!(report.source, SourceInfo::Text);
        assert!(report.markdown().contains("text"));
    }

    #[test]
    fn axe_rejects_invalid_json() {
        let loaded = LoadedSource {
            content: "not json".to_string(),
            source: SourceInfo::Json,
        };
        assert!(axe(loaded, &AuditOptions::default()).is_err());
    }

    #[test]
    fn axe_report_summarizes() {
        let loaded = LoadedSource {
            content: r#"{"violations": [{"id": "image-alt", "impact": "critical", "nodes": []}]}"#
                .to_string(),
            source: SourceInfo::Json,
        };
        let report = axe(loaded, &AuditOptions::default()).unwrap();
        assert_eq!(report.result.summary.violations, 1);
        assert_eq!(report.result.summary.by_impact.get("critical"), Some(&1));
    }
}
