//! Normalization of accessibility engine (axe-style) results.
//!
//! The engine itself runs elsewhere, typically in a real browser. This module
//! takes its JSON output, bounds it, and summarizes violations by impact.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AuditResult;

/// Default number of violations kept.
pub const DEFAULT_MAX_VIOLATIONS: usize = 25;

/// Default number of example nodes kept per violation.
pub const DEFAULT_MAX_NODES_PER_VIOLATION: usize = 3;

/// Bucket used for violations that carry no impact.
pub const UNKNOWN_IMPACT: &str = "unknown";

/// Options for [`normalize_axe_results`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditOptions {
    /// Violations kept, first N in engine order.
    pub max_violations: usize,
    /// Nodes kept per violation.
    pub max_nodes_per_violation: usize,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            max_violations: DEFAULT_MAX_VIOLATIONS,
            max_nodes_per_violation: DEFAULT_MAX_NODES_PER_VIOLATION,
        }
    }
}

/// Raw engine output. Only `violations` is read.
#[derive(Debug, Clone, Default, Deserialize)]
struct RawResults {
    #[serde(default)]
    violations: Vec<Violation>,
}

/// A rule violation and a sample of the nodes that fail it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Violation {
    /// Rule id, e.g. `image-alt`.
    pub id: String,
    /// `minor`, `moderate`, `serious`, `critical`, or absent.
    pub impact: Option<String>,
    /// What the rule checks.
    pub description: String,
    /// Short remediation hint.
    pub help: String,
    /// Link to the rule documentation.
    pub help_url: String,
    /// Rule tags such as `wcag2a`.
    pub tags: Vec<String>,
    /// Failing nodes.
    pub nodes: Vec<ViolationNode>,
}

/// One failing node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ViolationNode {
    /// Outer markup snippet.
    pub html: String,
    /// Selector path, usually an array of strings.
    pub target: Value,
    /// Engine explanation of the failure.
    pub failure_summary: Option<String>,
}

impl ViolationNode {
    /// Target rendered as a single comma-separated string.
    pub fn target_label(&self) -> String {
        match &self.target {
            Value::Array(parts) => parts
                .iter()
                .map(|part| match part {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// Counts of the kept violations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditSummary {
    /// Violations kept.
    pub violations: usize,
    /// Kept violations per impact level, sorted by impact name.
    pub by_impact: BTreeMap<String, usize>,
}

/// Bounded, summarized audit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AuditReport {
    /// Summary counts.
    pub summary: AuditSummary,
    /// Kept violations in engine order.
    pub violations: Vec<Violation>,
}

/// Parse engine JSON and normalize it.
///
/// # Errors
///
/// Returns an error if `json` is not valid engine output.
pub fn normalize_axe_json(json: &str, options: &AuditOptions) -> AuditResult<AuditReport> {
    let raw: RawResults = serde_json::from_str(json)?;
    Ok(normalize_axe_results(raw.violations, options))
}

/// Truncate violations and nodes, then bucket by impact.
pub fn normalize_axe_results(violations: Vec<Violation>, options: &AuditOptions) -> AuditReport {
    let violations: Vec<Violation> = violations
        .into_iter()
        .take(options.max_violations)
        .map(|mut violation| {
            violation.nodes.truncate(options.max_nodes_per_violation);
            violation
        })
        .collect();

    let mut by_impact = BTreeMap::new();
    for violation in &violations {
        let key = violation.impact.as_deref().unwrap_or(UNKNOWN_IMPACT);
        *by_impact.entry(key.to_string()).or_insert(0) += 1;
    }

    tracing::debug!(violations = violations.len(), "normalized audit results");
    AuditReport {
        summary: AuditSummary {
            violations: violations.len(),
            by_impact,
        },
        violations,
    }
}
