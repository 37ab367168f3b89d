//! Markdown summaries of analysis results.
//!
//! Each renderer returns a self-contained markdown document meant for humans
//! and agents to skim. The structured result stays the source of truth.

use crate::audit::AuditReport;
use crate::inventory::Inventory;
use crate::readability::ReadabilityLint;

/// Items shown per inventory category.
pub const SAMPLE_SIZE: usize = 20;

/// Violations shown in the audit summary.
pub const VIOLATION_SAMPLE_SIZE: usize = 10;

const MD_SPECIAL: &[char] = &[
    '\\', '`', '*', '_', '{', '}', '[', ']', '(', ')', '>', '#', '+', '-', '.', '!', '|',
];

/// Backslash-escape markdown control characters.
pub fn md_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if MD_SPECIAL.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn or_placeholder(text: &str, placeholder: &str) -> String {
    if text.is_empty() {
        placeholder.to_string()
    } else {
        md_escape(text)
    }
}

fn title_line(title: &str, source_label: Option<&str>) -> String {
    match source_label {
        Some(label) if !label.is_empty() => format!("# {title} ({label})"),
        _ => format!("# {title}"),
    }
}

/// Accumulates lines and joins them with `\n`.
#[derive(Default)]
struct Lines(Vec<String>);

impl Lines {
    fn push(&mut self, line: impl Into<String>) {
        self.0.push(line.into());
    }

    fn bullet(&mut self, text: impl AsRef<str>) {
        self.0.push(format!("- {}", text.as_ref()));
    }

    fn blank(&mut self) {
        self.0.push(String::new());
    }

    fn finish(self) -> String {
        self.0.join("\n")
    }
}

/// Render a UI inventory.
pub fn render_inventory_markdown(inventory: &Inventory, source_label: Option<&str>) -> String {
    let mut out = Lines::default();
    out.push(title_line("UI inventory", source_label));
    out.blank();

    out.push("## Page");
    out.bullet(format!("Title: {}", or_placeholder(&inventory.page.title, "_missing_")));
    if !inventory.page.meta_description.is_empty() {
        out.bullet(format!(
            "Meta description: {}",
            md_escape(&inventory.page.meta_description)
        ));
    }
    out.bullet(format!(
        "Lang: {}",
        or_placeholder(inventory.page.lang.as_deref().unwrap_or_default(), "_missing_")
    ));
    out.blank();

    let yes_no = |present: bool| if present { "yes" } else { "no" };
    let landmarks = &inventory.landmarks;
    out.push("## Landmarks");
    for (name, present) in [
        ("header", landmarks.header),
        ("nav", landmarks.nav),
        ("main", landmarks.main),
        ("footer", landmarks.footer),
        ("aside", landmarks.aside),
    ] {
        out.bullet(format!("{name}: {}", yes_no(present)));
    }
    out.blank();

    let counts = &inventory.counts;
    out.push("## Counts");
    for (name, count) in [
        ("headings", counts.headings),
        ("links", counts.links),
        ("buttons", counts.buttons),
        ("images", counts.images),
        ("forms", counts.forms),
    ] {
        out.bullet(format!("{name}: {count}"));
    }
    out.blank();

    if !inventory.issues.is_empty() {
        out.push("## Notable issues");
        for issue in &inventory.issues {
            out.bullet(format!("[{}] {}", issue.severity, md_escape(&issue.message)));
        }
        out.blank();
    }

    if !inventory.headings.is_empty() {
        out.push("## Headings (sample)");
        for heading in inventory.headings.iter().take(SAMPLE_SIZE) {
            out.bullet(format!(
                "H{}: {}",
                heading.level,
                or_placeholder(&heading.text, "_empty_")
            ));
        }
        out.blank();
    }

    if !inventory.buttons.is_empty() {
        out.push("## Buttons (sample)");
        for button in inventory.buttons.iter().take(SAMPLE_SIZE) {
            let mut line = or_placeholder(&button.text, "_unlabeled_");
            if !button.selector.is_empty() {
                line.push_str(&format!(" ({})", md_escape(&button.selector)));
            }
            out.bullet(line);
        }
        out.blank();
    }

    if !inventory.links.is_empty() {
        out.push("## Links (sample)");
        for link in inventory.links.iter().take(SAMPLE_SIZE) {
            out.bullet(format!(
                "{} → {}",
                or_placeholder(&link.text, "_unlabeled_"),
                or_placeholder(&link.href, "_missing href_")
            ));
        }
        out.blank();
    }

    out.finish()
}

/// Render a readability lint.
pub fn render_readability_markdown(lint: &ReadabilityLint, source_label: Option<&str>) -> String {
    let metrics = &lint.metrics;
    let mut out = Lines::default();
    out.push(title_line("Readability lint", source_label));
    out.blank();

    out.push("## Metrics");
    out.bullet(format!("Words: {}", metrics.counts.words));
    out.bullet(format!("Sentences: {}", metrics.counts.sentences));
    out.bullet(format!(
        "Flesch Reading Ease: {}",
        metrics.scores.flesch_reading_ease
    ));
    out.bullet(format!(
        "Flesch-Kincaid Grade: {}",
        metrics.scores.flesch_kincaid_grade
    ));
    out.bullet(format!(
        "Avg words/sentence: {}",
        metrics.averages.words_per_sentence
    ));
    out.blank();

    if !lint.findings.is_empty() {
        out.push("## Findings");
        for finding in &lint.findings {
            out.bullet(format!("[{}] {}", finding.severity, md_escape(&finding.message)));
        }
        out.blank();
    }

    if !lint.long_sentences.is_empty() {
        out.push("## Long sentences (examples)");
        for long in &lint.long_sentences {
            out.bullet(format!("{} words: {}", long.words, md_escape(&long.sentence)));
        }
        out.blank();
    }

    out.finish()
}

/// Render a normalized accessibility audit.
pub fn render_audit_markdown(report: &AuditReport, source_label: Option<&str>) -> String {
    let mut out = Lines::default();
    out.push(title_line("Accessibility (axe) audit", source_label));
    out.blank();

    out.push("## Summary");
    out.bullet(format!("Violations: {}", report.summary.violations));
    for (impact, count) in &report.summary.by_impact {
        out.bullet(format!("{impact}: {count}"));
    }
    out.blank();

    if report.violations.is_empty() {
        out.push("_No violations found._");
        return out.finish();
    }

    out.push("## Top violations");
    for violation in report.violations.iter().take(VIOLATION_SAMPLE_SIZE) {
        let mut heading = format!("### {}", md_escape(&violation.id));
        if let Some(impact) = &violation.impact {
            heading.push_str(&format!(" ({})", md_escape(impact)));
        }
        out.push(heading);
        out.bullet(md_escape(&violation.help));
        out.bullet(format!("Help: {}", violation.help_url));
        if !violation.nodes.is_empty() {
            out.bullet("Examples:");
            for node in &violation.nodes {
                let mut line = md_escape(&node.target_label());
                if let Some(summary) = node.failure_summary.as_deref().filter(|s| !s.is_empty()) {
                    line.push_str(&format!(": {}", md_escape(summary)));
                }
                out.bullet(line);
            }
        }
        out.blank();
    }

    out.finish()
}
