//! Prompt templates for UX review work.
//!
//! Each template turns a few arguments into the text of one user message.
//! Absent optional arguments drop their section, and blank lines are not
//! emitted.

use serde::Serialize;

/// Metadata describing a prompt template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PromptInfo {
    /// Prompt name as registered with clients.
    pub name: &'static str,
    /// Display title.
    pub title: &'static str,
    /// One-line summary.
    pub description: &'static str,
}

/// Heuristic evaluation of a screen or flow.
pub const HEURISTIC_REVIEW: PromptInfo = PromptInfo {
    name: "ux-heuristic-review",
    title: "UX Heuristic Review",
    description: "Heuristic evaluation for a screen/flow (Nielsen heuristics + actionable fixes).",
};

/// Moderated usability test plan.
pub const USABILITY_TEST_PLAN: PromptInfo = PromptInfo {
    name: "ux-usability-test-plan",
    title: "Usability Test Plan",
    description: "Draft a moderated usability test plan (tasks, success criteria, questions).",
};

/// Microcopy rewrites.
pub const MICROCOPY_VARIANTS: PromptInfo = PromptInfo {
    name: "ux-microcopy-variants",
    title: "UX Microcopy Variants",
    description: "Generate concise microcopy options with rationale and accessibility notes.",
};

/// All prompt templates in registration order.
pub const ALL_PROMPTS: [PromptInfo; 3] = [HEURISTIC_REVIEW, USABILITY_TEST_PLAN, MICROCOPY_VARIANTS];

/// Join the present, non-empty lines with `\n`.
fn assemble<I>(lines: I) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    lines
        .into_iter()
        .flatten()
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn fixed(line: &str) -> Option<String> {
    Some(line.to_string())
}

fn section(heading: &str, body: Option<&str>) -> Option<String> {
    body.map(|body| format!("{heading}:\n{body}"))
}

/// Text of the heuristic review prompt.
pub fn heuristic_review(
    feature_or_screen: &str,
    users: Option<&str>,
    constraints: Option<&str>,
) -> String {
    assemble([
        fixed("You are a senior UX designer reviewing a web app UI."),
        fixed(
            "Do a heuristic review using Nielsen’s 10 heuristics and accessibility framing (POUR).",
        ),
        fixed("Process:"),
        fixed("1) Ask up to 5 clarifying questions if needed; otherwise state assumptions."),
        fixed(
            "2) Identify the top user tasks and risks (conversion drop-offs, error states, trust).",
        ),
        fixed(
            "3) Provide a prioritized findings list (Critical/Major/Minor) with: issue, who it \
             affects, why it matters, and an actionable fix.",
        ),
        fixed("4) Include microcopy improvements where relevant (specific rewrites)."),
        fixed(
            "5) Include what to measure/validate (analytics event ideas or usability test tasks).",
        ),
        section("Users / goals", users),
        section("Constraints", constraints),
        section("Screen/flow", Some(feature_or_screen)),
        fixed(
            "If you have access to MCP tools, you may first call a UI inventory tool and an \
             accessibility audit tool on the relevant HTML/URL, then incorporate results.",
        ),
    ])
}

/// Text of the usability test plan prompt.
pub fn usability_test_plan(
    research_goal: &str,
    product_context: &str,
    target_users: Option<&str>,
    tasks_to_test: Option<&str>,
) -> String {
    assemble([
        fixed("Create a moderated usability test plan for a web app."),
        fixed("Requirements:"),
        fixed("- Keep it practical and runnable (45–60 minutes)."),
        fixed(
            "- Include: goal, hypotheses, participant criteria, setup, tasks (with success \
             criteria), prompts, metrics, and debrief.",
        ),
        fixed("- Make tasks scenario-based and non-leading."),
        section("Research goal", Some(research_goal)),
        section("Product context", Some(product_context)),
        section("\nTarget users", target_users),
        section("\nMust-cover tasks", tasks_to_test),
        fixed(
            "If helpful, also include a short note on what artifacts to capture (recordings, \
             quotes, timestamps) and how to synthesize findings.",
        ),
    ])
}

/// Text of the microcopy variants prompt.
pub fn microcopy_variants(
    current_copy: &str,
    context: &str,
    tone: Option<&str>,
    max_length: Option<usize>,
) -> String {
    assemble([
        fixed("You are a UX writer."),
        fixed("Generate 5 improved microcopy variants."),
        fixed(
            "For each variant: provide the text, a 1-sentence rationale, and any \
             accessibility/clarity note (e.g., avoid ambiguity, describe action/result).",
        ),
        tone.map(|tone| format!("Tone: {tone}")),
        max_length.map(|max| format!("Max length: {max} characters")),
        section("Context", Some(context)),
        section("Current copy", Some(current_copy)),
    ])
}
