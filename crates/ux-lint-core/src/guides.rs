//! Static UX reference guides.
//!
//! Each guide has a short name and a `ux://` URI. The markdown bodies are
//! compiled into the binary.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Identifier of a built-in guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum GuideId {
    /// Nielsen's ten usability heuristics.
    NielsenHeuristics,
    /// Perceivable, operable, understandable, robust.
    PourWcag,
    /// Web form usability checklist.
    FormsChecklist,
    /// Moderated usability test script.
    UsabilityTestTemplate,
}

/// A reference document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Guide {
    /// Which guide this is.
    pub id: GuideId,
    /// Short name, e.g. `forms-checklist`.
    pub name: &'static str,
    /// `ux://` address.
    pub uri: &'static str,
    /// Display title.
    pub title: &'static str,
    /// One-line summary.
    pub description: &'static str,
    /// Markdown body.
    pub text: &'static str,
}

/// Media type of every guide body.
pub const GUIDE_MIME_TYPE: &str = "text/markdown";

// Ordered by `GuideId` discriminant.
static GUIDES: [Guide; 4] = [
    Guide {
        id: GuideId::NielsenHeuristics,
        name: "nielsen-heuristics",
        uri: "ux://framework/nielsen-heuristics",
        title: "Nielsen's 10 Usability Heuristics",
        description: "A compact reference for heuristic evaluations.",
        text: NIELSEN,
    },
    Guide {
        id: GuideId::PourWcag,
        name: "pour-wcag",
        uri: "ux://framework/pour-wcag",
        title: "Accessibility: POUR + quick checks",
        description: "High-level accessibility framing plus practical web checks.",
        text: POUR,
    },
    Guide {
        id: GuideId::FormsChecklist,
        name: "forms-checklist",
        uri: "ux://checklist/forms",
        title: "Forms UX checklist",
        description: "A practical checklist for web form usability.",
        text: FORMS,
    },
    Guide {
        id: GuideId::UsabilityTestTemplate,
        name: "usability-test-template",
        uri: "ux://template/usability-test",
        title: "Usability test script template",
        description: "A fill-in template for moderated usability tests.",
        text: USABILITY_TEST,
    },
];

const NIELSEN: &str = "\
# Nielsen's 10 usability heuristics (reference)

1. Visibility of system status
2. Match between system and the real world
3. User control and freedom
4. Consistency and standards
5. Error prevention
6. Recognition rather than recall
7. Flexibility and efficiency of use
8. Aesthetic and minimalist design
9. Help users recognize, diagnose, and recover from errors
10. Help and documentation

Severity scale (0-4): 0 none, 1 cosmetic, 2 minor, 3 major, 4 critical.";

const POUR: &str = "\
# Accessibility framing: POUR

- **Perceivable**: text alternatives, captions, adaptable structure, distinguishable content.
- **Operable**: keyboard access, enough time, no seizure triggers, clear navigation.
- **Understandable**: readable text, predictable UI, helpful error handling.
- **Robust**: semantic HTML, correct ARIA, compatible with assistive technology.

Quick checks:
- Can you tab through everything in a logical order?
- Do form fields have explicit labels and clear error messages?
- Is there a visible focus style?
- Are headings hierarchical and meaningful?
- Are buttons and links descriptive out of context?";

const FORMS: &str = "\
# Forms UX checklist

- Use explicit labels; placeholders are not labels.
- Group related fields and keep forms as short as possible.
- Mark required and optional fields clearly (prefer \"optional\" markers).
- Use input types (`email`, `tel`, `password`) and `autocomplete` tokens.
- Validate inline when it helps; keep user input on errors.
- Error messages say what happened and how to fix it.
- Only disable submit with a visible reason; never trap the user.
- Provide sensible defaults; avoid forced resets.
- Confirm destructive actions and allow undo where possible.";

const USABILITY_TEST: &str = "\
# Usability test script (template)

## Goal
- What do we need to learn? Which decision will this inform?

## Participants
- Target profile, recruiting criteria, sample size.

## Setup
- Device and browser, accounts, test data, recording, consent.

## Tasks
1. Task 1: ...
   - Success criteria:
   - Follow-up questions:
2. Task 2: ...

## Metrics
- Task success, time on task, errors, confidence rating, SUS (optional).

## Debrief
- What felt easy or hard? What would you change?

## Notes for facilitator
- Encourage thinking aloud, avoid leading questions, probe for expectations.";

/// All guides in a stable order.
pub fn all_guides() -> &'static [Guide] {
    &GUIDES
}

/// Guide by identifier.
pub fn guide(id: GuideId) -> &'static Guide {
    &GUIDES[id as usize]
}

/// Guide by short name or `ux://` URI.
pub fn find_guide(name_or_uri: &str) -> Option<&'static Guide> {
    let key = name_or_uri.trim();
    GUIDES
        .iter()
        .find(|guide| guide.name == key || guide.uri == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_id_has_its_own_guide() {
        for id in [
            GuideId::NielsenHeuristics,
            GuideId::PourWcag,
            GuideId::FormsChecklist,
            GuideId::UsabilityTestTemplate,
        ] {
            assert_eq!(guide(id).id, id);
        }
    }

    #[test]
    fn names_match_serde_ids() {
        for guide in all_guides() {
            let serialized = serde_json::to_value(guide.id).unwrap();
            assert_eq!(serialized, guide.name);
        }
    }

    #[test]
    fn lookup_by_name_or_uri() {
        assert_eq!(
            find_guide("forms-checklist").map(|g| g.id),
            Some(GuideId::FormsChecklist)
        );
        assert_eq!(
            find_guide(" ux://template/usability-test ").map(|g| g.id),
            Some(GuideId::UsabilityTestTemplate)
        );
        assert!(find_guide("ux://nope").is_none());
    }

    #[test]
    fn bodies_are_markdown_documents() {
        for guide in all_guides() {
            assert!(guide.text.starts_with("# "), "{} lacks a heading", guide.name);
            assert!(guide.uri.starts_with("ux://"));
        }
    }
}
