//! Readability scoring using Flesch Reading Ease and Flesch-Kincaid Grade Level.
//!
//! Formulas:
//! - Reading Ease: `206.835 - 1.015 * (words/sentences) - 84.6 * (syllables/words)`
//! - Grade Level: `0.39 * (words/sentences) + 11.8 * (syllables/words) - 15.59`
//!
//! Scores are not clamped. Very short or unusual inputs can produce values
//! below zero or above 100.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::severity::Severity;
use crate::text;

/// Default word count above which a sentence is reported as long.
pub const DEFAULT_LONG_SENTENCE_MAX_WORDS: usize = 22;

/// Maximum number of long sentences reported.
pub const LONG_SENTENCE_LIMIT: usize = 5;

/// Word count below which scores are flagged as noisy.
const SMALL_SAMPLE_WORDS: usize = 30;

/// Reading Ease below which text is flagged as hard to read.
const HARD_TO_READ_EASE: f64 = 50.0;

/// Long sentences are quoted up to this many characters.
const SENTENCE_PREVIEW_CHARS: usize = 240;

/// Raw counts gathered from the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TextCounts {
    /// Characters in the normalized text.
    pub characters: usize,
    /// Word tokens.
    pub words: usize,
    /// Sentences detected (zero for empty text).
    pub sentences: usize,
    /// Estimated syllables across all words.
    pub syllables: usize,
}

/// Per-sentence and per-word averages, rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Averages {
    /// Words per sentence.
    pub words_per_sentence: f64,
    /// Syllables per word.
    pub syllables_per_word: f64,
}

/// Readability scores, rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Scores {
    /// Flesch Reading Ease (higher = easier).
    pub flesch_reading_ease: f64,
    /// Flesch-Kincaid Grade Level (lower = easier).
    pub flesch_kincaid_grade: f64,
}

/// Result of readability scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReadabilityMetrics {
    /// Raw counts.
    pub counts: TextCounts,
    /// Derived averages.
    pub averages: Averages,
    /// Flesch scores.
    pub scores: Scores,
}

/// Kind of readability finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum FindingKind {
    /// Fewer than 30 words; scores are noisy.
    SmallSample,
    /// Average sentence length exceeds the configured threshold.
    LongSentences,
    /// Reading Ease below 50.
    HardToRead,
}

/// A readability observation with a severity and explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    /// How much attention the finding deserves.
    pub severity: Severity,
    /// What was found.
    #[serde(rename = "type")]
    pub kind: FindingKind,
    /// Human-readable explanation.
    pub message: String,
}

/// A sentence whose word count exceeds the threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LongSentence {
    /// Word tokens in the sentence.
    pub words: usize,
    /// The sentence, truncated to 240 characters.
    pub sentence: String,
}

/// Options for [`lint_readability_from_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadabilityOptions {
    /// Sentences with more words than this are reported (10–60).
    pub long_sentence_max_words: usize,
}

impl Default for ReadabilityOptions {
    fn default() -> Self {
        Self {
            long_sentence_max_words: DEFAULT_LONG_SENTENCE_MAX_WORDS,
        }
    }
}

/// Metrics plus findings and example long sentences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadabilityLint {
    /// Readability metrics for the whole text.
    pub metrics: ReadabilityMetrics,
    /// Findings in fixed order: small sample, long sentences, hard to read.
    pub findings: Vec<Finding>,
    /// Up to five long sentences in document order.
    pub long_sentences: Vec<LongSentence>,
}

/// Compute readability metrics for raw text.
///
/// Never fails: empty text yields zero counts and the formula constants as
/// scores.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn compute_readability(text: &str) -> ReadabilityMetrics {
    let cleaned = text::normalize(text);
    let sentences = text::split_sentences(&cleaned);
    let words = text::tokenize_words(&cleaned);
    let syllables: usize = words.iter().map(|w| text::count_syllables(w)).sum();

    let sentence_count = sentences.len().max(1);
    let word_count = words.len();

    let words_per_sentence = word_count as f64 / sentence_count as f64;
    let syllables_per_word = syllables as f64 / word_count.max(1) as f64;

    let (reading_ease, grade) = flesch_scores(words_per_sentence, syllables_per_word);

    ReadabilityMetrics {
        counts: TextCounts {
            characters: cleaned.chars().count(),
            words: word_count,
            sentences: sentences.len(),
            syllables,
        },
        averages: Averages {
            words_per_sentence: round_to(words_per_sentence, 2),
            syllables_per_word: round_to(syllables_per_word, 2),
        },
        scores: Scores {
            flesch_reading_ease: round_to(reading_ease, 1),
            flesch_kincaid_grade: round_to(grade, 1),
        },
    }
}

/// Unrounded Flesch reading ease and Flesch-Kincaid grade.
///
/// Evaluated term by term without fused multiply-add, so values that sit on
/// a `.x5` rounding boundary land on the same side as plain arithmetic.
#[allow(clippy::suboptimal_flops)]
fn flesch_scores(words_per_sentence: f64, syllables_per_word: f64) -> (f64, f64) {
    let reading_ease = 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word;
    let grade = 0.39 * words_per_sentence + 11.8 * syllables_per_word - 15.59;
    (reading_ease, grade)
}

/// Score text and flag problems.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn lint_readability_from_text(text: &str, options: &ReadabilityOptions) -> ReadabilityLint {
    let cleaned = text::normalize(text);
    let sentences = text::split_sentences(&cleaned);
    let metrics = compute_readability(&cleaned);
    let max_words = options.long_sentence_max_words;

    let mut findings = Vec::new();
    if metrics.counts.words < SMALL_SAMPLE_WORDS {
        findings.push(Finding {
            severity: Severity::Info,
            kind: FindingKind::SmallSample,
            message: "Text sample is short; readability scores may be noisy.".to_string(),
        });
    }
    if metrics.averages.words_per_sentence > max_words as f64 {
        findings.push(Finding {
            severity: Severity::Medium,
            kind: FindingKind::LongSentences,
            message: format!(
                "Average sentence length is {} words; consider breaking up long sentences.",
                metrics.averages.words_per_sentence
            ),
        });
    }
    if metrics.scores.flesch_reading_ease < HARD_TO_READ_EASE {
        findings.push(Finding {
            severity: Severity::Low,
            kind: FindingKind::HardToRead,
            message: format!(
                "Flesch Reading Ease is {}; consider simpler wording for broad audiences.",
                metrics.scores.flesch_reading_ease
            ),
        });
    }

    let long_sentences = find_long_sentences(&sentences, max_words, LONG_SENTENCE_LIMIT);
    tracing::debug!(
        findings = findings.len(),
        long_sentences = long_sentences.len(),
        "readability lint complete"
    );

    ReadabilityLint {
        metrics,
        findings,
        long_sentences,
    }
}

/// Return up to `limit` sentences, in order, with more than `max_words` words.
pub fn find_long_sentences(
    sentences: &[String],
    max_words: usize,
    limit: usize,
) -> Vec<LongSentence> {
    sentences
        .iter()
        .filter_map(|sentence| {
            let words = text::tokenize_words(sentence).len();
            (words > max_words).then(|| LongSentence {
                words,
                sentence: preview(sentence),
            })
        })
        .take(limit)
        .collect()
}

fn preview(sentence: &str) -> String {
    if sentence.chars().count() > SENTENCE_PREVIEW_CHARS {
        let kept: String = sentence.chars().take(SENTENCE_PREVIEW_CHARS - 3).collect();
        format!("{kept}…")
    } else {
        sentence.to_string()
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG_SENTENCE: &str = "This is a deliberately long sentence with many words that \
        should trigger the long sentence detection threshold for readability linting.";

    #[test]
    fn scores_use_unfused_arithmetic() {
        let wps = 4.5;
        let spw = 10.0 / 9.0;
        let (ease, grade) = flesch_scores(wps, spw);
        let ease_steps = 206.835 - 1.015 * wps;
        let grade_steps = 0.39 * wps + 11.8 * spw;
        assert_eq!(ease.to_bits(), (ease_steps - 84.6 * spw).to_bits());
        assert_eq!(grade.to_bits(), (grade_steps - 15.59).to_bits());
    }

    #[test]
    fn basic_readability() {
        let metrics = compute_readability("The cat sat on the mat. The dog barked.");
        assert_eq!(metrics.counts.sentences, 2);
        assert_eq!(metrics.counts.words, 9);
        assert_eq!(metrics.counts.syllables, 10);
        assert!(metrics.scores.flesch_reading_ease.is_finite());
        assert!(metrics.scores.flesch_kincaid_grade.is_finite());
    }

    #[test]
    fn averages_and_scores_are_rounded() {
        let metrics = compute_readability("The cat sat on the mat. The dog barked.");
        assert_eq!(metrics.averages.words_per_sentence, 4.5);
        assert_eq!(metrics.averages.syllables_per_word, 1.11);
        assert_eq!(metrics.scores.flesch_reading_ease, 108.3);
        assert_eq!(metrics.scores.flesch_kincaid_grade, -0.7);
    }

    #[test]
    fn empty_text_does_not_divide_by_zero() {
        let metrics = compute_readability("");
        assert_eq!(metrics.counts.words, 0);
        assert_eq!(metrics.counts.sentences, 0);
        assert_eq!(metrics.counts.characters, 0);
        assert_eq!(metrics.scores.flesch_reading_ease, 206.8);
        assert_eq!(metrics.scores.flesch_kincaid_grade, -15.6);
    }

    #[test]
    fn characters_counted_after_normalization() {
        let metrics = compute_readability("  Hi\u{00a0}\u{00a0}there.  ");
        assert_eq!(metrics.counts.characters, "Hi there.".len());
    }

    #[test]
    fn flags_long_sentences() {
        let lint = lint_readability_from_text(
            LONG_SENTENCE,
            &ReadabilityOptions {
                long_sentence_max_words: 10,
            },
        );
        assert!(lint.findings.iter().any(|f| f.kind == FindingKind::LongSentences));
        assert_eq!(lint.long_sentences.len(), 1);
        assert_eq!(lint.long_sentences[0].words, 20);
        assert_eq!(lint.long_sentences[0].sentence, LONG_SENTENCE);
    }

    #[test]
    fn default_threshold_does_not_flag_twenty_words() {
        let lint = lint_readability_from_text(LONG_SENTENCE, &ReadabilityOptions::default());
        assert!(lint.long_sentences.is_empty());
        assert!(!lint.findings.iter().any(|f| f.kind == FindingKind::LongSentences));
    }

    #[test]
    fn small_sample_is_reported_first() {
        let lint = lint_readability_from_text("Short text.", &ReadabilityOptions::default());
        assert_eq!(lint.findings[0].kind, FindingKind::SmallSample);
        assert_eq!(lint.findings[0].severity, Severity::Info);
    }

    #[test]
    fn hard_to_read_uses_low_severity() {
        let text = "Comprehensive organizational restructuring necessitated interdepartmental \
                    communication protocols facilitating procedural documentation dissemination.";
        let lint = lint_readability_from_text(text, &ReadabilityOptions::default());
        let finding = lint
            .findings
            .iter()
            .find(|f| f.kind == FindingKind::HardToRead)
            .expect("dense text should be hard to read");
        assert_eq!(finding.severity, Severity::Low);
        assert!(finding.message.contains("Flesch Reading Ease is"));
    }

    #[test]
    fn long_sentence_list_is_capped() {
        let sentence = "One two three four five six seven eight nine ten eleven twelve. ";
        let text = sentence.repeat(8);
        let lint = lint_readability_from_text(
            &text,
            &ReadabilityOptions {
                long_sentence_max_words: 10,
            },
        );
        assert_eq!(lint.long_sentences.len(), LONG_SENTENCE_LIMIT);
        assert!(lint.long_sentences.iter().all(|s| s.words == 12));
    }

    #[test]
    fn long_sentence_preview_is_truncated() {
        let sentence = "word ".repeat(60);
        let found = find_long_sentences(&[sentence.trim().to_string()], 10, 5);
        assert_eq!(found[0].words, 60);
        assert_eq!(found[0].sentence.chars().count(), 238);
        assert!(found[0].sentence.ends_with('…'));
    }

    #[test]
    fn lint_is_deterministic() {
        let options = ReadabilityOptions {
            long_sentence_max_words: 10,
        };
        let first = serde_json::to_string(&lint_readability_from_text(LONG_SENTENCE, &options));
        let second = serde_json::to_string(&lint_readability_from_text(LONG_SENTENCE, &options));
        assert!(first.is_ok());
        assert_eq!(first.unwrap(), second.unwrap());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let lint = lint_readability_from_text("The cat sat.", &ReadabilityOptions::default());
        let json = serde_json::to_value(&lint).unwrap();
        assert!(json["longSentences"].is_array());
        assert!(json["metrics"]["averages"]["wordsPerSentence"].is_number());
        assert!(json["metrics"]["scores"]["fleschReadingEase"].is_number());
        assert_eq!(json["findings"][0]["type"], "small-sample");
        assert_eq!(json["findings"][0]["severity"], "info");
    }
}
