//! Accepted ranges for user-supplied analysis options.
//!
//! The core library trusts its options; the CLI and MCP server check them
//! against these bounds first.

/// An inclusive range for one named option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bound {
    /// Option name as it appears in tool parameters.
    pub name: &'static str,
    /// Smallest accepted value.
    pub min: usize,
    /// Largest accepted value.
    pub max: usize,
}

impl Bound {
    /// Return `value` if it lies within the range.
    ///
    /// # Errors
    ///
    /// Returns a message naming the option and its range otherwise.
    pub fn check(&self, value: usize) -> Result<usize, String> {
        if (self.min..=self.max).contains(&value) {
            Ok(value)
        } else {
            Err(format!(
                "{} must be between {} and {} (got {value})",
                self.name, self.min, self.max
            ))
        }
    }

    /// Parse and check a command-line value.
    ///
    /// # Errors
    ///
    /// Returns a message if `raw` is not an integer or is out of range.
    pub fn parse(&self, raw: &str) -> Result<usize, String> {
        let value: usize = raw
            .trim()
            .parse()
            .map_err(|_| format!("{} must be an integer (got {raw:?})", self.name))?;
        self.check(value)
    }

    /// Check an optional value, passing `None` through.
    ///
    /// # Errors
    ///
    /// Returns a message if the value is present and out of range.
    pub fn check_opt(&self, value: Option<usize>) -> Result<Option<usize>, String> {
        value.map(|v| self.check(v)).transpose()
    }
}

/// Reject readability text that is empty or only whitespace.
///
/// # Errors
///
/// Returns a message naming `name` when `text` has nothing to score.
pub fn require_text<'t>(name: &str, text: &'t str) -> Result<&'t str, String> {
    if text.trim().is_empty() {
        Err(format!("{name} must not be empty or whitespace"))
    } else {
        Ok(text)
    }
}

/// Per-category inventory cap.
pub const MAX_ELEMENTS_PER_CATEGORY: Bound = Bound {
    name: "maxElementsPerCategory",
    min: 10,
    max: 500,
};

/// Long-sentence threshold in words.
pub const LONG_SENTENCE_MAX_WORDS: Bound = Bound {
    name: "longSentenceMaxWords",
    min: 10,
    max: 60,
};

/// Characters of body text extracted from markup.
pub const MAX_CHARS: Bound = Bound {
    name: "maxChars",
    min: 100,
    max: 200_000,
};

/// Input byte limit for loaded sources.
pub const MAX_BYTES: Bound = Bound {
    name: "maxBytes",
    min: 10_000,
    max: 20_000_000,
};

/// Fetch timeout in milliseconds.
pub const TIMEOUT_MS: Bound = Bound {
    name: "timeoutMs",
    min: 100,
    max: 60_000,
};

/// Violations kept from accessibility results.
pub const MAX_VIOLATIONS: Bound = Bound {
    name: "maxViolations",
    min: 1,
    max: 200,
};

/// Nodes kept per violation.
pub const MAX_NODES_PER_VIOLATION: Bound = Bound {
    name: "maxNodesPerViolation",
    min: 1,
    max: 20,
};

/// Character cap requested from the microcopy prompt.
pub const MICROCOPY_MAX_LENGTH: Bound = Bound {
    name: "maxLength",
    min: 5,
    max: 140,
};

/// clap parser for `--max-elements`.
pub fn parse_max_elements(raw: &str) -> Result<usize, String> {
    MAX_ELEMENTS_PER_CATEGORY.parse(raw)
}

/// clap parser for `--long-sentence-max-words`.
pub fn parse_long_sentence_max_words(raw: &str) -> Result<usize, String> {
    LONG_SENTENCE_MAX_WORDS.parse(raw)
}

/// clap parser for `--max-chars`.
pub fn parse_max_chars(raw: &str) -> Result<usize, String> {
    MAX_CHARS.parse(raw)
}

/// clap parser for `--max-bytes`.
pub fn parse_max_bytes(raw: &str) -> Result<usize, String> {
    MAX_BYTES.parse(raw)
}

/// clap parser for `--timeout-ms`.
pub fn parse_timeout_ms(raw: &str) -> Result<usize, String> {
    TIMEOUT_MS.parse(raw)
}

/// clap parser for `--max-violations`.
pub fn parse_max_violations(raw: &str) -> Result<usize, String> {
    MAX_VIOLATIONS.parse(raw)
}

/// clap parser for `--max-nodes`.
pub fn parse_max_nodes(raw: &str) -> Result<usize, String> {
    MAX_NODES_PER_VIOLATION.parse(raw)
}
