//! Severity levels shared by inventory issues and readability findings.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How much attention a reported problem deserves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Context for interpreting other results; not a problem on its own.
    Info,
    /// Minor polish.
    Low,
    /// Worth fixing soon.
    Medium,
    /// Blocks or seriously hinders some users.
    High,
}

impl Severity {
    /// Returns the severity as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
