//! Error types for ux-lint-core.
//!
//! The analysis pipelines themselves are total; errors only arise at the
//! edges (configuration, loading sources, parsing engine output).

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading markup or text to analyze.
#[derive(Error, Debug)]
pub enum SourceError {
    /// A local file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// The file that was requested.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The input exceeds the configured byte limit.
    #[error("input too large: {what} is {size} bytes (limit: {max} bytes)")]
    TooLarge {
        /// Human-readable description of the input (path or URL).
        what: String,
        /// Observed size, or the size at which reading stopped.
        size: usize,
        /// Configured limit.
        max: usize,
    },

    /// A network fetch failed or returned a non-success status.
    #[error("fetch failed for {url}: {reason}")]
    Fetch {
        /// The requested URL.
        url: String,
        /// Status line or transport error.
        reason: String,
    },

    /// The binary was built without network support.
    #[error("fetching URLs is not supported by this build")]
    FetchUnsupported,
}

/// Result type alias using [`SourceError`].
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors that can occur while interpreting accessibility engine output.
#[derive(Error, Debug)]
pub enum AuditError {
    /// The results document is not valid JSON of the expected shape.
    #[error("invalid accessibility results: {0}")]
    InvalidResults(#[from] serde_json::Error),
}

/// Result type alias using [`AuditError`].
pub type AuditResult<T> = Result<T, AuditError>;
