//! Loading markup from inline strings, local files and URLs.
//!
//! Every load is bounded by a byte limit. Files are checked via metadata
//! before reading; fetched bodies are streamed and abandoned as soon as the
//! limit is crossed. Line endings are normalized to `\n`.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use ux_lint_core::config::{DEFAULT_FETCH_TIMEOUT_MS, DEFAULT_MAX_INPUT_BYTES};
use ux_lint_core::{SourceError, SourceResult};

/// User agent sent with every fetch.
pub const USER_AGENT: &str = concat!("ux-lint/", env!("CARGO_PKG_VERSION"));

/// Redirects followed before a fetch fails.
#[cfg(feature = "fetch")]
const MAX_REDIRECTS: usize = 10;

/// What to analyze.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Target {
    /// Markup passed inline.
    Html {
        /// The markup.
        html: String,
        /// Address the markup came from, if known. Informational only.
        #[serde(rename = "baseUrl", default, skip_serializing_if = "Option::is_none")]
        base_url: Option<String>,
    },
    /// A local file.
    File {
        /// Path, relative to the working directory or absolute.
        path: String,
    },
    /// A page fetched over HTTP(S).
    Url {
        /// Absolute URL.
        url: String,
    },
}

/// Where loaded content came from, as reported alongside results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceInfo {
    /// Inline markup.
    Html,
    /// A local file.
    File {
        /// Resolved absolute path.
        path: Utf8PathBuf,
    },
    /// A fetched page.
    Url {
        /// Final URL after redirects.
        url: String,
    },
    /// Inline plain text.
    Text,
    /// Inline accessibility engine results.
    Json,
}

impl SourceInfo {
    /// Short label used in markdown headings.
    pub fn label(&self) -> String {
        match self {
            Self::Html => "inline HTML".to_string(),
            Self::File { path } => path.to_string(),
            Self::Url { url } => url.clone(),
            Self::Text => "text".to_string(),
            Self::Json => "inline results".to_string(),
        }
    }
}

/// Content plus its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSource {
    /// Markup or text with `\n` line endings.
    pub content: String,
    /// Where it came from.
    pub source: SourceInfo,
}

/// Limits applied while loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Byte limit, `None` for unlimited.
    pub max_bytes: Option<usize>,
    /// Fetch timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_bytes: Some(DEFAULT_MAX_INPUT_BYTES),
            timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
        }
    }
}

/// Replace `\r\n` with `\n`.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n")
}

fn check_size(what: &str, size: usize, max_bytes: Option<usize>) -> SourceResult<()> {
    match max_bytes {
        Some(max) if size > max => Err(SourceError::TooLarge {
            what: what.to_string(),
            size,
            max,
        }),
        _ => Ok(()),
    }
}

/// Accept inline content after checking its size.
pub fn load_inline(
    content: &str,
    source: SourceInfo,
    max_bytes: Option<usize>,
) -> SourceResult<LoadedSource> {
    check_size("inline input", content.len(), max_bytes)?;
    Ok(LoadedSource {
        content: normalize_newlines(content),
        source,
    })
}

/// Read a local file, rejecting it up front when it exceeds `max_bytes`.
#[instrument(skip_all, fields(path = %path))]
pub fn load_file(path: &Utf8Path, max_bytes: Option<usize>) -> SourceResult<LoadedSource> {
    let read_error = |source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    };

    let metadata = std::fs::metadata(path.as_std_path()).map_err(read_error)?;
    let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
    check_size(path.as_str(), size, max_bytes)?;

    let content = std::fs::read_to_string(path.as_std_path()).map_err(read_error)?;
    let resolved = std::fs::canonicalize(path.as_std_path())
        .ok()
        .and_then(|p| Utf8PathBuf::from_path_buf(p).ok())
        .unwrap_or_else(|| path.to_path_buf());

    debug!(bytes = content.len(), resolved = %resolved, "read input file");
    Ok(LoadedSource {
        content: normalize_newlines(&content),
        source: SourceInfo::File { path: resolved },
    })
}

/// Fetch a page, following redirects and streaming the body under the limit.
#[cfg(feature = "fetch")]
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_url(url: &str, options: &LoadOptions) -> SourceResult<LoadedSource> {
    use std::time::Duration;

    let fetch_error = |reason: String| SourceError::Fetch {
        url: url.to_string(),
        reason,
    };

    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_millis(options.timeout_ms))
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()
        .map_err(|e| fetch_error(e.to_string()))?;

    let mut response = client
        .get(url)
        .send()
        .await
        .map_err(|e| fetch_error(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(fetch_error(format!("HTTP {status}")));
    }
    let final_url = response.url().to_string();

    if let Some(declared) = response.content_length() {
        let declared = usize::try_from(declared).unwrap_or(usize::MAX);
        check_size(&final_url, declared, options.max_bytes)?;
    }

    let mut body = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| fetch_error(e.to_string()))?
    {
        body.extend_from_slice(&chunk);
        check_size(&final_url, body.len(), options.max_bytes)?;
    }

    debug!(bytes = body.len(), final_url = %final_url, "fetched page");
    Ok(LoadedSource {
        content: normalize_newlines(&String::from_utf8_lossy(&body)),
        source: SourceInfo::Url { url: final_url },
    })
}

/// Without network support every URL target fails.
#[cfg(not(feature = "fetch"))]
pub async fn fetch_url(_url: &str, _options: &LoadOptions) -> SourceResult<LoadedSource> {
    Err(SourceError::FetchUnsupported)
}

/// Load any target.
pub async fn load_target(target: &Target, options: &LoadOptions) -> SourceResult<LoadedSource> {
    match target {
        Target::Html { html, .. } => load_inline(html, SourceInfo::Html, options.max_bytes),
        Target::File { path } => load_file(Utf8Path::new(path), options.max_bytes),
        Target::Url { url } => fetch_url(url, options).await,
    }
}

/// Load a target from synchronous code, starting a runtime only for URLs.
pub fn load_target_blocking(
    target: &Target,
    options: &LoadOptions,
) -> anyhow::Result<LoadedSource> {
    match target {
        Target::Html { html, .. } => Ok(load_inline(html, SourceInfo::Html, options.max_bytes)?),
        Target::File { path } => Ok(load_file(Utf8Path::new(path), options.max_bytes)?),
        Target::Url { url } => fetch_blocking(url, options),
    }
}

#[cfg(feature = "fetch")]
fn fetch_blocking(url: &str, options: &LoadOptions) -> anyhow::Result<LoadedSource> {
    use anyhow::Context;

    let rt =
        tokio::runtime::Runtime::new().context("failed to create async runtime for fetch")?;
    Ok(rt.block_on(fetch_url(url, options))?)
}

#[cfg(not(feature = "fetch"))]
fn fetch_blocking(_url: &str, _options: &LoadOptions) -> anyhow::Result<LoadedSource> {
    Err(SourceError::FetchUnsupported.into())
}
