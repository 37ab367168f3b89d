//! Logging and tracing setup.
//!
//! Human-readable events go to stderr. When a log file or directory is
//! configured, the same events are also written as JSON lines. Stdout stays
//! clean for command output and the MCP stdio transport.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Explicit log file path.
pub const LOG_PATH_ENV: &str = "UX_LINT_LOG_PATH";

/// Log directory; the file inside it is named [`LOG_FILE_NAME`].
pub const LOG_DIR_ENV: &str = "UX_LINT_LOG_DIR";

/// File name used inside a log directory.
pub const LOG_FILE_NAME: &str = "ux-lint.jsonl";

/// Where JSONL logs go, if anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Full path of the JSONL log file. `None` disables file logging.
    pub log_file: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Resolve the log file from the environment, falling back to the
    /// configured log directory.
    ///
    /// Precedence: `UX_LINT_LOG_PATH`, then `UX_LINT_LOG_DIR`, then
    /// `config_log_dir`.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::resolve(
            std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
            config_log_dir,
        )
    }

    fn resolve(
        log_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
    ) -> Self {
        let log_file = log_path
            .filter(|path| !path.as_os_str().is_empty())
            .or_else(|| {
                env_dir
                    .filter(|dir| !dir.as_os_str().is_empty())
                    .or(config_dir)
                    .map(|dir| dir.join(LOG_FILE_NAME))
            });
        Self { log_file }
    }
}

/// Build the event filter.
///
/// `RUST_LOG` wins when set. Otherwise `--quiet` selects `error`, each
/// `--verbose` raises the level one step, and the configured level is the
/// baseline.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(level_directive(quiet, verbose, config_level))
}

/// Levels from quietest to noisiest.
const LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

fn level_directive(quiet: bool, verbose: u8, config_level: &str) -> &'static str {
    if quiet {
        return "error";
    }
    let baseline = LEVELS
        .iter()
        .position(|level| *level == config_level)
        .unwrap_or(2);
    let raised = baseline.saturating_add(usize::from(verbose));
    LEVELS[raised.min(LEVELS.len() - 1)]
}

/// Install the global subscriber.
///
/// Keep the returned guard alive for the life of the process so buffered file
/// output is flushed on exit.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match &config.log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), PathBuf::from);
            fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let file_name = path
                .file_name()
                .map_or_else(|| LOG_FILE_NAME.into(), ToOwned::to_owned);
            let appender = tracing_appender::rolling::never(&dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}
