//! Command implementations.

use std::time::Duration;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use indicatif::ProgressBar;
use serde::Serialize;

use ux_lint_core::Config;

use crate::limits;
use crate::report::{Markdown, Report};
use crate::source::{LoadOptions, LoadedSource, Target, load_target_blocking};

pub mod axe;
pub mod guide;
pub mod info;
pub mod inventory;
pub mod readability;
#[cfg(feature = "mcp")]
pub mod serve;

/// Markup to analyze: a file, a URL or an inline string.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct TargetArgs {
    /// HTML file to analyze.
    pub file: Option<Utf8PathBuf>,

    /// Fetch and analyze a page.
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Analyze markup passed on the command line.
    #[arg(long, value_name = "MARKUP")]
    pub html: Option<String>,
}

impl TargetArgs {
    /// The selected target, if any.
    pub fn target(&self) -> Option<Target> {
        if let Some(file) = &self.file {
            Some(Target::File {
                path: file.to_string(),
            })
        } else if let Some(url) = &self.url {
            Some(Target::Url { url: url.clone() })
        } else {
            self.html.as_ref().map(|html| Target::Html {
                html: html.clone(),
                base_url: None,
            })
        }
    }
}

/// Limits for loading input, overriding configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct LoadArgs {
    /// Reject input larger than this many bytes.
    #[arg(long, value_name = "BYTES", value_parser = limits::parse_max_bytes)]
    pub max_bytes: Option<usize>,

    /// Give up on a fetch after this many milliseconds.
    #[arg(long, value_name = "MS", value_parser = limits::parse_timeout_ms)]
    pub timeout_ms: Option<usize>,
}

impl LoadArgs {
    /// Effective load options.
    ///
    /// An explicit `--max-bytes` applies even when the configured limit is
    /// disabled.
    pub fn load_options(&self, config: &Config) -> LoadOptions {
        LoadOptions {
            max_bytes: self.max_bytes.or_else(|| config.input_limit()),
            timeout_ms: self
                .timeout_ms
                .map_or_else(|| config.fetch_timeout_ms(), |ms| ms as u64),
        }
    }
}

/// Load a target, showing a spinner on stderr while a URL is fetched.
pub fn load_with_progress(target: &Target, options: &LoadOptions) -> anyhow::Result<LoadedSource> {
    let spinner = match target {
        Target::Url { url } => {
            let spinner = ProgressBar::new_spinner();
            spinner.set_message(format!("fetching {url}"));
            spinner.enable_steady_tick(Duration::from_millis(100));
            Some(spinner)
        }
        _ => None,
    };
    let loaded = load_target_blocking(target, options);
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    loaded.context("failed to load input")
}

/// Print a report as JSON or markdown.
pub fn print_report<T: Markdown + Serialize>(report: &Report<T>, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report.markdown());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_target_wins() {
        let args = TargetArgs {
            file: Some(Utf8PathBuf::from("page.html")),
            url: None,
            html: None,
        };
        assert_eq!(
            args.target(),
            Some(Target::File {
                path: "page.html".to_string()
            })
        );
    }

    #[test]
    fn inline_markup_target() {
        let args = TargetArgs {
            file: None,
            url: None,
            html: Some("<h1>x</h1>".to_string()),
        };
        assert!(matches!(args.target(), Some(Target::Html { .. })));
    }

    #[test]
    fn load_options_fall_back_to_config() {
        let config = Config {
            max_input_bytes: Some(50_000),
            fetch_timeout_ms: Some(2_000),
            ..Config::default()
        };
        let options = LoadArgs::default().load_options(&config);
        assert_eq!(options.max_bytes, Some(50_000));
        assert_eq!(options.timeout_ms, 2_000);

        let args = LoadArgs {
            max_bytes: Some(20_000),
            timeout_ms: Some(500),
        };
        let options = args.load_options(&config);
        assert_eq!(options.max_bytes, Some(20_000));
        assert_eq!(options.timeout_ms, 500);
    }

    #[test]
    fn disabled_limit_stays_disabled_without_flag() {
        let config = Config {
            disable_input_limit: true,
            ..Config::default()
        };
        assert_eq!(LoadArgs::default().load_options(&config).max_bytes, None);
    }
}
