//! Readability command: Flesch scores, findings and long sentences.

use anyhow::bail;
use camino::Utf8PathBuf;
use clap::Args;
use tracing::{debug, instrument};

use ux_lint_core::{Config, ReadabilityOptions, Severity};

use super::{LoadArgs, load_with_progress, print_report};
use crate::limits;
use crate::report;
use crate::source::{SourceInfo, Target, load_inline};

/// Arguments for the `readability` subcommand.
#[derive(Args, Debug)]
pub struct ReadabilityArgs {
    #[command(flatten)]
    pub input: ReadabilityInput,

    #[command(flatten)]
    pub load: LoadArgs,

    /// Sentences with more words than this are reported (10-60).
    #[arg(long, value_name = "N", value_parser = limits::parse_long_sentence_max_words)]
    pub long_sentence_max_words: Option<usize>,

    /// Characters of body text taken from markup (100-200000).
    #[arg(long, value_name = "N", value_parser = limits::parse_max_chars)]
    pub max_chars: Option<usize>,

    /// Exit with an error when a finding at or above this severity is reported.
    #[arg(long, value_enum, value_name = "SEVERITY")]
    pub fail_on: Option<Severity>,
}

/// Text to score: markup from a file, URL or string, or plain text.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct ReadabilityInput {
    /// HTML file; its body text is scored.
    pub file: Option<Utf8PathBuf>,

    /// Fetch a page and score its body text.
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Score the body text of markup passed on the command line.
    #[arg(long, value_name = "MARKUP")]
    pub html: Option<String>,

    /// Score plain text passed on the command line.
    #[arg(long, value_name = "TEXT")]
    pub text: Option<String>,
}

impl ReadabilityInput {
    fn target(&self) -> Option<Target> {
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

/// Score the readability of text or of a page's body text.
#[instrument(name = "cmd_readability", skip_all)]
pub fn cmd_readability(
    args: ReadabilityArgs,
    global_json: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let options = ReadabilityOptions {
        long_sentence_max_words: args
            .long_sentence_max_words
            .unwrap_or_else(|| config.readability_options().long_sentence_max_words),
    };
    let max_chars = args.max_chars.unwrap_or_else(|| config.max_chars());
    let load_options = args.load.load_options(config);
    debug!(?options, max_chars, "executing readability command");

    let report = if let Some(text) = &args.input.text {
        limits::require_text("--text", text).map_err(anyhow::Error::msg)?;
        let loaded = load_inline(text, SourceInfo::Text, load_options.max_bytes)?;
        report::readability_of_text(&loaded.content, &options)
    } else {
        let Some(target) = args.input.target() else {
            bail!("no input given; pass a FILE, --url, --html or --text");
        };
        let loaded = load_with_progress(&target, &load_options)?;
        report::readability_of_markup(loaded, max_chars, &options)
    };
    print_report(&report, global_json)?;

    if let Some(threshold) = args.fail_on {
        let failing = report
            .result
            .findings
            .iter()
            .filter(|finding| finding.severity >= threshold)
            .count();
        if failing > 0 {
            bail!(
                "{}: {failing} finding(s) at or above {threshold}",
                report.source.label()
            );
        }
    }
    Ok(())
}
