//! Library interface for the `ux-lint` CLI.
//!
//! This crate exposes the CLI's argument parser and command structure as a library,
//! primarily for documentation generation and testing. The actual entry point is
//! in `main.rs`.
//!
//! # Structure
//!
//! - [`Cli`] - The root argument parser (clap derive)
//! - [`Commands`] - Available subcommands
//! - [`commands`] - Command implementations
//! - [`source`] - Loading markup from strings, files and URLs
//! - [`report`] - Results paired with their source
//! - [`limits`] - Accepted option ranges
//! - `server` - MCP server (feature `mcp`)
//!
//! # Documentation Generation
//!
//! The [`command()`] function returns the clap `Command` for generating man pages
//! and shell completions.

pub mod commands;
pub mod limits;
pub mod report;
pub mod source;

#[cfg(feature = "mcp")]
pub mod server;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Color output preference.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect terminal capabilities automatically.
    #[default]
    Auto,
    /// Always emit colors.
    Always,
    /// Never emit colors.
    Never,
}

impl ColorChoice {
    /// Configure global color output based on this choice.
    ///
    /// Call this once at startup to set the color mode.
    pub fn apply(self) {
        match self {
            Self::Auto => {} // owo-colors auto-detects by default
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG                              Log filter (e.g., debug, ux_lint=trace)
    UX_LINT_LOG_PATH                      Explicit log file path
    UX_LINT_LOG_DIR                       Log directory
    UX_LINT_MAX_INPUT_BYTES               Input size limit in bytes
    UX_LINT_FETCH_TIMEOUT_MS              URL fetch timeout
    UX_LINT_MAX_ELEMENTS_PER_CATEGORY     Inventory cap per category
    UX_LINT_LONG_SENTENCE_MAX_WORDS       Long-sentence threshold
    UX_LINT_MAX_CHARS                     Body text cap for readability
";

/// Command-line interface definition for ux-lint.
#[derive(Parser)]
#[command(name = "ux-lint")]
#[command(about = "UI inventory, readability and accessibility summaries for web pages", long_about = None)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print only the version number (for scripting)
    #[arg(long)]
    pub version_only: bool,

    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Only print errors (suppresses warnings/info)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More detail (repeatable; e.g. -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available subcommands for the CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// Inventory headings, links, buttons, images and forms, and flag quick UX issues
    Inventory(commands::inventory::InventoryArgs),

    /// Score readability (Flesch) and list long sentences
    Readability(commands::readability::ReadabilityArgs),

    /// Summarize accessibility engine (axe) results
    Axe(commands::axe::AxeArgs),

    /// Print a UX reference guide
    Guide(commands::guide::GuideArgs),

    /// Show package information
    Info(commands::info::InfoArgs),

    /// Start MCP (Model Context Protocol) server on stdio
    #[cfg(feature = "mcp")]
    Serve(commands::serve::ServeArgs),
}

/// Returns the clap command for documentation generation
pub fn command() -> clap::Command {
    Cli::command()
}
