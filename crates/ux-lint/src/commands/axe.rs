//! Axe command: summarize accessibility engine results.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use tracing::{debug, instrument};

use ux_lint_core::Config;
use ux_lint_core::audit::AuditOptions;

use super::print_report;
use crate::limits;
use crate::report;
use crate::source::load_file;

/// Arguments for the `axe` subcommand.
#[derive(Args, Debug)]
pub struct AxeArgs {
    /// JSON results written by an axe-style engine.
    pub results: Utf8PathBuf,

    /// Violations kept, in engine order (1-200).
    #[arg(long, value_name = "N", value_parser = limits::parse_max_violations)]
    pub max_violations: Option<usize>,

    /// Nodes kept per violation (1-20).
    #[arg(long, value_name = "N", value_parser = limits::parse_max_nodes)]
    pub max_nodes: Option<usize>,
}

/// Normalize and summarize accessibility results.
#[instrument(name = "cmd_axe", skip_all, fields(results = %args.results))]
pub fn cmd_axe(args: AxeArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let defaults = AuditOptions::default();
    let options = AuditOptions {
        max_violations: args.max_violations.unwrap_or(defaults.max_violations),
        max_nodes_per_violation: args.max_nodes.unwrap_or(defaults.max_nodes_per_violation),
    };
    debug!(?options, "executing axe command");

    let loaded = load_file(&args.results, config.input_limit())?;
    let report = report::axe(loaded, &options)
        .with_context(|| format!("failed to read results from {}", args.results))?;
    print_report(&report, global_json)
}
