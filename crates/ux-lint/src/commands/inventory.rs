//! Inventory command: headings, links, buttons, images, forms and quick issues.

use anyhow::bail;
use clap::Args;
use tracing::{debug, instrument};

use ux_lint_core::{Config, InventoryOptions, Severity};

use super::{LoadArgs, TargetArgs, load_with_progress, print_report};
use crate::limits;
use crate::report;

/// Arguments for the `inventory` subcommand.
#[derive(Args, Debug)]
pub struct InventoryArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    #[command(flatten)]
    pub load: LoadArgs,

    /// Elements kept per category (10-500).
    #[arg(long, value_name = "N", value_parser = limits::parse_max_elements)]
    pub max_elements: Option<usize>,

    /// Exit with an error when an issue at or above this severity is found.
    #[arg(long, value_enum, value_name = "SEVERITY")]
    pub fail_on: Option<Severity>,
}

/// Extract the UI inventory of a page.
#[instrument(name = "cmd_inventory", skip_all)]
pub fn cmd_inventory(args: InventoryArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let Some(target) = args.target.target() else {
        bail!("no input given; pass a FILE, --url or --html");
    };
    let options = InventoryOptions {
        max_elements_per_category: args
            .max_elements
            .unwrap_or_else(|| config.inventory_options().max_elements_per_category),
    };
    debug!(?options, fail_on = ?args.fail_on, "executing inventory command");

    let loaded = load_with_progress(&target, &args.load.load_options(config))?;
    let label = loaded.source.label();
    let report = report::inventory(loaded, &options);
    print_report(&report, global_json)?;

    if let Some(threshold) = args.fail_on {
        let failing = report
            .result
            .issues
            .iter()
            .filter(|issue| issue.severity >= threshold)
            .count();
        if failing > 0 {
            bail!("{label}: {failing} issue(s) at or above {threshold}");
        }
    }
    Ok(())
}
