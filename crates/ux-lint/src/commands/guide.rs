//! Guide command: print a built-in UX reference.

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use ux_lint_core::guides::{self, Guide, GuideId};

/// Arguments for the `guide` subcommand.
#[derive(Args, Debug, Default)]
pub struct GuideArgs {
    /// Guide to print. Lists all guides when omitted.
    #[arg(value_enum)]
    pub name: Option<GuideId>,
}

#[derive(Serialize)]
struct GuideSummary {
    name: &'static str,
    uri: &'static str,
    title: &'static str,
    description: &'static str,
}

impl From<&Guide> for GuideSummary {
    fn from(guide: &Guide) -> Self {
        Self {
            name: guide.name,
            uri: guide.uri,
            title: guide.title,
            description: guide.description,
        }
    }
}

/// Print one guide, or list them all.
#[instrument(name = "cmd_guide", skip_all)]
pub fn cmd_guide(args: GuideArgs, global_json: bool) -> anyhow::Result<()> {
    debug!(name = ?args.name, "executing guide command");

    match args.name {
        Some(id) => {
            let guide = guides::guide(id);
            if global_json {
                println!("{}", serde_json::to_string_pretty(guide)?);
            } else {
                println!("{}", guide.text);
            }
        }
        None if global_json => {
            let list: Vec<GuideSummary> = guides::all_guides().iter().map(Into::into).collect();
            println!("{}", serde_json::to_string_pretty(&list)?);
        }
        None => {
            for guide in guides::all_guides() {
                println!("{}  {}", guide.name.bold(), guide.uri.dimmed());
                println!("  {}", guide.description);
            }
        }
    }
    Ok(())
}
