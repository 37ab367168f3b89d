//! Serve command: MCP server on stdio.

use anyhow::Context;
use clap::Args;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing::{info, instrument};

use ux_lint_core::Config;

use crate::server::UxServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

/// Run the MCP server until the client disconnects.
///
/// Configured limits and analysis defaults apply to every tool call; tool
/// parameters override them per call.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(_args: ServeArgs, config: Config) -> anyhow::Result<()> {
    info!(
        input_limit = ?config.input_limit(),
        fetch = cfg!(feature = "fetch"),
        "starting MCP server on stdio"
    );

    let service = UxServer::new(config)
        .serve(stdio())
        .await
        .context("failed to start MCP server")?;
    let reason = service
        .waiting()
        .await
        .context("MCP server stopped unexpectedly")?;

    info!(?reason, "MCP server stopped");
    Ok(())
}
