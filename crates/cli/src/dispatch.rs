//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the appropriate command handlers.
//! - Build the [`CommandContext`] shared by every command.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Configuration loading (see `main()`).
//!
//! Invariants:
//! - All commands receive the process-wide cancellation token.
//! - An invalid `--output` value fails before any request is sent.

use anyhow::Result;
use tokio_util::sync::CancellationToken;

use crate::args::{Cli, Commands};
use crate::commands::{self, CommandContext};
use crate::commands::list::ListArgs;
use crate::commands::summary::SummaryArgs;

/// Dispatch CLI commands to their respective handlers.
pub(crate) async fn run_command(
    cli: Cli,
    config: grc_config::Config,
    cancel_token: &CancellationToken,
) -> Result<()> {
    let ctx = CommandContext {
        config,
        format: cli.output.parse()?,
        output_file: cli.output_file,
        quiet: cli.quiet,
        metrics: cli.metrics_bind.is_some(),
        cancel: cancel_token.clone(),
    };

    match cli.command {
        Commands::List {
            resource,
            search,
            filters,
            page,
            page_size,
            server_side,
        } => {
            let args = ListArgs {
                kind: resource,
                search: search.unwrap_or_default(),
                filters,
                page,
                page_size,
                server_side,
            };
            commands::list::run(&ctx, args).await?;
        }
        Commands::Summary {
            resource,
            by,
            as_of,
        } => {
            let args = SummaryArgs {
                kind: resource,
                by,
                as_of,
            };
            commands::summary::run(&ctx, args).await?;
        }
        Commands::Links {
            current,
            total,
            max_visible,
        } => {
            commands::links::run(&ctx, current, total, max_visible)?;
        }
        Commands::Create { resource, data } => {
            commands::mutate::run_create(&ctx, resource, &data).await?;
        }
        Commands::Update { resource, id, data } => {
            commands::mutate::run_update(&ctx, resource, &id, &data).await?;
        }
        Commands::Delete {
            resource,
            id,
            force,
        } => {
            commands::mutate::run_delete(&ctx, resource, &id, force).await?;
        }
    }

    Ok(())
}
