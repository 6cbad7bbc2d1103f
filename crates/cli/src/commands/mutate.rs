//! Create, update and delete commands.
//!
//! Responsibilities:
//! - Read the JSON body from `--data` (inline or `@FILE`).
//! - Send the mutation, then refetch the register so the reported count
//!   reflects what the server now holds.
//!
//! Does NOT handle:
//! - Merging the mutation into a local record set. Local state is only ever
//!   replaced by a fetch.
//!
//! Invariants:
//! - A declined delete prompt sends no request and exits successfully.
//! - A failed refetch after a successful mutation is a warning, not an error.

use anyhow::{Context, Result, bail};
use grc_client::{GrcClient, ListQuery, MutationResponse, ResourceKind};
use serde_json::Value;
use tracing::{info, warn};

use crate::cancellation::cancellable;
use crate::commands::CommandContext;
use crate::formatters::MutationOutput;
use crate::interactive::confirm_delete;

/// Parse `--data`: a JSON object, or `@PATH` naming a file that holds one.
pub fn parse_body(raw: &str) -> Result<Value> {
    let text = match raw.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read record data from {path}"))?,
        None => raw.to_string(),
    };

    let value: Value = serde_json::from_str(&text).context("Record data is not valid JSON")?;
    if !value.is_object() {
        bail!("Record data must be a JSON object");
    }
    Ok(value)
}

pub async fn run_create(ctx: &CommandContext, kind: ResourceKind, data: &str) -> Result<()> {
    let body = parse_body(data)?;
    info!(register = %kind, "Creating record");

    let client = ctx.client()?;
    let spinner = ctx.spinner(format!("Creating record in {}", kind.noun()));
    let response = cancellable(&ctx.cancel, client.create(kind, &body)).await;
    spinner.finish();
    let response = response?;

    let fallback = format!("Record created in {}", kind.noun());
    finish(ctx, &client, kind, "create", None, response, &fallback).await
}

pub async fn run_update(
    ctx: &CommandContext,
    kind: ResourceKind,
    key: &str,
    data: &str,
) -> Result<()> {
    let body = parse_body(data)?;
    info!(register = %kind, key, "Updating record");

    let client = ctx.client()?;
    let spinner = ctx.spinner(format!("Updating {key}"));
    let response = cancellable(&ctx.cancel, client.update(kind, key, &body)).await;
    spinner.finish();
    let response = response?;

    let fallback = format!("Updated '{}' in {}", key, kind.noun());
    finish(ctx, &client, kind, "update", Some(key), response, &fallback).await
}

pub async fn run_delete(
    ctx: &CommandContext,
    kind: ResourceKind,
    key: &str,
    force: bool,
) -> Result<()> {
    if !force && !confirm_delete(key, kind.noun())? {
        return Ok(());
    }
    info!(register = %kind, key, "Deleting record");

    let client = ctx.client()?;
    let spinner = ctx.spinner(format!("Deleting {key}"));
    let response = cancellable(&ctx.cancel, client.delete(kind, key)).await;
    spinner.finish();
    let response = response?;

    let fallback = format!("Deleted '{}' from {}", key, kind.noun());
    finish(ctx, &client, kind, "delete", Some(key), response, &fallback).await
}

async fn finish(
    ctx: &CommandContext,
    client: &GrcClient,
    kind: ResourceKind,
    action: &str,
    key: Option<&str>,
    response: MutationResponse,
    fallback: &str,
) -> Result<()> {
    let record_count = refetch(ctx, client, kind).await?;
    let output = MutationOutput {
        resource: kind.name().to_string(),
        action: action.to_string(),
        key: key.map(str::to_string),
        message: response.summary(fallback),
        data: response.data,
        record_count,
    };
    ctx.emit(|formatter| formatter.format_mutation(&output))
}

/// Reload the register after a mutation. Only cancellation is fatal.
async fn refetch(
    ctx: &CommandContext,
    client: &GrcClient,
    kind: ResourceKind,
) -> Result<Option<usize>> {
    let spinner = ctx.spinner(format!("Refreshing {}", kind.noun()));
    let fetched = cancellable(&ctx.cancel, client.list_rows(kind, &ListQuery::new())).await;
    spinner.finish();

    match fetched {
        Ok(page) => Ok(Some(page.records.len())),
        Err(e) if crate::cancellation::is_cancelled_error(&e) => Err(e),
        Err(e) => {
            warn!(register = %kind, error = %e, "Refetch after mutation failed");
            eprintln!("Warning: could not reload {}: {:#}", kind.noun(), e);
            Ok(None)
        }
    }
}
