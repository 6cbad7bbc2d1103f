//! Links command implementation.
//!
//! Prints the windowed page-link sequence for a page position without
//! contacting the API.

use anyhow::{Result, bail};
use grc_listview::{generate_page_links, page_bar};

use crate::commands::CommandContext;
use crate::formatters::LinksOutput;

pub fn run(
    ctx: &CommandContext,
    current: usize,
    total: usize,
    max_visible: Option<usize>,
) -> Result<()> {
    let max_visible = max_visible.unwrap_or(ctx.config.list.max_visible_pages);
    let output = links_output(current, total, max_visible)?;
    ctx.emit(|formatter| formatter.format_links(&output))
}

fn links_output(current: usize, total: usize, max_visible: usize) -> Result<LinksOutput> {
    if total == 0 {
        bail!("--total must be at least 1");
    }
    if current == 0 || current > total {
        bail!("--current must be between 1 and {total}");
    }
    if max_visible == 0 {
        bail!("--max-visible must be at least 1");
    }

    let links = generate_page_links(current, total, max_visible);
    Ok(LinksOutput {
        current,
        total,
        max_visible,
        bar: page_bar(&links, current),
        links: links.iter().map(ToString::to_string).collect(),
    })
}
