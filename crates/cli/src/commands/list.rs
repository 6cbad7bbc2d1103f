//! List command implementation.
//!
//! Responsibilities:
//! - Fetch a register, run it through a [`ListViewState`] and emit the visible page.
//! - Validate `--filter` fields against the register's filter set.
//!
//! Does NOT handle:
//! - Filtering or pagination rules (see `grc-listview`).
//!
//! Invariants:
//! - Search and filters go to the API and are re-applied locally, so a server
//!   that ignores them still yields a correctly filtered page.
//! - With `--server-side`, a pagination block in the response decides the page,
//!   range and links; without one the returned rows are paged locally.

use std::collections::BTreeMap;

use anyhow::{Result, bail};
use grc_client::{ListQuery, Resource, ResourceKind, ServerPagination, with_resource};
use grc_listview::{
    FilterSpec, FilterValue, Page, Record, ListViewState, generate_page_links, page_bar,
};
use tracing::info;

use crate::cancellation::cancellable;
use crate::commands::CommandContext;
use crate::formatters::{DEFAULT_MISSING_VALUE, ListOutput, TableView};

/// Parsed `list` arguments.
#[derive(Debug, Clone)]
pub struct ListArgs {
    pub kind: ResourceKind,
    pub search: String,
    pub filters: Vec<(String, String)>,
    pub page: usize,
    pub page_size: Option<usize>,
    pub server_side: bool,
}

pub async fn run(ctx: &CommandContext, args: ListArgs) -> Result<()> {
    with_resource!(args.kind, |T| run_typed::<T>(ctx, args).await)
}

/// Turn `FIELD=VALUE` pairs into a [`FilterSpec`].
///
/// Later pairs for the same field win. `All` or an empty value clears the field.
pub fn build_filters(kind: ResourceKind, pairs: &[(String, String)]) -> Result<FilterSpec> {
    let mut filters = FilterSpec::new();
    for (field, value) in pairs {
        if kind.filter_field(field).is_none() {
            let valid: Vec<&str> = kind.filter_fields().iter().map(|f| f.field).collect();
            bail!(
                "Unknown filter '{}' for {}. Valid fields: {}",
                field,
                kind,
                valid.join(", ")
            );
        }
        filters.set(field.clone(), FilterValue::parse(value));
    }
    Ok(filters)
}

async fn run_typed<T: Resource>(ctx: &CommandContext, args: ListArgs) -> Result<()> {
    let kind = T::KIND;
    let filters = build_filters(kind, &args.filters)?;
    let page_size = args.page_size.unwrap_or(ctx.config.list.page_size);
    if page_size == 0 {
        bail!("Page size must be at least 1");
    }

    let mut query = ListQuery::for_view(kind, &args.search, &filters);
    if args.server_side {
        query = query.with_page(args.page.max(1), page_size);
    }

    info!(
        register = %kind,
        page = args.page,
        page_size,
        server_side = args.server_side,
        "Listing records"
    );

    let client = ctx.client()?;
    let spinner = ctx.spinner(format!("Fetching {}", kind.noun()));
    let fetched = cancellable(&ctx.cancel, client.list::<T>(&query)).await;
    spinner.finish();
    let fetched = fetched?;

    let mut state = ListViewState::new(kind.search_spec(), page_size)
        .with_max_visible_pages(ctx.config.list.max_visible_pages)
        .with_filters(filters)
        .with_query(args.search.clone());
    state.replace_records(fetched.records);
    state.select_page(args.page);

    let page = match fetched.pagination.filter(|_| args.server_side) {
        Some(server) => server_page(state.filtered(), server),
        None => state.visible(),
    };
    let links = generate_page_links(
        page.current_page,
        page.total_pages,
        ctx.config.list.max_visible_pages,
    );

    let output = ListOutput {
        resource: kind.name().to_string(),
        search: args.search.clone(),
        filters: state
            .filters()
            .active()
            .map(|(field, value)| (field.to_string(), value.to_string()))
            .collect::<BTreeMap<_, _>>(),
        page: page.current_page,
        page_size,
        total_pages: page.total_pages,
        total_items: page.total_items,
        range: page.range_label(kind.noun()),
        links: links.iter().map(ToString::to_string).collect(),
        records: page
            .items
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?,
        skipped: fetched.skipped,
        title: kind.title().to_string(),
        page_bar: page_bar(&links, page.current_page),
        table: table_view(kind, &page.items),
    };

    ctx.emit(|formatter| formatter.format_list(&output))
}

/// Page bounds reported by the server for rows it already paginated.
fn server_page<T>(items: Vec<&T>, server: ServerPagination) -> Page<Vec<&T>> {
    let current_page = server.page.max(1);
    let start_index = (current_page - 1).saturating_mul(server.limit);
    let end_index = start_index + items.len();
    Page {
        items,
        current_page,
        total_pages: server.total_pages.max(1),
        start_index,
        end_index,
        total_items: server.total.max(end_index),
    }
}

fn table_view<T: Record>(kind: ResourceKind, records: &[&T]) -> TableView {
    let columns = kind.columns();
    TableView {
        headers: columns.iter().map(|c| c.header.to_string()).collect(),
        fields: columns.iter().map(|c| c.field.to_string()).collect(),
        rows: records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|c| {
                        record
                            .field(c.field)
                            .map_or_else(|| DEFAULT_MISSING_VALUE.to_string(), |v| v.to_string())
                    })
                    .collect()
            })
            .collect(),
    }
}
