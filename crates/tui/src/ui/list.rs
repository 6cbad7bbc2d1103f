//! Register screen rendering.
//!
//! Layout, top to bottom: summary cards, search bar, filter bar, record
//! table, footer. Toasts are drawn last, over everything else.

use grc_client::{Resource, ResourceKind};
use grc_listview::page_bar;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::app::{App, Focus};
use crate::ui::theme::{Theme, spinner_char};
use crate::ui::toast::render_toasts;
use crate::ui::{FOOTER_HEIGHT, HEADER_HEIGHT};

/// Categories listed per summary card.
const CARD_ROWS: usize = 4;

const KEY_HINTS: &str =
    " / search  1-9 filter  c clear  ←/→ page  +/- size  r refresh  d delete  q quit ";

pub fn render<T: Resource>(f: &mut Frame, app: &App<T>) {
    let theme = app.theme();
    let [header, search, filters, table, footer] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(FOOTER_HEIGHT),
    ])
    .areas(f.area());

    render_summary_cards(f, header, app, theme);
    render_search_bar(f, search, app, theme);
    render_filter_bar(f, filters, app, theme);
    render_table(f, table, app, theme);
    render_footer(f, footer, app, theme);
    render_toasts(f, &app.toasts, theme);
}

fn field_label(kind: ResourceKind, field: &str) -> String {
    kind.filter_field(field)
        .map(|f| f.label.to_string())
        .unwrap_or_else(|| field.replace('_', " "))
}

fn render_summary_cards<T: Resource>(f: &mut Frame, area: Rect, app: &App<T>, theme: &Theme) {
    let kind = app.kind();
    let summary = app.list().summary(kind.summary_fields());

    let mut constraints = vec![Constraint::Fill(1)];
    constraints.extend(summary.breakdowns.iter().map(|_| Constraint::Fill(1)));
    let cards = Layout::horizontal(constraints).split(area);

    let mut title = format!(" {} ", kind.title());
    if app.loading {
        title.push_str(&format!("{} ", spinner_char(app.spinner_frame)));
    }
    let total = Paragraph::new(vec![
        Line::styled(format!("{} {}", summary.total, kind.noun()), theme.title()),
        Line::styled(
            format!("{} match", app.list().filtered_len()),
            theme.text(),
        ),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border())
            .title(Span::styled(title, theme.title())),
    );
    f.render_widget(total, cards[0]);

    for (breakdown, card) in summary.breakdowns.iter().zip(cards.iter().skip(1)) {
        let lines: Vec<Line> = if breakdown.counts.is_empty() {
            vec![Line::styled("No data", theme.muted())]
        } else {
            breakdown
                .counts
                .iter()
                .take(CARD_ROWS)
                .map(|(category, count)| {
                    Line::from(vec![
                        Span::styled(format!("{category} "), theme.text()),
                        Span::styled(
                            format!("{count} ({})", summary.percentage(*count)),
                            theme.muted(),
                        ),
                    ])
                })
                .collect()
        };

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border())
                .title(format!(" {} ", field_label(kind, &breakdown.field))),
        );
        f.render_widget(paragraph, *card);
    }
}

fn render_search_bar<T: Resource>(f: &mut Frame, area: Rect, app: &App<T>, theme: &Theme) {
    let focused = app.focus() == Focus::Search;
    let content = if focused {
        Line::from(vec![
            Span::styled(app.search_input(), theme.text()),
            Span::styled("▏", theme.title()),
        ])
    } else if app.search_input().is_empty() {
        Line::styled(
            format!(
                "Press / to search {}",
                app.kind().search_fields().join(", ")
            ),
            theme.muted(),
        )
    } else {
        Line::styled(app.search_input(), theme.text())
    };

    let border = if focused {
        theme.border_focused()
    } else {
        theme.border()
    };
    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Search "),
    );
    f.render_widget(paragraph, area);
}

fn render_filter_bar<T: Resource>(f: &mut Frame, area: Rect, app: &App<T>, theme: &Theme) {
    let mut spans = vec![Span::raw(" ")];
    for (index, field) in app.kind().filter_fields().iter().take(9).enumerate() {
        let value = app.list().filters().get(field.field);
        let style = if value.is_all() {
            theme.muted()
        } else {
            theme.active_filter()
        };
        spans.push(Span::styled(
            format!("{} {}: ", index + 1, field.label),
            theme.text(),
        ));
        spans.push(Span::styled(value.to_string(), style));
        spans.push(Span::raw("   "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_table<T: Resource>(f: &mut Frame, area: Rect, app: &App<T>, theme: &Theme) {
    let kind = app.kind();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border());
    let page = app.list().visible();

    if page.items.is_empty() {
        let message = if app.loading {
            format!("Loading {}...", kind.noun())
        } else {
            format!("No {} found", kind.noun())
        };
        let paragraph = Paragraph::new(Line::styled(message, theme.muted()))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let columns = kind.columns();
    let header = Row::new(columns.iter().map(|c| Cell::from(c.header))).style(theme.table_header());
    let rows = page.items.iter().map(|record| {
        Row::new(columns.iter().map(|c| {
            Cell::from(
                record
                    .field(c.field)
                    .map_or_else(|| "N/A".to_string(), |v| v.to_string()),
            )
        }))
    });
    let widths = columns.iter().map(|c| Constraint::Fill(c.width));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(theme.highlight());
    let mut state = TableState::default().with_selected(Some(app.selected()));
    f.render_stateful_widget(table, area, &mut state);
}

fn render_footer<T: Resource>(f: &mut Frame, area: Rect, app: &App<T>, theme: &Theme) {
    let kind = app.kind();
    let line = match app.pending_delete() {
        Some(key) => Line::styled(
            format!(
                "Delete '{key}' from {}? Press y to confirm, any other key to cancel",
                kind.noun()
            ),
            theme.warning(),
        ),
        None => {
            let list = app.list();
            let page = list.visible();
            let bar = page_bar(&list.page_links(), list.current_page());
            Line::from(vec![
                Span::styled(page.range_label(kind.noun()), theme.text()),
                Span::styled("  │  ", theme.muted()),
                Span::styled(bar, theme.title()),
                Span::styled("  │  ", theme.muted()),
                Span::styled(format!("{} per page", list.page_size()), theme.text()),
            ])
        }
    };

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border())
            .title_bottom(Line::styled(KEY_HINTS, theme.muted())),
    );
    f.render_widget(paragraph, area);
}
