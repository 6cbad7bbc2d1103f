//! Render tests for the register screen using ratatui's `TestBackend`.

mod helpers;

use crossterm::event::KeyCode;
use grc_client::Asset;
use grc_config::ListConfig;
use grc_tui::{Action, App, Toast};
use helpers::*;
use ratatui::{Terminal, backend::TestBackend};

/// Render `app` and return the screen as one string per row.
fn render_to_lines(app: &App<Asset>, width: u16, height: u16) -> Vec<String> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("Failed to create terminal");
    terminal.draw(|f| app.render(f)).expect("Failed to render");

    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect::<String>()
        })
        .collect()
}

fn screen_contains(lines: &[String], needle: &str) -> bool {
    lines.iter().any(|line| line.contains(needle))
}

#[test]
fn test_render_loaded_register() {
    let app = loaded_app(25);
    let lines = render_to_lines(&app, 140, 30);

    assert!(screen_contains(&lines, "Asset Inventory"));
    assert!(screen_contains(&lines, "25 assets"));
    assert!(screen_contains(&lines, "Asset ID"));
    assert!(screen_contains(&lines, "AST-0001"));
    assert!(screen_contains(&lines, "Showing 1 to 10 of 25 assets"));
    assert!(screen_contains(&lines, "[1] 2 3"));
    assert!(screen_contains(&lines, "10 per page"));
}

#[test]
fn test_render_summary_cards_show_percentages() {
    let app = loaded_app(4);
    let lines = render_to_lines(&app, 140, 30);

    assert!(screen_contains(&lines, "Classification"));
    assert!(screen_contains(&lines, "Confidential 2 (50%)"));
    assert!(screen_contains(&lines, "Public 2 (50%)"));
}

#[test]
fn test_render_empty_register() {
    let app = loaded_app(0);
    let lines = render_to_lines(&app, 140, 30);

    assert!(screen_contains(&lines, "No assets found"));
    assert!(screen_contains(&lines, "[1]"));
}

#[test]
fn test_render_loading_state() {
    let mut app = App::<Asset>::new(ListConfig::default());
    app.refresh();
    let lines = render_to_lines(&app, 140, 30);

    assert!(screen_contains(&lines, "Loading assets..."));
}

#[test]
fn test_render_search_and_filters() {
    let mut app = loaded_app(6);
    app.handle_input(key('2'));
    app.handle_input(key('/'));
    type_text(&mut app, "payroll");
    let lines = render_to_lines(&app, 140, 30);

    assert!(screen_contains(&lines, "payroll▏"));
    assert!(screen_contains(&lines, "2 Classification: Confidential"));
    assert!(screen_contains(&lines, "1 Type: All"));
    assert!(screen_contains(&lines, "Showing 1 to 3 of 3 assets"));
}

#[test]
fn test_render_delete_prompt_in_footer() {
    let mut app = loaded_app(3);
    app.handle_input(code(KeyCode::Down));
    app.handle_input(key('d'));
    let lines = render_to_lines(&app, 140, 30);

    assert!(screen_contains(
        &lines,
        "Delete '2' from assets? Press y to confirm"
    ));
}

#[test]
fn test_render_toast() {
    let mut app = loaded_app(3);
    app.toasts.push(Toast::error("Failed to load assets: timeout"));
    let lines = render_to_lines(&app, 140, 30);

    assert!(screen_contains(&lines, "ERR"));
    assert!(screen_contains(&lines, "Failed to load assets: timeout"));
}

#[test]
fn test_render_survives_tiny_terminal() {
    let mut app = loaded_app(12);
    app.update(Action::Resize(20, 8));
    render_to_lines(&app, 20, 8);
}
