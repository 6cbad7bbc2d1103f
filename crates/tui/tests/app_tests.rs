//! Unit tests for the register screen state machine and input handling.
//!
//! Tests cover:
//! - Fetch generations and stale response handling
//! - Debounced search and local filtering
//! - Page navigation, page size and filter cycling keys
//! - Delete confirmation and mutation follow-up

mod helpers;

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use grc_client::{Asset, ComplianceGap};
use grc_config::ListConfig;
use grc_tui::{Action, App, FetchedRecords, Focus, Toast, ToastLevel};
use helpers::*;

// ============================================================================
// Fetching
// ============================================================================

#[test]
fn test_refresh_bumps_generation_and_sends_view_query() {
    let mut app = App::<Asset>::new(ListConfig::default());
    assert_eq!(fetch_generation(Some(app.refresh())), 1);

    match app.refresh() {
        Action::FetchRecords { generation, query } => {
            assert_eq!(generation, 2);
            assert!(query.search.is_none());
            assert!(query.filters.is_empty());
            assert!(query.page.is_none());
        }
        _ => panic!("expected a fetch action"),
    }
    assert!(app.loading);
}

#[test]
fn test_stale_fetch_result_is_ignored() {
    let mut app = App::<Asset>::new(ListConfig::default());
    let first = fetch_generation(Some(app.refresh()));
    let second = fetch_generation(Some(app.refresh()));

    app.update(Action::RecordsLoaded {
        generation: first,
        result: Ok(FetchedRecords {
            records: assets(5),
            skipped: 0,
        }),
    });
    assert!(app.list().records().is_empty());
    assert!(app.loading, "an outdated response must not end loading");

    app.update(Action::RecordsLoaded {
        generation: second,
        result: Ok(FetchedRecords {
            records: assets(2),
            skipped: 0,
        }),
    });
    assert_eq!(app.list().records().len(), 2);
    assert!(!app.loading);
}

#[test]
fn test_fetch_error_empties_records_and_shows_toast() {
    let mut app = loaded_app(3);
    let generation = fetch_generation(Some(app.refresh()));

    app.update(Action::RecordsLoaded {
        generation,
        result: Err("API error (500): Internal Server Error".to_string()),
    });

    assert!(app.list().records().is_empty());
    assert_eq!(app.list().total_pages(), 1);
    let toast = app.toasts.last().expect("error toast");
    assert_eq!(toast.level, ToastLevel::Error);
    assert_eq!(
        toast.message,
        "Failed to load assets: API error (500): Internal Server Error"
    );
}

#[test]
fn test_skipped_rows_raise_warning() {
    let mut app = App::<Asset>::new(ListConfig::default());
    let generation = fetch_generation(Some(app.refresh()));
    app.update(Action::RecordsLoaded {
        generation,
        result: Ok(FetchedRecords {
            records: assets(2),
            skipped: 1,
        }),
    });

    let toast = app.toasts.last().expect("warning toast");
    assert_eq!(toast.level, ToastLevel::Warning);
    assert!(toast.message.contains("1 malformed record(s) skipped"));
}

#[test]
fn test_refresh_key() {
    let mut app = loaded_app(3);
    let before = app.generation();
    let generation = fetch_generation(app.handle_input(key('r')));
    assert_eq!(generation, before + 1);
}

// ============================================================================
// Search
// ============================================================================

#[test]
fn test_search_filters_locally_and_debounces_refetch() {
    let mut app = loaded_app(6);
    assert!(app.handle_input(key('/')).is_none());
    assert_eq!(app.focus(), Focus::Search);

    type_text(&mut app, "website");
    assert_eq!(app.search_input(), "website");
    assert_eq!(app.list().filtered_len(), 3);
    assert!(app.is_search_pending());

    let now = Instant::now();
    assert!(app.tick(now).is_none(), "fetch fired before the window elapsed");

    match app.tick(now + Duration::from_millis(400)) {
        Some(Action::FetchRecords { query, .. }) => {
            assert_eq!(query.search.as_deref(), Some("website"));
        }
        _ => panic!("expected a debounced fetch"),
    }
    assert!(!app.is_search_pending());
    assert!(app.tick(now + Duration::from_millis(800)).is_none());
}

#[test]
fn test_each_keystroke_restarts_debounce_window() {
    let mut app = loaded_app(6);
    app.handle_input(key('/'));
    type_text(&mut app, "pay");
    type_text(&mut app, "roll");

    // Only the final keystroke's window counts; one fetch in total
    let later = Instant::now() + Duration::from_millis(400);
    assert!(app.tick(later).is_some());
    assert!(app.tick(later + Duration::from_millis(400)).is_none());
}

#[test]
fn test_search_change_returns_to_first_page() {
    let mut app = loaded_app(30);
    app.handle_input(code(KeyCode::Right));
    app.handle_input(code(KeyCode::Right));
    assert_eq!(app.list().current_page(), 3);

    app.handle_input(key('/'));
    type_text(&mut app, "a");
    assert_eq!(app.list().current_page(), 1);
}

#[test]
fn test_enter_fetches_pending_search_immediately() {
    let mut app = loaded_app(4);
    app.handle_input(key('/'));
    type_text(&mut app, "payroll");

    match app.handle_input(code(KeyCode::Enter)) {
        Some(Action::FetchRecords { query, .. }) => {
            assert_eq!(query.search.as_deref(), Some("payroll"));
        }
        _ => panic!("expected an immediate fetch"),
    }
    assert_eq!(app.focus(), Focus::Table);
    assert!(app.tick(Instant::now() + Duration::from_secs(1)).is_none());
}

#[test]
fn test_fetch_sends_the_same_search_the_view_filters_with() {
    let mut app = loaded_app(4);
    app.handle_input(key('/'));
    type_text(&mut app, "payroll ");
    assert_eq!(app.list().query(), "payroll ");
    assert_eq!(app.list().filtered_len(), 2);

    match app.handle_input(code(KeyCode::Enter)) {
        Some(Action::FetchRecords { query, .. }) => {
            assert_eq!(query.search.as_deref(), Some(app.list().query()));
        }
        _ => panic!("expected an immediate fetch"),
    }
}

#[test]
fn test_escape_leaves_search_and_keeps_pending_fetch() {
    let mut app = loaded_app(4);
    app.handle_input(key('/'));
    type_text(&mut app, "web");

    assert!(app.handle_input(code(KeyCode::Esc)).is_none());
    assert_eq!(app.focus(), Focus::Table);
    assert!(app.is_search_pending());
}

#[test]
fn test_backspace_to_empty_restores_full_view() {
    let mut app = loaded_app(4);
    app.handle_input(key('/'));
    type_text(&mut app, "w");
    assert_eq!(app.list().filtered_len(), 2);

    app.handle_input(code(KeyCode::Backspace));
    assert_eq!(app.search_input(), "");
    assert_eq!(app.list().filtered_len(), 4);
}

#[test]
fn test_table_keys_are_text_while_searching() {
    let mut app = loaded_app(4);
    app.handle_input(key('/'));

    assert!(app.handle_input(key('q')).is_none());
    assert_eq!(app.search_input(), "q");
    assert!(matches!(app.handle_input(ctrl_key('c')), Some(Action::Quit)));
}

// ============================================================================
// Paging
// ============================================================================

#[test]
fn test_page_navigation_clamps() {
    let mut app = loaded_app(25);
    assert_eq!(app.list().total_pages(), 3);

    app.handle_input(code(KeyCode::Left));
    assert_eq!(app.list().current_page(), 1);

    for _ in 0..5 {
        app.handle_input(code(KeyCode::Right));
    }
    assert_eq!(app.list().current_page(), 3);
    assert_eq!(app.list().visible().items.len(), 5);

    app.handle_input(code(KeyCode::Home));
    assert_eq!(app.list().current_page(), 1);
    app.handle_input(code(KeyCode::End));
    assert_eq!(app.list().current_page(), 3);
}

#[test]
fn test_page_size_keys_step_through_options() {
    let mut app = loaded_app(30);
    app.handle_input(code(KeyCode::Right));

    app.handle_input(key('+'));
    assert_eq!(app.list().page_size(), 25);
    assert_eq!(app.list().current_page(), 1);

    app.handle_input(key('-'));
    app.handle_input(key('-'));
    assert_eq!(app.list().page_size(), 5);
    app.handle_input(key('-'));
    assert_eq!(app.list().page_size(), 5);
    assert_eq!(app.list().total_pages(), 6);
}

#[test]
fn test_shrinking_refetch_clamps_page_and_selection() {
    let mut app = loaded_app(25);
    app.handle_input(code(KeyCode::End));
    for _ in 0..10 {
        app.handle_input(code(KeyCode::Down));
    }
    assert_eq!(app.selected(), 4);

    app.refresh();
    deliver(&mut app, assets(3));
    assert_eq!(app.list().current_page(), 1);
    assert_eq!(app.selected(), 2);
}

#[test]
fn test_row_selection_stays_on_page() {
    let mut app = loaded_app(3);
    app.handle_input(code(KeyCode::Up));
    assert_eq!(app.selected(), 0);

    for _ in 0..5 {
        app.handle_input(code(KeyCode::Down));
    }
    assert_eq!(app.selected(), 2);
    assert_eq!(app.selected_record().map(|a| a.asset_id.as_str()), Some("AST-0003"));
}

// ============================================================================
// Filters
// ============================================================================

#[test]
fn test_filter_key_cycles_through_observed_values() {
    let mut app = loaded_app(4);

    // Assets filters: 1 type, 2 classification, 3 business value
    match app.handle_input(key('2')) {
        Some(Action::FetchRecords { query, .. }) => {
            assert_eq!(
                query.filters,
                vec![("classification".to_string(), "Confidential".to_string())]
            );
        }
        _ => panic!("expected a filtered fetch"),
    }
    assert_eq!(app.list().filtered_len(), 2);

    // The server answers with the narrowed set; the other value stays selectable
    let confidential: Vec<Asset> = assets(4).into_iter().step_by(2).collect();
    deliver(&mut app, confidential);

    app.handle_input(key('2'));
    assert_eq!(
        app.list().filters().get("classification").accepted(),
        Some("Public")
    );

    match app.handle_input(key('2')) {
        Some(Action::FetchRecords { query, .. }) => assert!(query.filters.is_empty()),
        _ => panic!("expected an unfiltered fetch"),
    }
    assert!(app.list().filters().get("classification").is_all());
}

#[test]
fn test_fixed_filter_options_need_no_records() {
    let mut app = App::<ComplianceGap>::new(ListConfig::default());

    match app.handle_input(key('1')) {
        Some(Action::FetchRecords { query, .. }) => {
            assert_eq!(
                query.filters,
                vec![("framework".to_string(), "NESA UAE".to_string())]
            );
        }
        _ => panic!("expected a filtered fetch"),
    }
}

#[test]
fn test_filter_key_without_choices_or_field_does_nothing() {
    let mut app = App::<Asset>::new(ListConfig::default());
    assert!(app.handle_input(key('1')).is_none());
    assert!(app.handle_input(key('9')).is_none());
    assert_eq!(app.generation(), 0);
}

#[test]
fn test_clear_filters_key() {
    let mut app = loaded_app(4);
    assert!(app.handle_input(key('c')).is_none());

    app.handle_input(key('2'));
    match app.handle_input(key('c')) {
        Some(Action::FetchRecords { query, .. }) => assert!(query.filters.is_empty()),
        _ => panic!("expected a fetch after clearing"),
    }
    assert!(app.list().filters().is_unconstrained());
    assert_eq!(app.list().filtered_len(), 4);
}

// ============================================================================
// Delete
// ============================================================================

#[test]
fn test_delete_requires_confirmation() {
    let mut app = loaded_app(3);
    app.handle_input(code(KeyCode::Down));

    assert!(app.handle_input(key('d')).is_none());
    assert_eq!(app.pending_delete(), Some("2"));

    match app.handle_input(key('y')) {
        Some(Action::DeleteRecord(target)) => assert_eq!(target, "2"),
        _ => panic!("expected a delete action"),
    }
    assert!(app.pending_delete().is_none());
}

#[test]
fn test_delete_declined_by_any_other_key() {
    let mut app = loaded_app(3);
    app.handle_input(key('d'));

    assert!(app.handle_input(key('q')).is_none(), "the declining key is consumed");
    assert!(app.pending_delete().is_none());
    assert_eq!(app.toasts.last().map(|t| t.message.as_str()), Some("Delete cancelled"));
}

#[test]
fn test_delete_on_empty_page_does_nothing() {
    let mut app = loaded_app(0);
    assert!(app.handle_input(key('d')).is_none());
    assert!(app.pending_delete().is_none());
}

#[test]
fn test_successful_mutation_refetches() {
    let mut app = loaded_app(3);
    let before = app.generation();

    let next = app.update(Action::MutationComplete(Ok(
        "Asset deleted successfully".to_string()
    )));
    assert_eq!(fetch_generation(next), before + 1);
    assert_eq!(app.toasts.last().map(|t| t.level), Some(ToastLevel::Success));
}

#[test]
fn test_failed_mutation_keeps_records() {
    let mut app = loaded_app(3);
    let next = app.update(Action::MutationComplete(Err("Not found".to_string())));

    assert!(next.is_none());
    assert_eq!(app.list().records().len(), 3);
    let toast = app.toasts.last().expect("error toast");
    assert_eq!(toast.level, ToastLevel::Error);
    assert_eq!(toast.message, "Delete failed: Not found");
}

// ============================================================================
// Timers and quitting
// ============================================================================

#[test]
fn test_tick_expires_toasts() {
    let mut app = loaded_app(1);
    app.toasts.push(Toast::info("Records loaded"));
    app.toasts.push(Toast::error("Fetch failed"));

    let now = Instant::now();
    app.tick(now + Duration::from_secs(6));
    assert_eq!(app.toasts.len(), 1);
    app.tick(now + Duration::from_secs(11));
    assert!(app.toasts.is_empty());
}

#[test]
fn test_spinner_advances_only_while_loading() {
    let mut app = App::<Asset>::new(ListConfig::default());
    app.tick(Instant::now());
    assert_eq!(app.spinner_frame, 0);

    app.refresh();
    app.tick(Instant::now());
    assert_eq!(app.spinner_frame, 1);
}

#[test]
fn test_quit_keys() {
    let mut app = loaded_app(1);
    assert!(matches!(app.handle_input(key('q')), Some(Action::Quit)));
    assert!(matches!(app.handle_input(ctrl_key('c')), Some(Action::Quit)));
    assert!(matches!(
        app.update(Action::Input(key('q'))),
        Some(Action::Quit)
    ));
}
