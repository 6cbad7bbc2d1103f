//! Test helpers for TUI testing.
//!
//! Key-event constructors and an asset register fixture builder.

#![allow(dead_code)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use grc_client::Asset;
use grc_config::ListConfig;
use grc_tui::{Action, App, FetchedRecords};
use serde_json::json;

pub fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

pub fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

pub fn code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Type `text` one character at a time.
pub fn type_text<T: grc_client::Resource>(app: &mut App<T>, text: &str) {
    for c in text.chars() {
        app.handle_input(key(c));
    }
}

/// `count` assets alternating between a confidential payroll database and a
/// public website.
pub fn assets(count: usize) -> Vec<Asset> {
    (1..=count)
        .map(|i| {
            let (name, classification) = if i % 2 == 1 {
                ("Payroll Database", "Confidential")
            } else {
                ("Corporate Website", "Public")
            };
            serde_json::from_value(json!({
                "id": i,
                "asset_id": format!("AST-{i:04}"),
                "asset_name": format!("{name} {i}"),
                "asset_type": "Application",
                "classification": classification,
                "owner": "IT Operations",
                "business_value": "High",
            }))
            .expect("valid asset")
        })
        .collect()
}

/// Generation of a `FetchRecords` action.
pub fn fetch_generation<T>(action: Option<Action<T>>) -> u64 {
    match action {
        Some(Action::FetchRecords { generation, .. }) => generation,
        _ => panic!("expected a fetch action"),
    }
}

/// Answer the app's latest fetch with `records`.
pub fn deliver<T: grc_client::Resource>(app: &mut App<T>, records: Vec<T>) {
    let generation = app.generation();
    app.update(Action::RecordsLoaded {
        generation,
        result: Ok(FetchedRecords {
            records,
            skipped: 0,
        }),
    });
}

/// An asset screen with `count` records loaded at page size 10.
pub fn loaded_app(count: usize) -> App<Asset> {
    let mut app = App::<Asset>::new(ListConfig::default());
    app.refresh();
    deliver(&mut app, assets(count));
    app
}
