//! Register screen state and input handling.
//!
//! Responsibilities:
//! - Own the [`ListViewState`] of the register being browsed.
//! - Translate key presses into list-view changes and side-effect actions.
//! - Debounce search input into server refetches on the UI tick.
//! - Surface fetch and mutation outcomes as toasts.
//!
//! Does NOT handle:
//! - HTTP calls (see `runtime::side_effects`).
//! - Drawing (see `ui::list`).
//!
//! Invariants:
//! - Only the response to the most recent fetch request is applied.
//! - The selected row always lies inside the visible page.
//! - Local filtering and paging happen immediately; the server is only
//!   asked again on filter changes, refresh, and debounced search.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use grc_client::{FilterField, ListQuery, Resource, ResourceKind};
use grc_config::ListConfig;
use grc_listview::{Debouncer, FilterValue, ListViewState};
use ratatui::Frame;
use tracing::{debug, info};

use crate::action::{Action, FetchedRecords};
use crate::ui::theme::Theme;
use crate::ui::toast::Toast;

/// Which widget receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    Search,
}

/// State of one register screen, generic over the register's entity type.
pub struct App<T: Resource> {
    list: ListViewState<T>,
    config: ListConfig,
    focus: Focus,
    search_input: String,
    selected: usize,
    debouncer: Debouncer,
    pending_delete: Option<String>,
    generation: u64,
    /// Values seen per filter field across every fetch, so cycling still
    /// offers the other choices after the server narrowed the record set.
    filter_choices: BTreeMap<&'static str, BTreeSet<String>>,
    pub toasts: Vec<Toast>,
    pub loading: bool,
    pub spinner_frame: usize,
    theme: Theme,
}

impl<T: Resource> App<T> {
    pub fn new(config: ListConfig) -> Self {
        let list = ListViewState::new(T::KIND.search_spec(), config.page_size)
            .with_max_visible_pages(config.max_visible_pages);
        Self {
            list,
            debouncer: Debouncer::new(config.search_debounce),
            config,
            focus: Focus::Table,
            search_input: String::new(),
            selected: 0,
            pending_delete: None,
            generation: 0,
            filter_choices: BTreeMap::new(),
            toasts: Vec::new(),
            loading: false,
            spinner_frame: 0,
            theme: Theme::default(),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        T::KIND
    }

    pub fn list(&self) -> &ListViewState<T> {
        &self.list
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Mutation key awaiting `y` confirmation.
    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn is_search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn selected_record(&self) -> Option<&T> {
        self.list.visible().items.get(self.selected).copied()
    }

    /// Choices offered for `field`, in cycling order after `All`.
    pub fn filter_choices(&self, field: &FilterField) -> Vec<String> {
        if !field.options.is_empty() {
            return field.options.iter().map(|o| o.to_string()).collect();
        }
        self.filter_choices
            .get(field.field)
            .map(|values| values.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Start a new fetch for the current search and filters.
    ///
    /// Bumps the generation so any fetch still in flight is ignored when it lands.
    pub fn refresh(&mut self) -> Action<T> {
        self.debouncer.cancel();
        self.generation += 1;
        self.loading = true;
        debug!(register = %T::KIND, generation = self.generation, "Requesting fetch");
        Action::FetchRecords {
            generation: self.generation,
            query: ListQuery::for_view(T::KIND, self.list.query(), self.list.filters()),
        }
    }

    /// Apply an action. Returns a follow-up action for the event loop, if any.
    pub fn update(&mut self, action: Action<T>) -> Option<Action<T>> {
        match action {
            Action::Input(key) => self.handle_input(key),
            Action::Resize(..) => None,
            Action::RecordsLoaded { generation, result } => {
                self.apply_records(generation, result);
                None
            }
            Action::MutationComplete(Ok(message)) => {
                self.toasts.push(Toast::success(message));
                Some(self.refresh())
            }
            Action::MutationComplete(Err(error)) => {
                self.toasts.push(Toast::error(format!("Delete failed: {error}")));
                None
            }
            other @ (Action::Quit | Action::FetchRecords { .. } | Action::DeleteRecord(_)) => {
                Some(other)
            }
        }
    }

    /// Advance timers: expire toasts, animate the spinner, fire a due search.
    pub fn tick(&mut self, now: Instant) -> Option<Action<T>> {
        self.toasts.retain(|toast| !toast.is_expired_at(now));
        if self.loading {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
        self.debouncer.poll(now)?;
        info!(register = %T::KIND, query = %self.list.query(), "Search settled; refetching");
        Some(self.refresh())
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<Action<T>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        if let Some(target) = self.pending_delete.take() {
            if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
                info!(register = %T::KIND, key = %target, "Delete confirmed");
                return Some(Action::DeleteRecord(target));
            }
            self.toasts.push(Toast::info("Delete cancelled"));
            return None;
        }

        match self.focus {
            Focus::Search => self.handle_search_input(key),
            Focus::Table => self.handle_table_input(key),
        }
    }

    fn handle_search_input(&mut self, key: KeyEvent) -> Option<Action<T>> {
        match key.code {
            KeyCode::Esc => {
                self.focus = Focus::Table;
                None
            }
            KeyCode::Enter => {
                self.focus = Focus::Table;
                // Skip the rest of the quiescence window
                self.debouncer.is_pending().then(|| self.refresh())
            }
            KeyCode::Backspace => {
                self.search_input.pop();
                self.search_changed(Instant::now());
                None
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search_input.push(c);
                self.search_changed(Instant::now());
                None
            }
            _ => None,
        }
    }

    fn search_changed(&mut self, now: Instant) {
        if self.list.set_query(self.search_input.clone()) {
            self.selected = 0;
            self.debouncer.trigger(now);
        }
    }

    fn handle_table_input(&mut self, key: KeyEvent) -> Option<Action<T>> {
        match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('/') => {
                self.focus = Focus::Search;
                None
            }
            KeyCode::Char(digit @ '1'..='9') => {
                let index = digit as usize - '1' as usize;
                self.cycle_filter(index)
            }
            KeyCode::Char('c') => {
                if self.list.filters().is_unconstrained() {
                    return None;
                }
                self.list.clear_filters();
                self.selected = 0;
                Some(self.refresh())
            }
            KeyCode::Char('r') => Some(self.refresh()),
            KeyCode::Char('d') => {
                let key = self.selected_record()?.mutation_key();
                self.pending_delete = Some(key);
                None
            }
            KeyCode::Char('+') => {
                let size = self.config.next_page_size(self.list.page_size());
                self.change_page_size(size);
                None
            }
            KeyCode::Char('-') => {
                let size = self.config.previous_page_size(self.list.page_size());
                self.change_page_size(size);
                None
            }
            KeyCode::Left => {
                if self.list.previous_page() {
                    self.selected = 0;
                }
                None
            }
            KeyCode::Right => {
                if self.list.next_page() {
                    self.selected = 0;
                }
                None
            }
            KeyCode::Home => {
                self.list.select_page(1);
                self.selected = 0;
                None
            }
            KeyCode::End => {
                self.list.select_page(self.list.total_pages());
                self.selected = 0;
                None
            }
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                let visible = self.list.visible().items.len();
                if self.selected + 1 < visible {
                    self.selected += 1;
                }
                None
            }
            _ => None,
        }
    }

    fn change_page_size(&mut self, size: usize) {
        if size != self.list.page_size() {
            self.list.set_page_size(size);
            self.selected = 0;
        }
    }

    /// Move the `index`-th filter to its next choice, wrapping back to `All`.
    fn cycle_filter(&mut self, index: usize) -> Option<Action<T>> {
        let field = T::KIND.filter_fields().get(index)?;
        let choices = self.filter_choices(field);
        let current = self.list.filters().get(field.field).clone();

        let next = match current
            .accepted()
            .and_then(|value| choices.iter().position(|c| c == value))
        {
            Some(position) => choices.get(position + 1),
            None => choices.first(),
        };
        let next = next.map_or(FilterValue::All, |value| FilterValue::Exactly(value.clone()));
        if next == current {
            return None;
        }

        debug!(register = %T::KIND, field = field.field, value = %next, "Filter changed");
        self.list.set_filter(field.field, next);
        self.selected = 0;
        Some(self.refresh())
    }

    fn apply_records(&mut self, generation: u64, result: Result<FetchedRecords<T>, String>) {
        if generation != self.generation {
            debug!(
                generation,
                latest = self.generation,
                "Ignoring response to a superseded fetch"
            );
            return;
        }
        self.loading = false;

        match result {
            Ok(FetchedRecords { records, skipped }) => {
                self.list.replace_records(records);
                self.observe_filter_choices();
                if skipped > 0 {
                    self.toasts.push(Toast::warning(format!(
                        "{skipped} malformed record(s) skipped"
                    )));
                }
            }
            Err(error) => {
                self.list.apply_fetch(Err(error));
                if let Some(notice) = self.list.take_notice() {
                    self.toasts.push(Toast::error(format!(
                        "Failed to load {}: {notice}",
                        T::KIND.noun()
                    )));
                }
            }
        }

        let visible = self.list.visible().items.len();
        self.selected = self.selected.min(visible.saturating_sub(1));
    }

    fn observe_filter_choices(&mut self) {
        for field in T::KIND.filter_fields() {
            if field.options.is_empty() {
                let values = self.list.distinct_values(field.field);
                self.filter_choices
                    .entry(field.field)
                    .or_default()
                    .extend(values);
            }
        }
    }

    pub fn render(&self, f: &mut Frame) {
        crate::ui::list::render(f, self);
    }
}
