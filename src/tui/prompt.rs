//! State machine behind the searchable list prompt.
//!
//! `PromptState` does no I/O: the run loop classifies a key, calls
//! [`PromptState::apply`], then renders the state with
//! [`crate::tui::frame::render`].

use crate::tui::choice::{Entry, PromptValue};
use crate::tui::keys::{self, Direction, JumpTarget, KeyAction, KeyContext};
use crossterm::event::KeyEvent;
use std::ops::Range;

/// Rows visible at once unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Pending,
    Done,
    Cancelled,
    NewSearch,
}

impl Status {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self != Self::Pending
    }
}

/// How a prompt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<V> {
    Selected(V),
    Cancelled,
    NewSearch,
}

/// Knobs for a prompt invocation.
#[derive(Debug, Clone, Copy)]
pub struct PromptOptions {
    pub page_size: usize,
    /// Wrap around when moving past either end.
    pub wrap: bool,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            wrap: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PromptState<V> {
    message: String,
    entries: Vec<Entry<V>>,
    options: PromptOptions,
    status: Status,
    cursor: usize,
    search_mode: bool,
    search_term: String,
    /// Indices into `entries`, in original order.
    filtered: Vec<usize>,
    show_help: bool,
}

impl<V: Clone + PromptValue> PromptState<V> {
    pub fn new(message: impl Into<String>, entries: Vec<Entry<V>>) -> Self {
        let filtered: Vec<usize> = (0..entries.len()).collect();
        let mut state = Self {
            message: message.into(),
            entries,
            options: PromptOptions::default(),
            status: Status::Pending,
            cursor: 0,
            search_mode: false,
            search_term: String::new(),
            filtered,
            show_help: false,
        };
        state.cursor = state.first_selectable().unwrap_or(0);
        state
    }

    #[must_use]
    pub fn with_options(mut self, options: PromptOptions) -> Self {
        self.options = PromptOptions {
            page_size: options.page_size.max(1),
            wrap: options.wrap,
        };
        self
    }

    #[must_use]
    pub fn page_size(self, page_size: usize) -> Self {
        let wrap = self.options.wrap;
        self.with_options(PromptOptions { page_size, wrap })
    }

    #[must_use]
    pub fn wrap(self, wrap: bool) -> Self {
        let page_size = self.options.page_size;
        self.with_options(PromptOptions { page_size, wrap })
    }

    /// Classify a raw key and apply it.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<Outcome<V>> {
        let action = keys::classify(key, self.key_context());
        tracing::trace!(?key, ?action, "prompt key");
        self.apply(action)
    }

    /// Apply one action. Returns the outcome on the transition into a
    /// terminal state; once terminal, every call is ignored.
    pub fn apply(&mut self, action: KeyAction) -> Option<Outcome<V>> {
        if self.status.is_terminal() {
            return None;
        }

        match action {
            KeyAction::Quit => {
                self.status = Status::Cancelled;
                Some(Outcome::Cancelled)
            }
            KeyAction::NewSearch => {
                self.status = Status::NewSearch;
                Some(Outcome::NewSearch)
            }
            KeyAction::ToggleHelp => {
                self.show_help = !self.show_help;
                None
            }
            KeyAction::EnterSearch => {
                self.search_mode = true;
                self.search_term.clear();
                None
            }
            KeyAction::ExitSearch => {
                self.exit_search();
                None
            }
            KeyAction::Select => self.select(),
            KeyAction::Navigate(direction) => {
                self.move_cursor(direction);
                None
            }
            KeyAction::Jump(target) => {
                self.jump(target);
                None
            }
            KeyAction::SearchInput(c) => {
                let mut term = std::mem::take(&mut self.search_term);
                term.push(c);
                self.set_search_term(term);
                None
            }
            KeyAction::SearchBackspace => {
                let mut term = std::mem::take(&mut self.search_term);
                term.pop();
                self.set_search_term(term);
                None
            }
            KeyAction::NoOp => None,
        }
    }

    fn select(&mut self) -> Option<Outcome<V>> {
        if self.filtered.is_empty() {
            return None;
        }
        let choice = self.entry_at(self.cursor)?.as_choice()?;
        if choice.disabled.is_some() || !choice.value.is_truthy() {
            return None;
        }
        let value = choice.value.clone();
        self.status = Status::Done;
        Some(Outcome::Selected(value))
    }

    fn exit_search(&mut self) {
        self.search_mode = false;
        self.search_term.clear();
        self.filtered = (0..self.entries.len()).collect();
        self.cursor = self.first_selectable().unwrap_or(0);
    }

    fn set_search_term(&mut self, term: String) {
        self.search_term = term;
        self.filtered = filter_entries(&self.entries, &self.search_term);
        self.cursor = self.first_selectable().unwrap_or(0);
    }

    fn move_cursor(&mut self, direction: Direction) {
        let len = self.filtered.len();
        if len == 0 {
            return;
        }
        let len = len as isize;
        let delta = direction.delta();
        let start = self.cursor as isize;

        let mut pos = start + delta;
        if !(0..len).contains(&pos) {
            if !self.options.wrap {
                return;
            }
            pos = pos.rem_euclid(len);
        }

        let mut steps = 0;
        while (0..len).contains(&pos) && !self.is_selectable_at(pos as usize) && steps < len {
            pos += delta;
            steps += 1;
            if self.options.wrap {
                pos = pos.rem_euclid(len);
            }
        }

        if (0..len).contains(&pos) && self.is_selectable_at(pos as usize) {
            self.cursor = pos as usize;
        } else if !self.is_selectable_at(self.cursor) {
            // Nothing selectable in that direction; settle inside the list.
            self.cursor = pos.clamp(0, len - 1) as usize;
        }
    }

    fn jump(&mut self, target: JumpTarget) {
        if self.filtered.is_empty() {
            return;
        }
        self.cursor = match target {
            JumpTarget::Top => 0,
            JumpTarget::Bottom => self.filtered.len() - 1,
        };
    }
}

impl<V> PromptState<V> {
    fn key_context(&self) -> KeyContext {
        KeyContext {
            search_mode: self.search_mode,
            pending: self.status == Status::Pending,
        }
    }

    fn first_selectable(&self) -> Option<usize> {
        (0..self.filtered.len()).find(|&i| self.is_selectable_at(i))
    }

    fn is_selectable_at(&self, index: usize) -> bool {
        self.entry_at(index).is_some_and(Entry::is_selectable)
    }

    /// Entry at a position of the filtered list.
    #[must_use]
    pub fn entry_at(&self, index: usize) -> Option<&Entry<V>> {
        self.filtered.get(index).map(|&i| &self.entries[i])
    }

    /// Filtered entries in display order.
    pub fn filtered(&self) -> impl Iterator<Item = &Entry<V>> {
        self.filtered.iter().map(|&i| &self.entries[i])
    }

    #[must_use]
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Number of entries the prompt was created with, separators included.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn search_mode(&self) -> bool {
        self.search_mode
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    #[must_use]
    pub fn show_help(&self) -> bool {
        self.show_help
    }

    #[must_use]
    pub fn options(&self) -> PromptOptions {
        self.options
    }

    /// Range of filtered positions visible in the current page.
    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        visible_window(self.cursor, self.filtered.len(), self.options.page_size)
    }
}

/// Indices of entries matching `term`. An empty term keeps everything,
/// separators included; otherwise separators never match.
fn filter_entries<V>(entries: &[Entry<V>], term: &str) -> Vec<usize> {
    if term.is_empty() {
        return (0..entries.len()).collect();
    }
    let needle = term.to_lowercase();
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.as_choice().is_some_and(|c| c.matches(&needle)))
        .map(|(i, _)| i)
        .collect()
}

/// Page window keeping `cursor` centred when there is room on both sides.
#[must_use]
pub fn visible_window(cursor: usize, len: usize, page_size: usize) -> Range<usize> {
    let page_size = page_size.max(1);
    let start = cursor
        .saturating_sub(page_size / 2)
        .min(len.saturating_sub(page_size));
    let end = (start + page_size).min(len);
    start..end
}
