//! Observable autocomplete state

use crate::catalog::Suggestion;
use crate::error::FetchError;
use std::time::Duration;

use super::fetcher::{DEFAULT_MAX_SUGGESTIONS, DEFAULT_MIN_QUERY_LENGTH};

/// Controller configuration, fixed for the controller's lifetime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutocompleteConfig {
    pub min_query_length: usize,
    pub debounce_delay: Duration,
    pub max_suggestions: usize,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            min_query_length: DEFAULT_MIN_QUERY_LENGTH,
            debounce_delay: Duration::from_millis(300),
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }
}

impl AutocompleteConfig {
    /// Whether `query` is long enough to look up
    pub fn accepts(&self, query: &str) -> bool {
        query.trim().chars().count() >= self.min_query_length
    }
}

/// Where the last processed query cycle left the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Query too short; nothing shown
    #[default]
    Idle,
    /// Suggestions served from the cache
    Cached,
    /// A lookup is in flight
    Loading,
    /// A lookup succeeded
    Loaded,
    /// A lookup failed
    Errored,
    /// A suggestion was just picked; the next query cycle is absorbed
    Selected,
}

/// Read-only projection handed to the UI after every transition
#[derive(Debug, Clone, Default)]
pub struct AutocompleteState {
    pub query: String,
    pub suggestions: Vec<Suggestion>,
    pub loading: bool,
    pub error: Option<FetchError>,
    /// `None` means no entry is highlighted
    pub active_index: Option<usize>,
    pub is_open: bool,
    pub phase: Phase,
}

impl AutocompleteState {
    /// The highlighted suggestion, if any
    pub fn active_suggestion(&self) -> Option<&Suggestion> {
        self.active_index.and_then(|i| self.suggestions.get(i))
    }

    /// Replace the list; the highlight never survives a list change
    pub(crate) fn show(&mut self, suggestions: Vec<Suggestion>) {
        self.suggestions = suggestions;
        self.loading = false;
        self.error = None;
        self.is_open = true;
        self.active_index = None;
    }

    pub(crate) fn close(&mut self) {
        self.is_open = false;
        self.active_index = None;
    }

    pub(crate) fn clear(&mut self) {
        self.suggestions.clear();
        self.loading = false;
        self.close();
    }
}

/// What the dropdown region should display
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dropdown<'a> {
    Hidden,
    Loading,
    Error(&'a FetchError),
    /// Valid query, finished lookup, nothing matched
    Empty,
    Suggestions {
        items: &'a [Suggestion],
        active: Option<usize>,
    },
}

impl<'a> Dropdown<'a> {
    pub fn from_state(state: &'a AutocompleteState, config: &AutocompleteConfig) -> Self {
        if !state.is_open {
            return Dropdown::Hidden;
        }
        if state.loading {
            return Dropdown::Loading;
        }
        if let Some(ref err) = state.error {
            return Dropdown::Error(err);
        }
        if !state.suggestions.is_empty() {
            return Dropdown::Suggestions {
                items: &state.suggestions,
                active: state.active_index,
            };
        }
        if config.accepts(&state.query) {
            Dropdown::Empty
        } else {
            Dropdown::Hidden
        }
    }
}
