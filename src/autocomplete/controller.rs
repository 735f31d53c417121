//! The autocomplete state machine
//!
//! Typed input is debounced, checked against the shared [`ResultCache`] and,
//! on a miss, looked up through the [`SuggestionFetcher`]. Only the most
//! recently issued lookup may change state: every lookup carries a
//! generation number and a cancellation token, and a completion whose
//! generation is no longer current is dropped regardless of its outcome.
//!
//! The controller never spawns. Debounce timers and lookups advance only
//! while the host awaits [`AutocompleteController::next_transition`], which
//! is cancel safe and meant to sit in the host's `select!` loop next to its
//! input events.

use super::debounce::Debouncer;
use super::fetcher::SuggestionFetcher;
use super::keys::{Key, KeyOutcome};
use super::source::SuggestionSource;
use super::state::{AutocompleteConfig, AutocompleteState, Dropdown, Phase};
use crate::cache::{normalize_query, ResultCache};
use crate::catalog::Suggestion;
use crate::error::FetchError;
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Result of one lookup, tagged with the generation that issued it
struct FetchCompletion {
    generation: u64,
    query: String,
    outcome: Result<Vec<Suggestion>, FetchError>,
}

/// The single live lookup
struct InFlight {
    generation: u64,
    key: String,
    token: CancellationToken,
}

pub struct AutocompleteController {
    config: AutocompleteConfig,
    fetcher: Arc<SuggestionFetcher>,
    cache: Arc<ResultCache>,
    state: AutocompleteState,
    debouncer: Debouncer<String>,
    in_flight: Option<InFlight>,
    generation: u64,
    requests: FuturesUnordered<BoxFuture<'static, FetchCompletion>>,
}

impl AutocompleteController {
    pub fn new(
        config: AutocompleteConfig,
        source: Arc<dyn SuggestionSource>,
        cache: Arc<ResultCache>,
    ) -> Self {
        let fetcher = SuggestionFetcher::new(source)
            .with_min_query_length(config.min_query_length)
            .with_max_results(config.max_suggestions);
        let debouncer = Debouncer::new(String::new(), config.debounce_delay);

        Self {
            config,
            fetcher: Arc::new(fetcher),
            cache,
            state: AutocompleteState::default(),
            debouncer,
            in_flight: None,
            generation: 0,
            requests: FuturesUnordered::new(),
        }
    }

    pub fn state(&self) -> &AutocompleteState {
        &self.state
    }

    /// What the dropdown should currently render
    pub fn dropdown(&self) -> Dropdown<'_> {
        Dropdown::from_state(&self.state, &self.config)
    }

    /// Record new input; it is acted on once typing pauses
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.state.query = query.clone();
        self.debouncer.update(query);
    }

    /// Take a suggestion: its title becomes the query and the dropdown
    /// stays shut through the query cycle that the new title triggers.
    pub fn select_suggestion(&mut self, suggestion: &Suggestion) {
        self.cancel_in_flight();

        let title = suggestion.title.clone();
        // A title equal to the settled query produces no cycle to absorb.
        self.state.phase = if *self.debouncer.current() != title {
            Phase::Selected
        } else {
            Phase::Idle
        };
        debug!("Selected suggestion {} '{}'", suggestion.id, title);

        self.state.query = title.clone();
        self.debouncer.update(title);
        self.state.clear();
    }

    /// Re-show suggestions for a still-valid query when the input regains
    /// focus, looking them up again if they are not cached.
    pub fn handle_focus(&mut self) {
        if !self.config.accepts(&self.state.query) {
            return;
        }

        let query = self.state.query.clone();
        if !self.serve_from_cache(&query) && !self.state.loading {
            self.issue_fetch(query);
        }
    }

    pub fn close_dropdown(&mut self) {
        self.state.close();
    }

    pub fn handle_key_down(&mut self, key: &Key) -> KeyOutcome {
        if *key == Key::Tab {
            self.state.close();
            return KeyOutcome::Default;
        }

        let len = self.state.suggestions.len();
        if !self.state.is_open || len == 0 {
            return match key {
                Key::ArrowDown if self.config.accepts(&self.state.query) => {
                    self.state.is_open = true;
                    self.state.active_index = if len > 0 { Some(0) } else { None };
                    KeyOutcome::PreventDefault
                }
                Key::Escape if self.state.is_open => {
                    self.state.close();
                    KeyOutcome::PreventDefault
                }
                _ => KeyOutcome::Default,
            };
        }

        match key {
            Key::ArrowDown => {
                let next = match self.state.active_index {
                    None => 0,
                    Some(i) => (i + 1).min(len - 1),
                };
                self.state.active_index = Some(next);
            }
            Key::ArrowUp => {
                self.state.active_index = match self.state.active_index {
                    Some(i) if i > 0 => Some(i - 1),
                    _ => None,
                };
            }
            Key::Enter => {
                if let Some(suggestion) = self.state.active_suggestion().cloned() {
                    self.select_suggestion(&suggestion);
                }
            }
            Key::Escape => self.state.close(),
            _ => return KeyOutcome::Default,
        }
        KeyOutcome::PreventDefault
    }

    /// True while a lookup is outstanding
    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Wait for the next debounced query or lookup completion and apply it.
    ///
    /// Returns the phase reached, or `None` once there is nothing left to
    /// wait for. Superseded lookups and unchanged queries are absorbed
    /// without returning.
    pub async fn next_transition(&mut self) -> Option<Phase> {
        loop {
            let debouncing = self.debouncer.is_pending();
            let fetching = !self.requests.is_empty();
            if !debouncing && !fetching {
                return None;
            }

            tokio::select! {
                biased;
                settled = self.debouncer.settle(), if debouncing => {
                    if let Some(query) = settled {
                        return Some(self.on_query_settled(query));
                    }
                }
                Some(done) = self.requests.next(), if fetching => {
                    if let Some(phase) = self.on_fetch_complete(done) {
                        return Some(phase);
                    }
                }
                else => return None,
            }
        }
    }

    /// Drive the controller until nothing is pending; returns the last phase
    pub async fn run_until_idle(&mut self) -> Option<Phase> {
        let mut last = None;
        while let Some(phase) = self.next_transition().await {
            last = Some(phase);
        }
        last
    }

    /// Stop all pending work; later completions can no longer touch state
    pub fn shutdown(&mut self) {
        self.debouncer.cancel();
        self.cancel_in_flight();
        self.requests = FuturesUnordered::new();
    }

    fn on_query_settled(&mut self, query: String) -> Phase {
        let accepted = self.config.accepts(&query);
        // Only a valid query may keep a lookup for the same key alive;
        // lower-casing can change the length, so keys alone are not enough.
        let key = normalize_query(&query);
        if !accepted || self.in_flight.as_ref().is_some_and(|f| f.key != key) {
            self.cancel_in_flight();
        }

        if self.state.phase == Phase::Selected {
            debug!("Query '{}' came from a selection, keeping dropdown closed", query);
            self.state.phase = Phase::Idle;
            return Phase::Idle;
        }

        if !accepted {
            self.state.clear();
            self.state.phase = Phase::Idle;
            return Phase::Idle;
        }

        if self.serve_from_cache(&query) {
            return Phase::Cached;
        }

        if self.in_flight.is_some() {
            // Same query is already being looked up (issued on focus).
            self.state.loading = true;
            self.state.error = None;
            self.state.phase = Phase::Loading;
            return Phase::Loading;
        }

        self.issue_fetch(query);
        Phase::Loading
    }

    fn serve_from_cache(&mut self, query: &str) -> bool {
        let Some(cached) = self.cache.get(query) else {
            return false;
        };

        debug!("Serving {} cached suggestions for '{}'", cached.len(), query);
        self.cancel_in_flight();
        self.state.show(cached);
        self.state.phase = Phase::Cached;
        true
    }

    fn issue_fetch(&mut self, query: String) {
        self.cancel_in_flight();

        self.generation += 1;
        let generation = self.generation;
        let token = CancellationToken::new();
        self.in_flight = Some(InFlight {
            generation,
            key: normalize_query(&query),
            token: token.clone(),
        });

        self.state.loading = true;
        self.state.error = None;
        self.state.phase = Phase::Loading;

        debug!(generation, "Looking up suggestions for '{}'", query);
        let fetcher = Arc::clone(&self.fetcher);
        self.requests.push(Box::pin(async move {
            let outcome = fetcher.fetch(&query, &token).await;
            FetchCompletion {
                generation,
                query,
                outcome,
            }
        }));
    }

    fn cancel_in_flight(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            debug!(
                generation = in_flight.generation,
                "Cancelling lookup for '{}'", in_flight.key
            );
            in_flight.token.cancel();
        }
    }

    fn on_fetch_complete(&mut self, done: FetchCompletion) -> Option<Phase> {
        let current = self
            .in_flight
            .as_ref()
            .is_some_and(|f| f.generation == done.generation);
        if !current {
            debug!(
                generation = done.generation,
                "Dropping superseded lookup for '{}'", done.query
            );
            return None;
        }

        match done.outcome {
            Err(FetchError::Cancelled) => None,
            Ok(suggestions) => {
                self.in_flight = None;
                debug!("Got {} suggestions for '{}'", suggestions.len(), done.query);
                self.cache.set(&done.query, suggestions.clone());
                self.state.show(suggestions);
                self.state.phase = Phase::Loaded;
                Some(Phase::Loaded)
            }
            Err(err) => {
                self.in_flight = None;
                warn!("Suggestion lookup for '{}' failed: {}", done.query, err);
                self.state.suggestions.clear();
                self.state.active_index = None;
                self.state.loading = false;
                self.state.error = Some(err);
                // Keep the failure visible in the dropdown.
                self.state.is_open = true;
                self.state.phase = Phase::Errored;
                Some(Phase::Errored)
            }
        }
    }
}

impl Drop for AutocompleteController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
