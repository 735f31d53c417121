//! Product autocomplete
//!
//! Debounces typed input, answers from the shared result cache when it can,
//! otherwise looks suggestions up through a cancellable fetcher, and keeps a
//! keyboard-navigable suggestion list for the UI.

mod controller;
mod debounce;
mod fetcher;
mod keys;
mod source;
mod state;

pub use controller::AutocompleteController;
pub use debounce::Debouncer;
pub use fetcher::{SuggestionFetcher, DEFAULT_MAX_SUGGESTIONS, DEFAULT_MIN_QUERY_LENGTH};
pub use keys::{Key, KeyOutcome};
pub use source::SuggestionSource;
pub use state::{AutocompleteConfig, AutocompleteState, Dropdown, Phase};
