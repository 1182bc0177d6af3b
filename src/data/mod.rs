//! Client-side data layer: reads, writes and search on top of [`crate::api`].

pub mod collab;
pub mod fetch;
pub mod mutation;
pub mod search;

pub use collab::{
    AuthState, Navigator, Notification, NotificationLevel, Notifier, RecordingNavigator,
    RecordingNotifier,
};
pub use fetch::{FetchIntent, FetchOptions, FetchOutcome, FetchReducer, FetchState, Fetcher};
pub use mutation::{Mutation, MutationMethod, MutationOptions};
pub use search::{
    filter_items, matches, SearchIntent, SearchReducer, SearchState, Searchable, DEFAULT_DEBOUNCE,
};

/// Default redirect target for a missing or rejected session.
pub const DEFAULT_REDIRECT: &str = "/auth";
pub const DEFAULT_FETCH_ERROR: &str = "Failed to fetch data";
pub const DEFAULT_MUTATION_ERROR: &str = "Operation failed";
/// Reported for transport failures and undecodable bodies.
pub const NETWORK_ERROR: &str = "Network error";
