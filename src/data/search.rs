//! Debounced client-side search over an in-memory collection.
//!
//! Time is passed in through intents rather than read from a clock, so the
//! reducer stays pure. A driver sends `SetQuery` on every keystroke and
//! `Tick` whenever it wakes up; the filter recomputes once the query has
//! been stable for the debounce interval.

use std::time::{Duration, Instant};

use serde_json::Value;

use crate::ui::mvi::{Intent, Reducer, UiState};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Items that expose named string fields to search.
pub trait Searchable {
    /// The value of `field` if it is a string. Other values never match.
    fn search_field(&self, field: &str) -> Option<&str>;
}

impl Searchable for Value {
    fn search_field(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }
}

/// Case-insensitive substring match on any of `fields`.
///
/// An empty query matches everything.
pub fn matches<T: Searchable>(item: &T, fields: &[String], query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    fields.iter().any(|field| {
        item.search_field(field)
            .is_some_and(|value| value.to_lowercase().contains(&needle))
    })
}

/// Items matching `query`, in their original order.
pub fn filter_items<T: Searchable + Clone>(items: &[T], fields: &[String], query: &str) -> Vec<T> {
    items
        .iter()
        .filter(|item| matches(*item, fields, query))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchState<T> {
    items: Vec<T>,
    fields: Vec<String>,
    debounce: Duration,
    query: String,
    debounced_query: String,
    /// When the pending query becomes effective.
    deadline: Option<Instant>,
    filtered: Vec<T>,
    /// Bumped on every filter recomputation.
    revision: u64,
}

impl<T> Default for SearchState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            fields: Vec::new(),
            debounce: DEFAULT_DEBOUNCE,
            query: String::new(),
            debounced_query: String::new(),
            deadline: None,
            filtered: Vec::new(),
            revision: 0,
        }
    }
}

impl<T: Searchable + Clone> SearchState<T> {
    pub fn new<S: Into<String>>(
        items: Vec<T>,
        fields: impl IntoIterator<Item = S>,
        debounce: Duration,
    ) -> Self {
        let filtered = items.clone();
        Self {
            items,
            fields: fields.into_iter().map(Into::into).collect(),
            debounce,
            filtered,
            ..Self::default()
        }
    }

    fn recompute(mut self) -> Self {
        self.filtered = filter_items(&self.items, &self.fields, &self.debounced_query);
        self.revision += 1;
        self
    }
}

impl<T> SearchState<T> {
    /// The live query, as typed.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The query the filter was last computed with.
    pub fn debounced_query(&self) -> &str {
        &self.debounced_query
    }

    pub fn filtered(&self) -> &[T] {
        &self.filtered
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// True while a typed query has not yet reached the filter.
    pub fn is_filtering(&self) -> bool {
        self.query != self.debounced_query
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl<T: Searchable + Clone + PartialEq + Send + 'static> UiState for SearchState<T> {}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchIntent<T> {
    /// Replace the source collection.
    SetItems(Vec<T>),
    /// The user typed; restarts the debounce window.
    SetQuery { query: String, at: Instant },
    /// Clock reading from the driver.
    Tick { now: Instant },
    /// Apply the pending query immediately.
    Commit,
}

impl<T: Send + 'static> Intent for SearchIntent<T> {}

pub struct SearchReducer<T>(std::marker::PhantomData<T>);

impl<T: Searchable + Clone + PartialEq + Send + 'static> Reducer for SearchReducer<T> {
    type State = SearchState<T>;
    type Intent = SearchIntent<T>;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            SearchIntent::SetItems(items) => SearchState { items, ..state }.recompute(),
            SearchIntent::SetQuery { query, at } => {
                let deadline = Some(at + state.debounce);
                SearchState {
                    query,
                    deadline,
                    ..state
                }
            }
            SearchIntent::Tick { now } => match state.deadline {
                Some(deadline) if now >= deadline => commit(state),
                _ => state,
            },
            SearchIntent::Commit => commit(state),
        }
    }
}

fn commit<T: Searchable + Clone>(state: SearchState<T>) -> SearchState<T> {
    if state.query == state.debounced_query {
        return SearchState {
            deadline: None,
            ..state
        };
    }
    let debounced_query = state.query.clone();
    SearchState {
        debounced_query,
        deadline: None,
        ..state
    }
    .recompute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    type R = SearchReducer<Value>;

    fn people() -> Vec<Value> {
        vec![
            json!({"name": "Alice", "city": "Lagos", "age": 30}),
            json!({"name": "Bob", "city": "Accra", "age": 25}),
            json!({"name": "Carla", "city": "alexandria", "age": "Al"}),
        ]
    }

    #[test]
    fn test_case_insensitive_or_across_fields() {
        let fields = vec!["name".to_string(), "city".to_string()];
        let result = filter_items(&people(), &fields, "AL");
        let names: Vec<_> = result.iter().map(|v| v["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Alice", "Carla"]);
    }

    #[test]
    fn test_non_string_fields_never_match() {
        let fields = vec!["age".to_string()];
        assert!(filter_items(&people(), &fields, "30").is_empty());
        assert_eq!(filter_items(&people(), &fields, "al").len(), 1);
    }

    #[test]
    fn test_query_waits_for_debounce() {
        let start = Instant::now();
        let state = SearchState::new(people(), ["name"], Duration::from_millis(300));
        let state = R::reduce(
            state,
            SearchIntent::SetQuery {
                query: "bob".to_string(),
                at: start,
            },
        );
        assert!(state.is_filtering());
        assert_eq!(state.filtered().len(), 3);

        let state = R::reduce(
            state,
            SearchIntent::Tick {
                now: start + Duration::from_millis(299),
            },
        );
        assert!(state.is_filtering());

        let state = R::reduce(
            state,
            SearchIntent::Tick {
                now: start + Duration::from_millis(300),
            },
        );
        assert!(!state.is_filtering());
        assert_eq!(state.debounced_query(), "bob");
        assert_eq!(state.filtered().len(), 1);
    }

    #[test]
    fn test_set_items_refilters_with_current_query() {
        let state = SearchState::new(people(), ["name"], DEFAULT_DEBOUNCE);
        let state = R::reduce_all(
            state,
            [
                SearchIntent::SetQuery {
                    query: "a".to_string(),
                    at: Instant::now(),
                },
                SearchIntent::Commit,
                SearchIntent::SetItems(vec![json!({"name": "Dan"}), json!({"name": "Zed"})]),
            ],
        );
        assert_eq!(state.filtered(), &[json!({"name": "Dan"})]);
    }

    #[test]
    fn test_commit_without_change_does_not_recompute() {
        let state = SearchState::new(people(), ["name"], DEFAULT_DEBOUNCE);
        let before = state.revision();
        let state = R::reduce(state, SearchIntent::Commit);
        assert_eq!(state.revision(), before);
    }
}
