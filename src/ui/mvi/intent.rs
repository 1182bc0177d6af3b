//! Base trait for intents in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (typing a query, editing a form field)
/// - System events (API responses, debounce ticks)
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}
