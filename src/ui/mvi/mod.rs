//! Model-View-Intent (MVI) primitives.
//!
//! Every piece of client-side state (fetch status, search, form editing)
//! changes only through a reducer:
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! - **State**: Self-contained snapshot a view renders from
//! - **Intent**: User input, timer ticks, or network outcomes
//! - **Reducer**: Pure function that transforms state based on intents

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
