//! Presentation primitives: MVI traits shared by every state machine in the
//! crate, and the terminal form view.

pub mod form;
pub mod mvi;
pub mod theme;

pub use form::{buffer_lines, draw_form, FormView};
