//! Declarative forms: field descriptors, the string value map, rendering,
//! validity checks and editing state.

mod field;
mod render;
mod state;
mod validity;
mod values;

pub use field::{FieldDescriptor, FieldKind, GridSpan};
pub use render::{
    render_field, render_form, ColumnCount, Control, DynamicForm, RenderOptions, RenderedField,
    RenderedForm,
};
pub use state::{FormIntent, FormMode, FormReducer, FormState};
pub use validity::ValidationError;
pub use values::FormValues;
