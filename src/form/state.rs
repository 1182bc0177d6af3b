//! Editing state for a create/edit dialog.

use crate::form::field::FieldDescriptor;
use crate::form::values::FormValues;
use crate::ui::mvi::{Intent, Reducer, UiState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

impl FormMode {
    pub fn is_new(&self) -> bool {
        matches!(self, FormMode::Create)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Closed,
    Open {
        mode: FormMode,
        fields: &'static [FieldDescriptor],
        values: FormValues,
        /// Index into `fields`.
        focused: usize,
    },
}

impl FormState {
    pub fn is_open(&self) -> bool {
        matches!(self, FormState::Open { .. })
    }

    pub fn values(&self) -> Option<&FormValues> {
        match self {
            FormState::Open { values, .. } => Some(values),
            FormState::Closed => None,
        }
    }

    pub fn mode(&self) -> Option<&FormMode> {
        match self {
            FormState::Open { mode, .. } => Some(mode),
            FormState::Closed => None,
        }
    }

    pub fn focused(&self) -> Option<usize> {
        match self {
            FormState::Open { focused, .. } => Some(*focused),
            FormState::Closed => None,
        }
    }

    pub fn fields(&self) -> &'static [FieldDescriptor] {
        match self {
            FormState::Open { fields, .. } => fields,
            FormState::Closed => &[],
        }
    }

    /// Name of the focused field.
    pub fn focused_field(&self) -> Option<&'static str> {
        match self {
            FormState::Open {
                fields, focused, ..
            } => fields.get(*focused).map(|f| f.name),
            FormState::Closed => None,
        }
    }
}

impl UiState for FormState {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormIntent {
    /// Open the dialog. Prefill is used as-is; missing fields read as empty.
    Open {
        mode: FormMode,
        fields: &'static [FieldDescriptor],
        prefill: FormValues,
    },
    Change {
        name: String,
        value: String,
    },
    FocusNext,
    FocusPrev,
    Close,
}

impl Intent for FormIntent {}

pub struct FormReducer;

impl Reducer for FormReducer {
    type State = FormState;
    type Intent = FormIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match (state, intent) {
            (_, FormIntent::Open {
                mode,
                fields,
                prefill,
            }) => FormState::Open {
                mode,
                fields,
                values: prefill,
                focused: 0,
            },
            (_, FormIntent::Close) => FormState::Closed,
            (FormState::Closed, _) => FormState::Closed,
            (
                FormState::Open {
                    mode,
                    fields,
                    mut values,
                    focused,
                },
                intent,
            ) => {
                let count = fields.len().max(1);
                let focused = match intent {
                    FormIntent::Change { name, value } => {
                        values.set(name, value);
                        focused
                    }
                    FormIntent::FocusNext => (focused + 1) % count,
                    FormIntent::FocusPrev => (focused + count - 1) % count,
                    FormIntent::Open { .. } | FormIntent::Close => focused,
                };
                FormState::Open {
                    mode,
                    fields,
                    values,
                    focused,
                }
            }
        }
    }
}
