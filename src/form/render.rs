//! Descriptor-driven form rendering.
//!
//! [`render_form`] is pure: it maps descriptors and the current value map to
//! a [`RenderedForm`] that a view (see `ui::form`) draws. Edits come back
//! through [`DynamicForm::input`], which funnels every change into a single
//! `(name, value)` callback.

use crate::form::field::{FieldDescriptor, FieldKind, GridSpan};
use crate::form::values::FormValues;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnCount {
    One,
    #[default]
    Two,
}

impl ColumnCount {
    pub fn get(self) -> u16 {
        match self {
            ColumnCount::One => 1,
            ColumnCount::Two => 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Prepended to each field name to form the control id.
    pub id_prefix: String,
    pub columns: ColumnCount,
}

impl RenderOptions {
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    pub fn with_columns(mut self, columns: ColumnCount) -> Self {
        self.columns = columns;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    SingleLine { input_type: &'static str },
    MultiLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedField {
    pub id: String,
    pub name: &'static str,
    /// Descriptor label, suffixed with ` *` when required.
    pub label: String,
    pub control: Control,
    pub kind: FieldKind,
    pub value: String,
    pub placeholder: Option<&'static str>,
    pub required: bool,
    pub span: GridSpan,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedForm {
    pub columns: ColumnCount,
    pub fields: Vec<RenderedField>,
}

impl RenderedForm {
    pub fn field(&self, name: &str) -> Option<&RenderedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_by_id(&self, id: &str) -> Option<&RenderedField> {
        self.fields.iter().find(|f| f.id == id)
    }
}

pub fn render_field(field: &FieldDescriptor, value: &str, id_prefix: &str) -> RenderedField {
    let label = if field.required {
        format!("{} *", field.label)
    } else {
        field.label.to_string()
    };
    let control = if field.kind.is_multiline() {
        Control::MultiLine
    } else {
        Control::SingleLine {
            input_type: field.kind.input_type(),
        }
    };

    RenderedField {
        id: format!("{}{}", id_prefix, field.name),
        name: field.name,
        label,
        control,
        kind: field.kind,
        value: value.to_string(),
        placeholder: field.placeholder,
        required: field.required,
        span: field.span,
    }
}

pub fn render_form(
    fields: &[FieldDescriptor],
    values: &FormValues,
    options: &RenderOptions,
) -> RenderedForm {
    RenderedForm {
        columns: options.columns,
        fields: fields
            .iter()
            .map(|field| render_field(field, values.get(field.name), &options.id_prefix))
            .collect(),
    }
}

/// A form bound to its descriptors, values and change callback.
pub struct DynamicForm<'a, F>
where
    F: FnMut(&str, &str),
{
    fields: &'a [FieldDescriptor],
    values: &'a FormValues,
    on_change: F,
    options: RenderOptions,
}

impl<'a, F> DynamicForm<'a, F>
where
    F: FnMut(&str, &str),
{
    pub fn new(fields: &'a [FieldDescriptor], values: &'a FormValues, on_change: F) -> Self {
        Self {
            fields,
            values,
            on_change,
            options: RenderOptions::default(),
        }
    }

    pub fn options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn render(&self) -> RenderedForm {
        render_form(self.fields, self.values, &self.options)
    }

    /// Route an edit on control `id` to the callback.
    ///
    /// Returns false when no control has that id.
    pub fn input(&mut self, id: &str, value: &str) -> bool {
        let prefix = self.options.id_prefix.as_str();
        let Some(field) = self
            .fields
            .iter()
            .find(|f| id.strip_prefix(prefix) == Some(f.name))
        else {
            return false;
        };
        (self.on_change)(field.name, value);
        true
    }
}
