/// Closed set of input kinds a descriptor can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldKind {
    #[default]
    Text,
    Number,
    Url,
    Email,
    /// Multi-line free text.
    Textarea,
}

impl FieldKind {
    /// Input type of the single-line control, as an HTML-style name.
    pub fn input_type(self) -> &'static str {
        match self {
            FieldKind::Text | FieldKind::Textarea => "text",
            FieldKind::Number => "number",
            FieldKind::Url => "url",
            FieldKind::Email => "email",
        }
    }

    pub fn is_multiline(self) -> bool {
        matches!(self, FieldKind::Textarea)
    }
}

/// How many grid columns a field occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridSpan {
    #[default]
    Single,
    Double,
}

impl GridSpan {
    pub fn columns(self) -> u16 {
        match self {
            GridSpan::Single => 1,
            GridSpan::Double => 2,
        }
    }
}

/// Declarative description of one form input.
///
/// Descriptor lists are `const` so an entity declares its form once:
///
/// ```
/// use turfdesk::form::{FieldDescriptor, FieldKind};
///
/// const FIELDS: &[FieldDescriptor] = &[
///     FieldDescriptor::new("email", "Email", FieldKind::Email).required(),
///     FieldDescriptor::new("bio", "Bio", FieldKind::Textarea).wide(),
/// ];
/// assert!(FIELDS[0].required);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub placeholder: Option<&'static str>,
    pub required: bool,
    pub span: GridSpan,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            placeholder: None,
            required: false,
            span: GridSpan::Single,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Span both grid columns.
    pub const fn wide(mut self) -> Self {
        self.span = GridSpan::Double;
        self
    }
}
