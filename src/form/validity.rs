//! Control-level validity checks run before a form is submitted.

use thiserror::Error;

use crate::form::field::FieldKind;
use crate::form::render::{RenderedField, RenderedForm};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{label} is required")]
    Required { field: String, label: String },

    #[error("{label} must be a number, got '{value}'")]
    NotANumber {
        field: String,
        label: String,
        value: String,
    },

    #[error("{label} must be an http(s) URL, got '{value}'")]
    InvalidUrl {
        field: String,
        label: String,
        value: String,
    },

    #[error("{label} must be an email address, got '{value}'")]
    InvalidEmail {
        field: String,
        label: String,
        value: String,
    },
}

impl ValidationError {
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field, .. }
            | ValidationError::NotANumber { field, .. }
            | ValidationError::InvalidUrl { field, .. }
            | ValidationError::InvalidEmail { field, .. } => field,
        }
    }
}

fn is_email(value: &str) -> bool {
    let mut parts = value.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => !local.is_empty() && !domain.is_empty(),
        _ => false,
    }
}

fn is_url(value: &str) -> bool {
    ["http://", "https://"]
        .iter()
        .any(|scheme| value.len() > scheme.len() && value.starts_with(scheme))
}

impl RenderedField {
    /// Check the control's current value. Empty optional fields are valid.
    pub fn validity(&self) -> Result<(), ValidationError> {
        let value = self.value.trim();
        let field = self.name.to_string();
        let label = self.label.trim_end_matches(" *").to_string();

        if value.is_empty() {
            if self.required {
                return Err(ValidationError::Required { field, label });
            }
            return Ok(());
        }

        let value = value.to_string();
        match self.kind {
            FieldKind::Number if value.parse::<f64>().is_err() => {
                Err(ValidationError::NotANumber {
                    field,
                    label,
                    value,
                })
            }
            FieldKind::Url if !is_url(&value) => Err(ValidationError::InvalidUrl {
                field,
                label,
                value,
            }),
            FieldKind::Email if !is_email(&value) => Err(ValidationError::InvalidEmail {
                field,
                label,
                value,
            }),
            _ => Ok(()),
        }
    }
}

impl RenderedForm {
    /// Every failing control, in display order.
    pub fn check_validity(&self) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<_> = self
            .fields
            .iter()
            .filter_map(|field| field.validity().err())
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
