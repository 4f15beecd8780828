use serde::Serialize;
use thiserror::Error;

/// One failing form field and the message shown next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {}", summarize(.0))]
    Validation(Vec<FieldError>),
    #[error("decode error: {0}")]
    Decode(String),
}

impl ModelError {
    /// Field errors carried by a validation failure, empty otherwise.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation(errors) => errors,
            Self::Decode(_) => &[],
        }
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_every_field() {
        let err = ModelError::Validation(vec![
            FieldError::new("title", "Title must be at least 2 characters."),
            FieldError::new("icon", "Icon is required."),
        ]);
        assert_eq!(
            err.to_string(),
            "validation error: title: Title must be at least 2 characters.; icon: Icon is required."
        );
        assert_eq!(err.field_errors().len(), 2);
    }
}
