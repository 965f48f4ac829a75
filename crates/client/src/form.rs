//! Validation applied on the form path before anything is sent.

use std::fmt;

use crate::ProductDraft;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// Name, description and category must be non-blank; price must be positive.
pub fn validate_draft(draft: &ProductDraft) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    let required = [
        ("name", &draft.name),
        ("description", &draft.description),
        ("category", &draft.category),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            errors.push(FieldError {
                field,
                message: "is required",
            });
        }
    }

    if draft.price.is_nan() || draft.price <= 0.0 {
        errors.push(FieldError {
            field: "price",
            message: "must be greater than zero",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
