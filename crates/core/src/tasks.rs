//! Task text and category validation.
//!
//! Form input is trimmed before any rule is applied, so whitespace-only
//! text counts as empty. Length limits are measured in characters and match
//! the column widths of the `tasks` table.

use validator::{Validate, ValidationErrors};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of task text in characters (`VARCHAR(255)`).
pub const MAX_TASK_LENGTH: usize = 255;

/// Maximum length of a category label in characters (`VARCHAR(64)`).
pub const MAX_CATEGORY_LENGTH: usize = 64;

// ---------------------------------------------------------------------------
// Validated input
// ---------------------------------------------------------------------------

/// Task fields that passed validation and are ready to be written.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct TaskInput {
    #[validate(length(max = 255, message = "Task text exceeds maximum length of 255 characters"))]
    pub text: String,
    #[validate(length(max = 64, message = "Category exceeds maximum length of 64 characters"))]
    pub category: Option<String>,
}

impl TaskInput {
    /// Trim and validate raw form values.
    ///
    /// A blank category becomes `None`. Empty or whitespace-only text and
    /// over-length values are rejected with [`CoreError::Validation`].
    pub fn parse(text: &str, category: Option<&str>) -> Result<Self, CoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CoreError::Validation("Task text cannot be empty".to_string()));
        }

        let input = TaskInput {
            text: text.to_string(),
            category: normalize_category(category),
        };
        input
            .validate()
            .map_err(|e| CoreError::Validation(describe(&e)))?;
        Ok(input)
    }
}

/// Trim a category value, mapping blank input to `None`.
pub fn normalize_category(category: Option<&str>) -> Option<String> {
    category
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

/// Flatten validator errors into a single human-readable message.
fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
