//! Task text validation
//!
//! Task text is trimmed before storage and must be 1..=255 characters.

use super::ValidationError;

/// Maximum length for task text, in characters
pub const MAX_TASK_LEN: usize = 255;

/// Validated, trimmed task text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskText(String);

impl TaskText {
    /// Create task text, trimming surrounding whitespace.
    ///
    /// # Rules
    /// - Non-empty after trimming
    /// - At most 255 characters after trimming
    ///
    /// # Example
    /// ```
    /// use todoctl_server::models::TaskText;
    ///
    /// assert_eq!(TaskText::new("  buy milk ").unwrap().as_str(), "buy milk");
    /// assert!(TaskText::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "task" });
        }

        if trimmed.chars().count() > MAX_TASK_LEN {
            return Err(ValidationError::TooLong {
                field: "task",
                max: MAX_TASK_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Get the task text as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
