//! Bounded text fields for questions and answers
//!
//! Lengths count characters, not bytes. Values are stored as given;
//! whitespace-only input counts as empty.

use super::ValidationError;

/// Maximum length for question and answer text
pub const MAX_TEXT_LEN: usize = 100;

/// Maximum length for an answering user's identifier
pub const MAX_USER_ID_LEN: usize = 36;

fn bounded(s: &str, field: &'static str, max: usize) -> Result<String, ValidationError> {
    if s.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if s.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(s.to_owned())
}

macro_rules! bounded_text {
    ($(#[$meta:meta])* $name:ident, $field:literal, $max:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            pub fn new(s: &str) -> Result<Self, ValidationError> {
                bounded(s, $field, $max).map(Self)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

bounded_text!(
    /// Validated question text (1-100 characters)
    ///
    /// ```
    /// use qa_server::models::QuestionText;
    ///
    /// assert!(QuestionText::new("What is Rust?").is_ok());
    /// assert!(QuestionText::new("   ").is_err());
    /// ```
    QuestionText,
    "text",
    MAX_TEXT_LEN
);

bounded_text!(
    /// Validated answer text (1-100 characters)
    AnswerText,
    "text",
    MAX_TEXT_LEN
);

bounded_text!(
    /// Identifier of the answering party (1-36 characters).
    /// Not checked against any user registry.
    UserId,
    "user_id",
    MAX_USER_ID_LEN
);

/// Validated input for a new answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnswer {
    pub user_id: UserId,
    pub text: AnswerText,
}

impl NewAnswer {
    pub fn new(user_id: &str, text: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            user_id: UserId::new(user_id)?,
            text: AnswerText::new(text)?,
        })
    }
}
