//! Domain models with validation at construction
//!
//! All client input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod entities;
pub mod text;
pub mod validation;

pub use entities::{Answer, Question, QuestionRow};
pub use text::{AnswerText, NewAnswer, QuestionText, UserId};
pub use validation::ValidationError;
