//! crates/trivia_core/src/validation.rs
//!
//! Input shape checks that run before any store access.

use crate::domain::NewQuestion;

/// A scalar field as clients send it. Browsers post select values as strings,
/// scripted clients send integers; both are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawField {
    Integer(i64),
    Text(String),
}

impl RawField {
    fn is_blank(&self) -> bool {
        matches!(self, RawField::Text(text) if text.trim().is_empty())
    }

    /// Reads the field as an integer, accepting numeric strings.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RawField::Integer(value) => Some(*value),
            RawField::Text(text) => text.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("field `{0}` is required")]
    Missing(&'static str),
    #[error("field `{0}` must not be empty")]
    Empty(&'static str),
    #[error("field `{0}` must be an integer")]
    NotAnInteger(&'static str),
}

/// An unvalidated create-question payload.
#[derive(Debug, Clone, Default)]
pub struct QuestionDraft {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub difficulty: Option<RawField>,
    pub category: Option<RawField>,
}

impl QuestionDraft {
    /// Checks that every required field is present and non-empty.
    pub fn validate(self) -> Result<NewQuestion, ValidationError> {
        let question = required_text("question", self.question)?;
        let answer = required_text("answer", self.answer)?;
        let difficulty = required_integer("difficulty", self.difficulty)?;
        let difficulty =
            i32::try_from(difficulty).map_err(|_| ValidationError::NotAnInteger("difficulty"))?;
        let category = required_integer("category", self.category)?;

        Ok(NewQuestion {
            question,
            answer,
            difficulty,
            category,
        })
    }
}

fn required_text(name: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::Missing(name))?;
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(name));
    }
    Ok(value)
}

fn required_integer(
    name: &'static str,
    value: Option<RawField>,
) -> Result<i64, ValidationError> {
    let value = value.ok_or(ValidationError::Missing(name))?;
    if value.is_blank() {
        return Err(ValidationError::Empty(name));
    }
    value.as_i64().ok_or(ValidationError::NotAnInteger(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> QuestionDraft {
        QuestionDraft {
            question: Some("What is the largest lake in Africa?".to_string()),
            answer: Some("Lake Victoria".to_string()),
            difficulty: Some(RawField::Integer(2)),
            category: Some(RawField::Integer(3)),
        }
    }

    #[test]
    fn accepts_a_fully_populated_draft() {
        let question = complete().validate().expect("draft is complete");
        assert_eq!(question.answer, "Lake Victoria");
        assert_eq!(question.difficulty, 2);
        assert_eq!(question.category, 3);
    }

    #[test]
    fn accepts_numeric_strings() {
        let draft = QuestionDraft {
            difficulty: Some(RawField::Text("4".to_string())),
            category: Some(RawField::Text(" 1 ".to_string())),
            ..complete()
        };
        let question = draft.validate().expect("numeric strings are fine");
        assert_eq!(question.difficulty, 4);
        assert_eq!(question.category, 1);
    }

    #[test]
    fn rejects_empty_text_fields() {
        let draft = QuestionDraft {
            question: Some(String::new()),
            ..complete()
        };
        assert_eq!(draft.validate(), Err(ValidationError::Empty("question")));

        let draft = QuestionDraft {
            answer: Some("   ".to_string()),
            ..complete()
        };
        assert_eq!(draft.validate(), Err(ValidationError::Empty("answer")));
    }

    #[test]
    fn rejects_empty_numeric_fields() {
        let draft = QuestionDraft {
            difficulty: Some(RawField::Text(String::new())),
            ..complete()
        };
        assert_eq!(draft.validate(), Err(ValidationError::Empty("difficulty")));

        let draft = QuestionDraft {
            category: Some(RawField::Text(String::new())),
            ..complete()
        };
        assert_eq!(draft.validate(), Err(ValidationError::Empty("category")));
    }

    #[test]
    fn rejects_missing_fields() {
        let draft = QuestionDraft {
            category: None,
            ..complete()
        };
        assert_eq!(draft.validate(), Err(ValidationError::Missing("category")));
        assert_eq!(
            QuestionDraft::default().validate(),
            Err(ValidationError::Missing("question"))
        );
    }

    #[test]
    fn rejects_non_numeric_values() {
        let draft = QuestionDraft {
            difficulty: Some(RawField::Text("hard".to_string())),
            ..complete()
        };
        assert_eq!(
            draft.validate(),
            Err(ValidationError::NotAnInteger("difficulty"))
        );

        let draft = QuestionDraft {
            difficulty: Some(RawField::Integer(i64::MAX)),
            ..complete()
        };
        assert_eq!(
            draft.validate(),
            Err(ValidationError::NotAnInteger("difficulty"))
        );
    }
}
