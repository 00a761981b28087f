//! Request field checks shared by the document handlers.

use crate::ai::MAX_QUIZ_QUESTIONS;
use crate::db::models::document::TITLE_MAX_CHARS;
use crate::error::AppError;

pub const NO_TEXT_MESSAGE: &str =
    "No extracted text available. Please upload and process a PDF first.";

/// Trimmed title, or `None` when the client left it blank.
pub fn title(raw: Option<&str>) -> Result<Option<String>, AppError> {
    let Some(t) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };
    let len = t.chars().count();
    if len > TITLE_MAX_CHARS {
        return Err(AppError::Validation(format!(
            "Ensure the title has no more than {TITLE_MAX_CHARS} characters (it has {len})."
        )));
    }
    Ok(Some(t.to_string()))
}

/// Fit a filename-derived title into the column limit.
pub fn clamp_title(t: String) -> String {
    if t.chars().count() <= TITLE_MAX_CHARS {
        t
    } else {
        t.chars().take(TITLE_MAX_CHARS).collect()
    }
}

pub fn num_questions(n: u32) -> Result<u32, AppError> {
    if (1..=MAX_QUIZ_QUESTIONS).contains(&n) {
        Ok(n)
    } else {
        Err(AppError::Validation(format!(
            "num_questions must be between 1 and {MAX_QUIZ_QUESTIONS}."
        )))
    }
}

pub fn question(raw: Option<&str>) -> Result<String, AppError> {
    raw.map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::Validation("A 'question' field is required.".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_title_is_none() {
        assert!(title(None).unwrap().is_none());
        assert!(title(Some("   ")).unwrap().is_none());
        assert_eq!(title(Some(" Biology ")).unwrap().as_deref(), Some("Biology"));
    }

    #[test]
    fn test_long_title_rejected() {
        let long = "x".repeat(TITLE_MAX_CHARS + 1);
        assert!(title(Some(&long)).is_err());
        let exact = "x".repeat(TITLE_MAX_CHARS);
        assert!(title(Some(&exact)).is_ok());
    }

    #[test]
    fn test_clamp_title() {
        assert_eq!(clamp_title("short".into()), "short");
        assert_eq!(clamp_title("é".repeat(300)).chars().count(), TITLE_MAX_CHARS);
    }

    #[test]
    fn test_num_questions_bounds() {
        assert!(num_questions(0).is_err());
        assert_eq!(num_questions(1).unwrap(), 1);
        assert_eq!(num_questions(MAX_QUIZ_QUESTIONS).unwrap(), MAX_QUIZ_QUESTIONS);
        assert!(num_questions(MAX_QUIZ_QUESTIONS + 1).is_err());
    }

    #[test]
    fn test_question_required() {
        assert!(question(None).is_err());
        assert!(question(Some("  ")).is_err());
        assert_eq!(question(Some(" Why? ")).unwrap(), "Why?");
    }
}
