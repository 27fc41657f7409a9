//! Free-text validation and normalization
//!
//! Every free-text field (book fields, member names, search criteria) passes
//! through here before entering the domain.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AppError, AppResult};

/// Letters, digits, spaces, commas and periods; at least one character.
static FREE_TEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9.,\s]+$").unwrap());

/// Reject text containing disallowed characters (or nothing at all)
pub fn validate_free_text(text: &str) -> AppResult<()> {
    if text.trim().is_empty() {
        return Err(AppError::InvalidInput("empty input".to_string()));
    }
    if !FREE_TEXT.is_match(text) {
        return Err(AppError::InvalidInput(format!(
            "'{}' contains disallowed characters",
            text.trim()
        )));
    }
    Ok(())
}

/// Trim, collapse whitespace runs, and title-case each word
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.extend(chars.flat_map(|c| c.to_lowercase()));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_letters_digits_punctuation() {
        assert!(validate_free_text("El Quijote, tomo 1.").is_ok());
        assert!(validate_free_text("Alfaguara").is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_and_blank() {
        assert!(matches!(
            validate_free_text(""),
            Err(AppError::InvalidInput(_))
        ));
        assert!(validate_free_text("   ").is_err());
    }

    #[test]
    fn test_validate_rejects_disallowed_characters() {
        assert!(validate_free_text("drop; table").is_err());
        assert!(validate_free_text("hola!").is_err());
        assert!(validate_free_text("a-b").is_err());
    }

    #[test]
    fn test_normalize_title_cases_words() {
        assert_eq!(normalize("el quijote"), "El Quijote");
        assert_eq!(normalize("  GABRIEL   garcia  MARQUEZ "), "Gabriel Garcia Marquez");
        assert_eq!(normalize(""), "");
    }
}
