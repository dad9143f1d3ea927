//! Input checks that run before any state is touched.

use unicode_normalization::UnicodeNormalization;

use crate::config::game::GameRules;
use crate::errors::domain::{DomainError, ValidationKind};

pub const MAX_TITLE_CHARS: usize = 64;
pub const MAX_WORD_CHARS: usize = 64;
pub const PASSWORD_CHARS: std::ops::RangeInclusive<usize> = 4..=64;
pub const MAX_PER_PAGE: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSettings {
    pub title: String,
    pub password: String,
    pub member_count: i32,
    pub max_turns: i32,
    pub discussion_seconds: i32,
    pub finally_releasing: bool,
}

fn settings_error(detail: impl Into<String>) -> DomainError {
    DomainError::validation(ValidationKind::InvalidGameSettings, detail)
}

/// Validates and normalises new-game settings.
pub fn validate_settings(mut settings: GameSettings, rules: &GameRules) -> Result<GameSettings, DomainError> {
    settings.title = settings.title.trim().to_string();
    let title_len = settings.title.chars().count();
    if title_len == 0 || title_len > MAX_TITLE_CHARS {
        return Err(settings_error(format!(
            "Title must be 1 to {MAX_TITLE_CHARS} characters"
        )));
    }
    if !PASSWORD_CHARS.contains(&settings.password.chars().count()) {
        return Err(settings_error(format!(
            "Password must be {} to {} characters",
            PASSWORD_CHARS.start(),
            PASSWORD_CHARS.end()
        )));
    }
    if !rules.member_count.contains(&settings.member_count) {
        return Err(settings_error(format!(
            "Member count must be between {} and {}",
            rules.member_count.start(),
            rules.member_count.end()
        )));
    }
    if !rules.max_turns.contains(&settings.max_turns) {
        return Err(settings_error(format!(
            "Max turns must be between {} and {}",
            rules.max_turns.start(),
            rules.max_turns.end()
        )));
    }
    if !rules.discussion_seconds.contains(&settings.discussion_seconds) {
        return Err(settings_error(format!(
            "Discussion time must be between {} and {} seconds",
            rules.discussion_seconds.start(),
            rules.discussion_seconds.end()
        )));
    }
    Ok(settings)
}

/// Trims and NFC-normalises a secret word, then checks its length.
pub fn validate_word(raw: &str) -> Result<String, DomainError> {
    let word: String = raw.trim().nfc().collect();
    let len = word.chars().count();
    if len == 0 || len > MAX_WORD_CHARS {
        return Err(DomainError::validation(
            ValidationKind::InvalidWord,
            format!("Word must be 1 to {MAX_WORD_CHARS} characters"),
        ));
    }
    Ok(word)
}

/// Trims a vote target's public code; it must not be blank.
pub fn validate_vote_target(raw: &str) -> Result<String, DomainError> {
    let code = raw.trim();
    if code.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::InvalidVoteTarget,
            "A vote target is required",
        ));
    }
    Ok(code.to_string())
}

/// Join passwords follow the same length rule as at creation.
pub fn validate_join_password(password: &str) -> Result<(), DomainError> {
    if PASSWORD_CHARS.contains(&password.chars().count()) {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::InvalidPassword,
            format!(
                "Password must be {} to {} characters",
                PASSWORD_CHARS.start(),
                PASSWORD_CHARS.end()
            ),
        ))
    }
}

/// Page numbers start at 1; page sizes are capped.
pub fn validate_page(page: u64, per_page: u64) -> Result<(u64, u64), DomainError> {
    if page == 0 || per_page == 0 || per_page > MAX_PER_PAGE {
        return Err(DomainError::validation(
            ValidationKind::InvalidPagination,
            format!("page must be >= 1 and perPage between 1 and {MAX_PER_PAGE}"),
        ));
    }
    Ok((page, per_page))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> GameSettings {
        GameSettings {
            title: "  Friday night  ".into(),
            password: "wolf".into(),
            member_count: 5,
            max_turns: 3,
            discussion_seconds: 120,
            finally_releasing: true,
        }
    }

    #[test]
    fn test_valid_settings_are_trimmed() {
        let ok = validate_settings(settings(), &GameRules::default()).unwrap();
        assert_eq!(ok.title, "Friday night");
    }

    #[test]
    fn test_out_of_range_settings_are_rejected() {
        let rules = GameRules::default();
        let cases = [
            GameSettings { title: " ".into(), ..settings() },
            GameSettings { title: "x".repeat(65), ..settings() },
            GameSettings { password: "abc".into(), ..settings() },
            GameSettings { member_count: 2, ..settings() },
            GameSettings { member_count: 13, ..settings() },
            GameSettings { max_turns: 0, ..settings() },
            GameSettings { max_turns: 8, ..settings() },
            GameSettings { discussion_seconds: 29, ..settings() },
        ];
        for case in cases {
            let err = validate_settings(case.clone(), &rules).unwrap_err();
            assert!(
                matches!(err, DomainError::Validation(ValidationKind::InvalidGameSettings, _)),
                "{case:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_word_limits_count_characters() {
        assert_eq!(validate_word("  りんご ").unwrap(), "りんご");
        assert!(validate_word("   ").is_err());
        assert!(validate_word(&"語".repeat(64)).is_ok());
        assert!(validate_word(&"語".repeat(65)).is_err());
    }

    #[test]
    fn test_word_is_nfc_normalised() {
        assert_eq!(validate_word("\u{304B}\u{3099}").unwrap(), "\u{304C}");
        assert_eq!(validate_word("cafe\u{301}").unwrap(), "caf\u{E9}");
    }

    #[test]
    fn test_vote_target_must_not_be_blank() {
        assert_eq!(validate_vote_target(" ab12cd ").unwrap(), "ab12cd");
        for blank in ["", "   "] {
            assert!(matches!(
                validate_vote_target(blank),
                Err(DomainError::Validation(ValidationKind::InvalidVoteTarget, _))
            ));
        }
    }

    #[test]
    fn test_join_password_length() {
        assert!(validate_join_password("wolf").is_ok());
        assert!(validate_join_password(&"p".repeat(64)).is_ok());
        for bad in [String::new(), "abc".to_string(), "p".repeat(200)] {
            assert!(matches!(
                validate_join_password(&bad),
                Err(DomainError::Validation(ValidationKind::InvalidPassword, _))
            ));
        }
    }

    #[test]
    fn test_page_bounds() {
        assert!(validate_page(1, 100).is_ok());
        assert!(validate_page(0, 10).is_err());
        assert!(validate_page(1, 101).is_err());
    }
}
