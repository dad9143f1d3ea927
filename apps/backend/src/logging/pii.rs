use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Base64-like or hex runs of 16+ chars: bearer tokens, password hashes.
fn token_regex() -> &'static Regex {
    static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"\b[A-Za-z0-9+/]{16,}={0,2}").unwrap()
    });
    &TOKEN_REGEX
}

/// Masks opaque tokens in a string before it reaches the logs.
pub fn redact(input: &str) -> String {
    token_regex()
        .replace_all(input, "[REDACTED_TOKEN]")
        .to_string()
}

/// Wrapper that applies [`redact`] when formatted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_redaction() {
        assert_eq!(
            redact("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9"),
            "[REDACTED_TOKEN]"
        );
        assert_eq!(
            redact("hash a1b2c3d4e5f678901234567890123456 rejected"),
            "hash [REDACTED_TOKEN] rejected"
        );
        assert_eq!(redact("short123"), "short123");
        assert_eq!(
            redact("UNIQUE constraint failed: game_participants.game_id"),
            "UNIQUE constraint failed: game_participants.game_id"
        );
    }

    #[test]
    fn test_redacted_wrapper() {
        let redacted = Redacted("Bearer eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9");
        assert_eq!(format!("{redacted}"), "Bearer [REDACTED_TOKEN]");
        assert_eq!(format!("{redacted:?}"), "Bearer [REDACTED_TOKEN]");
    }

    #[test]
    fn test_plain_messages_untouched() {
        assert_eq!(
            redact("UNIQUE constraint failed: games.name"),
            "UNIQUE constraint failed: games.name"
        );
        assert_eq!(redact(""), "");
    }
}
