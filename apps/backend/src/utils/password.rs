//! Join passwords.
//!
//! Stored as a keyed BLAKE3 hash: the key is derived from the server pepper
//! and the game name salts the input, so equal passwords in different games
//! hash differently.

const KEY_CONTEXT: &str = "wordwolf 2026-09 game join password";

fn password_key(pepper: &[u8]) -> [u8; 32] {
    blake3::derive_key(KEY_CONTEXT, pepper)
}

fn keyed(pepper: &[u8], game_name: &str, password: &str) -> blake3::Hash {
    let mut hasher = blake3::Hasher::new_keyed(&password_key(pepper));
    hasher.update(game_name.as_bytes());
    hasher.update(b"\0");
    hasher.update(password.as_bytes());
    hasher.finalize()
}

/// Hex-encoded hash suitable for `games.password_hash`.
pub fn hash_join_password(pepper: &[u8], game_name: &str, password: &str) -> String {
    keyed(pepper, game_name, password).to_hex().to_string()
}

/// Constant-time check of `password` against a stored hash. A stored value
/// that is not a valid hash never matches.
pub fn verify_join_password(pepper: &[u8], game_name: &str, password: &str, stored: &str) -> bool {
    match blake3::Hash::from_hex(stored) {
        Ok(expected) => keyed(pepper, game_name, password) == expected,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verifies() {
        let stored = hash_join_password(b"pepper", "abc-def-ghj", "secret");
        assert_eq!(stored.len(), 64);
        assert!(verify_join_password(b"pepper", "abc-def-ghj", "secret", &stored));
    }

    #[test]
    fn test_wrong_password_pepper_or_game_fails() {
        let stored = hash_join_password(b"pepper", "abc-def-ghj", "secret");
        assert!(!verify_join_password(b"pepper", "abc-def-ghj", "Secret", &stored));
        assert!(!verify_join_password(b"other", "abc-def-ghj", "secret", &stored));
        assert!(!verify_join_password(b"pepper", "abc-def-ghk", "secret", &stored));
    }

    #[test]
    fn test_same_password_differs_per_game() {
        assert_ne!(
            hash_join_password(b"pepper", "aaa-aaa-aaa", "secret"),
            hash_join_password(b"pepper", "bbb-bbb-bbb", "secret")
        );
    }

    #[test]
    fn test_garbage_stored_hash_never_matches() {
        assert!(!verify_join_password(b"pepper", "abc-def-ghj", "secret", "not-hex"));
    }
}
