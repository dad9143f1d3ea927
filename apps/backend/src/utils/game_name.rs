//! Public game names.
//!
//! Names look like `k3m-9qa-x0z`: three groups of three characters drawn
//! from lowercase Crockford Base32.

use rand::Rng;

const CROCKFORD: &[u8] = b"0123456789abcdefghjkmnpqrstvwxyz"; // no i, l, o, u

pub const GAME_NAME_LEN: usize = 11;

pub fn generate_game_name() -> String {
    let mut rng = rand::rng();

    let mut s = String::with_capacity(GAME_NAME_LEN);
    for group in 0..3 {
        if group > 0 {
            s.push('-');
        }
        for _ in 0..3 {
            s.push(CROCKFORD[rng.random_range(0..CROCKFORD.len())] as char);
        }
    }
    s
}

/// Cheap shape check used before hitting the database with a path parameter.
pub fn is_game_name(candidate: &str) -> bool {
    candidate.len() == GAME_NAME_LEN
        && candidate.split('-').count() == 3
        && candidate
            .split('-')
            .all(|g| g.len() == 3 && g.bytes().all(|b| CROCKFORD.contains(&b)))
}
