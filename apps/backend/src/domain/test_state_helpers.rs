//! Roster and view builders shared by the domain tests.

use time::{Duration, OffsetDateTime};

use super::phase::{GameStatus, PhaseKind};
use super::roster::RosterEntry;
use super::view::{GameHeader, PhaseSnapshot, UserSummary};

/// Living villager with a word; participant ids start at 1.
pub fn entry(id: i64, name: &str) -> RosterEntry {
    RosterEntry {
        participant_id: id,
        user_id: 100 + id,
        code: format!("u{id}"),
        name: name.to_string(),
        secret_word: Some(format!("word-{name}")),
        is_wolf: false,
        is_died: false,
    }
}

pub fn wolf(mut e: RosterEntry) -> RosterEntry {
    e.is_wolf = true;
    e
}

pub fn dead(mut e: RosterEntry) -> RosterEntry {
    e.is_died = true;
    e
}

pub fn header(status: GameStatus, finally_releasing: bool) -> GameHeader {
    GameHeader {
        name: "abc-def-ghj".into(),
        title: "Test game".into(),
        host: UserSummary {
            code: "u1".into(),
            name: "Aki".into(),
        },
        max_members: 5,
        max_turns: 3,
        discussion_seconds: 120,
        finally_releasing,
        status,
    }
}

pub fn phase(kind: PhaseKind, now: OffsetDateTime, secs: i64) -> PhaseSnapshot {
    PhaseSnapshot {
        kind,
        title: kind.as_str().to_string(),
        message: String::new(),
        deadline: now + Duration::seconds(secs),
        eliminated: None,
    }
}
