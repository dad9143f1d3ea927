//! DTOs for games_sea adapter.

use time::OffsetDateTime;

use crate::entities::games::GameStatus;

/// DTO for creating a new game.
#[derive(Debug, Clone)]
pub struct GameCreate {
    pub name: String,
    pub title: String,
    pub host_id: i64,
    pub password_hash: String,
    pub max_members: i32,
    pub max_turns: i32,
    pub discussion_seconds: i32,
    pub finally_releasing: bool,
    pub deadline: OffsetDateTime,
}

/// Status change guarded by the game's version.
#[derive(Debug, Clone, Copy)]
pub struct GameStatusUpdate {
    pub id: i64,
    pub status: GameStatus,
    pub expected_version: i32,
}

impl GameStatusUpdate {
    pub fn new(id: i64, status: GameStatus, expected_version: i32) -> Self {
        Self {
            id,
            status,
            expected_version,
        }
    }
}
