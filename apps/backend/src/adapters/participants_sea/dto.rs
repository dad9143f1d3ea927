//! DTOs for participants_sea adapter.

#[derive(Debug, Clone, Copy)]
pub struct ParticipantCreate {
    pub game_id: i64,
    pub user_id: i64,
}

impl ParticipantCreate {
    pub fn new(game_id: i64, user_id: i64) -> Self {
        Self { game_id, user_id }
    }
}
