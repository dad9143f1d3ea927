//! DTOs for phases_sea adapter.

use time::OffsetDateTime;

use crate::entities::game_phases::PhaseKind;

/// DTO for appending a phase to a game's chain.
#[derive(Debug, Clone)]
pub struct PhaseCreate {
    pub game_id: i64,
    pub kind: PhaseKind,
    pub title: String,
    pub message: String,
    pub deadline: OffsetDateTime,
    pub eliminated_participant_id: Option<i64>,
    /// `None` only for the game's first phase.
    pub follows_phase_id: Option<i64>,
}
