//! DTOs for actions_sea adapter.

/// One row to seed when a phase opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSeed {
    pub participant_id: i64,
    /// Seeded as done for participants who take no part in the phase.
    pub completed: bool,
}

impl ActionSeed {
    pub fn pending(participant_id: i64) -> Self {
        Self {
            participant_id,
            completed: false,
        }
    }

    pub fn exempt(participant_id: i64) -> Self {
        Self {
            participant_id,
            completed: true,
        }
    }
}
