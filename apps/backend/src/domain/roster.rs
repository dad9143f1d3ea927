//! The participants of one game as the rules see them.

pub type ParticipantId = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub participant_id: ParticipantId,
    pub user_id: i64,
    pub code: String,
    pub name: String,
    pub secret_word: Option<String>,
    pub is_wolf: bool,
    pub is_died: bool,
}

impl RosterEntry {
    pub fn is_alive(&self) -> bool {
        !self.is_died
    }
}

pub fn living(roster: &[RosterEntry]) -> impl Iterator<Item = &RosterEntry> {
    roster.iter().filter(|p| p.is_alive())
}

pub fn living_ids(roster: &[RosterEntry]) -> Vec<ParticipantId> {
    living(roster).map(|p| p.participant_id).collect()
}

pub fn living_wolf_count(roster: &[RosterEntry]) -> usize {
    living(roster).filter(|p| p.is_wolf).count()
}

pub fn find(roster: &[RosterEntry], participant_id: ParticipantId) -> Option<&RosterEntry> {
    roster.iter().find(|p| p.participant_id == participant_id)
}

pub fn find_by_code<'a>(roster: &'a [RosterEntry], code: &str) -> Option<&'a RosterEntry> {
    roster.iter().find(|p| p.code == code)
}

/// Whether the wolf role should be dealt now. Roles are dealt once, and only
/// while the game has fewer than `window` phases.
pub fn should_assign_roles(roster: &[RosterEntry], phase_count: usize, window: usize) -> bool {
    phase_count < window && !roster.iter().any(|p| p.is_wolf)
}
