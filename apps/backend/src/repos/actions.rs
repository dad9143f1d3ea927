//! Participant action and vote repository functions.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::actions_sea as actions_adapter;
use crate::adapters::votes_sea as votes_adapter;
use crate::domain::ParticipantId;
use crate::entities::phase_actions;
use crate::errors::domain::DomainError;

pub use actions_adapter::ActionSeed;

#[derive(Debug, Clone, PartialEq)]
pub struct PhaseAction {
    pub id: i64,
    pub phase_id: i64,
    pub participant_id: ParticipantId,
    pub completed: bool,
    pub completed_at: Option<OffsetDateTime>,
}

impl PhaseAction {
    /// Seeded as completed for a participant who takes no part in the phase.
    pub fn is_exempt(&self) -> bool {
        self.completed && self.completed_at.is_none()
    }
}

impl From<phase_actions::Model> for PhaseAction {
    fn from(model: phase_actions::Model) -> Self {
        Self {
            id: model.id,
            phase_id: model.phase_id,
            participant_id: model.participant_id,
            completed: model.completed,
            completed_at: model.completed_at,
        }
    }
}

pub async fn seed_actions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    phase_id: i64,
    seeds: &[ActionSeed],
) -> Result<(), DomainError> {
    Ok(actions_adapter::seed_actions(conn, phase_id, seeds).await?)
}

pub async fn find_action<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    phase_id: i64,
    participant_id: ParticipantId,
) -> Result<Option<PhaseAction>, DomainError> {
    let action = actions_adapter::find_action(conn, phase_id, participant_id).await?;
    Ok(action.map(PhaseAction::from))
}

pub async fn list_actions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    phase_id: i64,
) -> Result<Vec<PhaseAction>, DomainError> {
    let actions = actions_adapter::list_by_phase(conn, phase_id).await?;
    Ok(actions.into_iter().map(PhaseAction::from).collect())
}

/// Mark the action completed. `false` means it already was.
pub async fn complete_action<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    action_id: i64,
    at: OffsetDateTime,
) -> Result<bool, DomainError> {
    let changed = actions_adapter::complete_action(conn, action_id, at).await?;
    Ok(changed == 1)
}

/// `(completed, expected)` for the phase.
pub async fn completion_counts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    phase_id: i64,
) -> Result<(usize, usize), DomainError> {
    let actions = list_actions(conn, phase_id).await?;
    let completed = actions.iter().filter(|a| a.completed).count();
    Ok((completed, actions.len()))
}

pub async fn record_vote<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    phase_id: i64,
    action_id: i64,
    target: ParticipantId,
) -> Result<(), DomainError> {
    votes_adapter::insert_vote(conn, phase_id, action_id, target).await?;
    Ok(())
}

pub async fn vote_targets<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    phase_id: i64,
) -> Result<Vec<ParticipantId>, DomainError> {
    Ok(votes_adapter::list_targets(conn, phase_id).await?)
}
