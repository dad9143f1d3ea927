//! Phase chain repository functions.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::phases_sea as phases_adapter;
use crate::domain::view::PhaseSnapshot;
use crate::domain::{ParticipantId, PhaseKind, PhaseNotice};
use crate::entities::game_phases;
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Phase {
    pub id: i64,
    pub game_id: i64,
    pub kind: PhaseKind,
    pub title: String,
    pub message: String,
    pub deadline: OffsetDateTime,
    pub eliminated: Option<ParticipantId>,
    pub follows_phase_id: Option<i64>,
}

impl Phase {
    pub fn snapshot(&self) -> PhaseSnapshot {
        PhaseSnapshot {
            kind: self.kind,
            title: self.title.clone(),
            message: self.message.clone(),
            deadline: self.deadline,
            eliminated: self.eliminated,
        }
    }
}

impl From<game_phases::Model> for Phase {
    fn from(model: game_phases::Model) -> Self {
        Self {
            id: model.id,
            game_id: model.game_id,
            kind: model.kind,
            title: model.title,
            message: model.message,
            deadline: model.deadline,
            eliminated: model.eliminated_participant_id,
            follows_phase_id: model.follows_phase_id,
        }
    }
}

/// Next link of a game's phase chain.
#[derive(Debug, Clone)]
pub struct NewPhase {
    pub kind: PhaseKind,
    pub notice: PhaseNotice,
    pub deadline: OffsetDateTime,
    pub eliminated: Option<ParticipantId>,
}

impl NewPhase {
    pub fn new(kind: PhaseKind, notice: PhaseNotice, deadline: OffsetDateTime) -> Self {
        Self {
            kind,
            notice,
            deadline,
            eliminated: None,
        }
    }

    pub fn eliminating(mut self, participant_id: ParticipantId) -> Self {
        self.eliminated = Some(participant_id);
        self
    }
}

/// Append a phase after `follows` (`None` only for the first phase).
///
/// A second successor for the same phase violates `ux_game_phases_follows`
/// and surfaces as an optimistic-lock conflict.
pub async fn append_phase<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    follows: Option<i64>,
    phase: NewPhase,
) -> Result<Phase, DomainError> {
    let dto = phases_adapter::PhaseCreate {
        game_id,
        kind: phase.kind,
        title: phase.notice.title,
        message: phase.notice.message,
        deadline: phase.deadline,
        eliminated_participant_id: phase.eliminated,
        follows_phase_id: follows,
    };
    let created = phases_adapter::create_phase(conn, dto).await?;
    Ok(Phase::from(created))
}

/// The most recently created phase of the game.
pub async fn require_current<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Phase, DomainError> {
    phases_adapter::find_current(conn, game_id)
        .await?
        .map(Phase::from)
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Phase,
                format!("Game {game_id} has no phase"),
            )
        })
}

pub async fn list_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<Phase>, DomainError> {
    let phases = phases_adapter::list_by_game(conn, game_id).await?;
    Ok(phases.into_iter().map(Phase::from).collect())
}

pub async fn count_phases<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<usize, DomainError> {
    let n = phases_adapter::count_by_game(conn, game_id, None).await?;
    Ok(n as usize)
}

pub async fn count_of_kind<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    kind: PhaseKind,
) -> Result<usize, DomainError> {
    let n = phases_adapter::count_by_game(conn, game_id, Some(kind)).await?;
    Ok(n as usize)
}

pub async fn add_runoff_candidates<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    phase_id: i64,
    candidates: &[ParticipantId],
) -> Result<(), DomainError> {
    Ok(phases_adapter::insert_runoff_candidates(conn, phase_id, candidates).await?)
}

/// Candidates of a runoff JUDGEMENT; empty for any other phase.
pub async fn runoff_candidates<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    phase_id: i64,
) -> Result<Vec<ParticipantId>, DomainError> {
    Ok(phases_adapter::list_runoff_candidates(conn, phase_id).await?)
}
