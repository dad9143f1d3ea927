//! Phase transitions. Each one runs inside the caller's transaction, re-reads
//! the game there and ends with a version bump on `games`, so two requests
//! racing from the same phase cannot both commit.

use sea_orm::DatabaseTransaction;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info};

use super::{display_name, GameFlowService};
use crate::domain::random::choose;
use crate::domain::tally::{self, TallyOutcome};
use crate::domain::turn_end::{self, TurnEnd};
use crate::domain::{roster, GameStatus, ParticipantId, PhaseKind, PhaseNotice, RosterEntry};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::actions::{self, ActionSeed};
use crate::repos::games::Game;
use crate::repos::phases::{self, NewPhase, Phase};
use crate::repos::{games, participants};

/// Game state read inside the transition's own transaction.
#[derive(Debug, Clone)]
pub(super) struct Snapshot {
    pub game: Game,
    pub phase: Phase,
    pub roster: Vec<RosterEntry>,
}

pub(super) fn ensure_open(game: &Game) -> Result<(), DomainError> {
    if game.status.is_open() {
        Ok(())
    } else {
        Err(DomainError::conflict(
            ConflictKind::GameClosed,
            game.status.closed_message(),
        ))
    }
}

pub(super) fn ensure_kind(phase: &Phase, kind: PhaseKind, detail: &str) -> Result<(), DomainError> {
    if phase.kind == kind {
        Ok(())
    } else {
        Err(DomainError::conflict(ConflictKind::PhaseMismatch, detail))
    }
}

fn phase_moved_on(phase_id: i64) -> DomainError {
    DomainError::conflict(
        ConflictKind::OptimisticLock,
        format!("Phase {phase_id} was already advanced by another request"),
    )
}

/// Living participants act; everyone else is seeded as done.
fn seeds_for(roster: &[RosterEntry], acts: impl Fn(&RosterEntry) -> bool) -> Vec<ActionSeed> {
    roster
        .iter()
        .map(|p| {
            if acts(p) {
                ActionSeed::pending(p.participant_id)
            } else {
                ActionSeed::exempt(p.participant_id)
            }
        })
        .collect()
}

impl GameFlowService {
    pub(super) async fn load_current(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
    ) -> Result<Snapshot, AppError> {
        let game = games::require_game(txn, game_id).await?;
        let phase = phases::require_current(txn, game_id).await?;
        let roster = participants::load_roster(txn, game_id).await?;
        Ok(Snapshot {
            game,
            phase,
            roster,
        })
    }

    /// `load_current`, failing with `OPTIMISTIC_LOCK` when `phase_id` is no
    /// longer the game's current phase.
    async fn load_phase(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        phase_id: i64,
    ) -> Result<Snapshot, AppError> {
        let snap = self.load_current(txn, game_id).await?;
        ensure_open(&snap.game)?;
        if snap.phase.id != phase_id {
            return Err(phase_moved_on(phase_id).into());
        }
        Ok(snap)
    }

    /// Append `next` after the snapshot's phase and bump the game version,
    /// moving the game to `close_with` when given.
    async fn append(
        &self,
        txn: &DatabaseTransaction,
        snap: &Snapshot,
        next: NewPhase,
        close_with: Option<GameStatus>,
    ) -> Result<Phase, AppError> {
        let game_id = snap.game.id;
        let phase = phases::append_phase(txn, game_id, Some(snap.phase.id), next).await?;

        match close_with {
            Some(status) => {
                games::update_status(txn, game_id, snap.game.version, status).await?;
            }
            None => {
                games::touch_game(txn, game_id, snap.game.version).await?;
            }
        }

        info!(
            game_id,
            phase_id = phase.id,
            kind = phase.kind.as_str(),
            "Phase opened"
        );
        Ok(phase)
    }

    /// READY -> INPUT. Any participant may start once enough have joined.
    pub(super) async fn open_input(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
    ) -> Result<(), AppError> {
        let snap = self.load_current(txn, game_id).await?;
        ensure_open(&snap.game)?;
        ensure_kind(&snap.phase, PhaseKind::Ready, "The game has already started")?;

        if snap.roster.len() < self.rules.min_participants {
            return Err(DomainError::conflict(
                ConflictKind::NotEnoughParticipants,
                format!(
                    "At least {} participants are needed to start",
                    self.rules.min_participants
                ),
            )
            .into());
        }

        let deadline = OffsetDateTime::now_utc() + self.rules.input_limit;
        let phase = self
            .append(
                txn,
                &snap,
                NewPhase::new(PhaseKind::Input, PhaseNotice::input(), deadline),
                None,
            )
            .await?;
        actions::seed_actions(txn, phase.id, &seeds_for(&snap.roster, |_| true)).await?;
        Ok(())
    }

    /// INPUT -> DISCUSSION, dealing the wolf role on the first pass.
    async fn open_discussion(
        &self,
        txn: &DatabaseTransaction,
        snap: &Snapshot,
    ) -> Result<(), AppError> {
        let phase_count = phases::count_phases(txn, snap.game.id).await?;
        if roster::should_assign_roles(&snap.roster, phase_count, self.rules.role_assignment_window)
        {
            if let Some(wolf) = choose(self.random.as_ref(), &snap.roster) {
                participants::mark_wolf(txn, wolf.participant_id).await?;
                debug!(game_id = snap.game.id, "Roles assigned");
            }
        }

        let deadline = OffsetDateTime::now_utc()
            + Duration::seconds(i64::from(snap.game.discussion_seconds));
        self.append(
            txn,
            snap,
            NewPhase::new(PhaseKind::Discussion, PhaseNotice::discussion(), deadline),
            None,
        )
        .await?;
        Ok(())
    }

    /// DISCUSSION -> JUDGEMENT once the discussion deadline has passed.
    pub(super) async fn open_judgement(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        phase_id: i64,
    ) -> Result<(), AppError> {
        let snap = self.load_phase(txn, game_id, phase_id).await?;
        ensure_kind(&snap.phase, PhaseKind::Discussion, "Judgement follows discussion only")?;

        let deadline = OffsetDateTime::now_utc() + self.rules.judgement_limit;
        let phase = self
            .append(
                txn,
                &snap,
                NewPhase::new(PhaseKind::Judgement, PhaseNotice::judgement(), deadline),
                None,
            )
            .await?;
        actions::seed_actions(txn, phase.id, &seeds_for(&snap.roster, RosterEntry::is_alive))
            .await?;
        Ok(())
    }

    /// Count the votes of a finished JUDGEMENT and act on the outcome.
    async fn tabulate(&self, txn: &DatabaseTransaction, snap: &Snapshot) -> Result<(), AppError> {
        let targets = actions::vote_targets(txn, snap.phase.id).await?;
        let living = roster::living_ids(&snap.roster);
        let outcome = tally::decide(&living, &targets);
        debug!(game_id = snap.game.id, phase_id = snap.phase.id, ?outcome, "Votes tallied");

        match outcome {
            TallyOutcome::Eliminate(id) => {
                let notice = PhaseNotice::execution(&display_name(&snap.roster, id));
                self.execute(txn, snap, id, notice).await
            }
            TallyOutcome::RandomTieBreak { tied } => {
                let id = *choose(self.random.as_ref(), &tied)
                    .ok_or_else(|| AppError::internal("Tie-break over an empty tie"))?;
                let notice = PhaseNotice::random_execution(&display_name(&snap.roster, id));
                self.execute(txn, snap, id, notice).await
            }
            TallyOutcome::Runoff { candidates, voters } => {
                let deadline = OffsetDateTime::now_utc() + self.rules.judgement_limit;
                let phase = self
                    .append(
                        txn,
                        snap,
                        NewPhase::new(PhaseKind::Judgement, PhaseNotice::runoff(), deadline),
                        None,
                    )
                    .await?;
                phases::add_runoff_candidates(txn, phase.id, &candidates).await?;
                let seeds = seeds_for(&snap.roster, |p| voters.contains(&p.participant_id));
                actions::seed_actions(txn, phase.id, &seeds).await?;
                Ok(())
            }
        }
    }

    /// Eliminate `eliminated` and open EXECUTION for the survivors to acknowledge.
    async fn execute(
        &self,
        txn: &DatabaseTransaction,
        snap: &Snapshot,
        eliminated: ParticipantId,
        notice: PhaseNotice,
    ) -> Result<(), AppError> {
        participants::mark_died(txn, eliminated).await?;

        let deadline = OffsetDateTime::now_utc() + self.rules.execution_limit;
        let phase = self
            .append(
                txn,
                snap,
                NewPhase::new(PhaseKind::Execution, notice, deadline).eliminating(eliminated),
                None,
            )
            .await?;
        let seeds = seeds_for(&snap.roster, |p| {
            p.is_alive() && p.participant_id != eliminated
        });
        actions::seed_actions(txn, phase.id, &seeds).await?;
        Ok(())
    }

    /// After EXECUTION: finish the game or send the survivors back to discussion.
    async fn resolve_turn_end(
        &self,
        txn: &DatabaseTransaction,
        snap: &Snapshot,
    ) -> Result<TurnEnd, AppError> {
        let living = roster::living(&snap.roster).count();
        let living_wolves = roster::living_wolf_count(&snap.roster);
        let executions = phases::count_of_kind(txn, snap.game.id, PhaseKind::Execution).await?;
        let max_turns = usize::try_from(snap.game.max_turns).unwrap_or(0);

        let outcome = turn_end::resolve(living, living_wolves, executions, max_turns);
        let now = OffsetDateTime::now_utc();

        if outcome.ends_game() {
            self.append(
                txn,
                snap,
                NewPhase::new(
                    PhaseKind::Result,
                    PhaseNotice::result(outcome.result_message()),
                    now,
                ),
                Some(GameStatus::Completed),
            )
            .await?;
            info!(game_id = snap.game.id, ?outcome, "Game completed");
        } else {
            let deadline = now + Duration::seconds(i64::from(snap.game.discussion_seconds));
            self.append(
                txn,
                snap,
                NewPhase::new(PhaseKind::Discussion, PhaseNotice::rediscussion(), deadline),
                None,
            )
            .await?;
        }
        Ok(outcome)
    }

    /// Turn-end for an EXECUTION whose deadline passed before everyone acknowledged.
    pub(super) async fn resolve_expired_execution(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        phase_id: i64,
    ) -> Result<TurnEnd, AppError> {
        let snap = self.load_phase(txn, game_id, phase_id).await?;
        ensure_kind(&snap.phase, PhaseKind::Execution, "Turn end follows execution only")?;
        self.resolve_turn_end(txn, &snap).await
    }

    /// Advance `phase_id` if every action in it is complete.
    ///
    /// Returns the kind of the phase it opened, or `None` when the phase is
    /// still waiting, was already advanced, or has no completion trigger.
    pub(super) async fn advance_if_complete(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        phase_id: i64,
    ) -> Result<Option<PhaseKind>, AppError> {
        let snap = self.load_current(txn, game_id).await?;
        if !snap.game.status.is_open() || snap.phase.id != phase_id {
            return Ok(None);
        }

        let (completed, expected) = actions::completion_counts(txn, phase_id).await?;
        if expected == 0 || completed < expected {
            return Ok(None);
        }

        match snap.phase.kind {
            PhaseKind::Input => {
                self.open_discussion(txn, &snap).await?;
                Ok(Some(PhaseKind::Discussion))
            }
            PhaseKind::Judgement => {
                self.tabulate(txn, &snap).await?;
                let next = phases::require_current(txn, game_id).await?;
                Ok(Some(next.kind))
            }
            PhaseKind::Execution => {
                let outcome = self.resolve_turn_end(txn, &snap).await?;
                Ok(Some(if outcome.ends_game() {
                    PhaseKind::Result
                } else {
                    PhaseKind::Discussion
                }))
            }
            PhaseKind::Ready | PhaseKind::Discussion | PhaseKind::Result => Ok(None),
        }
    }
}
