use sea_orm::{DatabaseConnection, DatabaseTransaction};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use super::deadline::is_lost_race;
use super::transitions::{ensure_kind, ensure_open};
use super::{GameContext, GameFlowService};
use crate::db::txn::with_txn;
use crate::domain::validation::{validate_vote_target, validate_word};
use crate::domain::{roster, GameStatus, ParticipantId, PhaseKind};
use crate::error::AppError;
use crate::errors::domain::{
    ConflictKind, DomainError, ForbiddenKind, NotFoundKind, ValidationKind,
};
use crate::repos::actions::{self, PhaseAction};
use crate::repos::phases::Phase;
use crate::repos::{games, participants, phases};

impl GameFlowService {
    /// Load the game for `user_id`, reconcile its deadlines and refuse it if
    /// it is no longer open.
    pub async fn prepare(
        &self,
        db: &DatabaseConnection,
        game_name: &str,
        user_id: i64,
    ) -> Result<GameContext, AppError> {
        let ctx = self.load_context(db, game_name, user_id).await?;
        let (ctx, outcome) = self.reconcile(db, ctx).await?;
        if !outcome.opened {
            let message = if outcome.message.is_empty() {
                ctx.game.status.closed_message().to_string()
            } else {
                outcome.message
            };
            return Err(DomainError::conflict(ConflictKind::GameClosed, message).into());
        }
        Ok(ctx)
    }

    pub async fn start_game(
        &self,
        db: &DatabaseConnection,
        game_name: &str,
        user_id: i64,
    ) -> Result<(), AppError> {
        let ctx = self.prepare(db, game_name, user_id).await?;
        let game_id = ctx.game.id;

        let svc = self.clone();
        with_txn(db, move |txn| {
            Box::pin(async move { svc.open_input(txn, game_id).await })
        })
        .await?;

        info!(game_id, "Game started");
        Ok(())
    }

    /// Store the requester's secret word for the INPUT phase.
    pub async fn submit_word(
        &self,
        db: &DatabaseConnection,
        game_name: &str,
        user_id: i64,
        word: &str,
    ) -> Result<(), AppError> {
        let word = validate_word(word)?;
        let ctx = self.prepare(db, game_name, user_id).await?;
        let (game_id, participant_id) = (ctx.game.id, ctx.requester.participant_id);

        let svc = self.clone();
        let phase_id = with_txn(db, move |txn| {
            Box::pin(async move { svc.record_word(txn, game_id, participant_id, &word).await })
        })
        .await?;

        self.advance_best_effort(db, game_id, phase_id).await;
        Ok(())
    }

    /// Cast the requester's JUDGEMENT vote against `target_code`.
    pub async fn submit_vote(
        &self,
        db: &DatabaseConnection,
        game_name: &str,
        user_id: i64,
        target_code: &str,
    ) -> Result<(), AppError> {
        let target_code = validate_vote_target(target_code)?;
        let ctx = self.prepare(db, game_name, user_id).await?;
        let (game_id, participant_id) = (ctx.game.id, ctx.requester.participant_id);

        let svc = self.clone();
        let phase_id = with_txn(db, move |txn| {
            Box::pin(async move {
                svc.record_vote(txn, game_id, participant_id, &target_code)
                    .await
            })
        })
        .await?;

        self.advance_best_effort(db, game_id, phase_id).await;
        Ok(())
    }

    /// "Next" during EXECUTION.
    pub async fn acknowledge_execution(
        &self,
        db: &DatabaseConnection,
        game_name: &str,
        user_id: i64,
    ) -> Result<(), AppError> {
        let ctx = self.prepare(db, game_name, user_id).await?;
        let (game_id, participant_id) = (ctx.game.id, ctx.requester.participant_id);

        let svc = self.clone();
        let phase_id = with_txn(db, move |txn| {
            Box::pin(async move {
                let snap = svc.load_current(txn, game_id).await?;
                ensure_open(&snap.game)?;
                ensure_kind(&snap.phase, PhaseKind::Execution, "There is no execution to acknowledge")?;
                let action = pending_action(txn, &snap.phase, participant_id).await?;
                complete(txn, &action).await?;
                Ok(snap.phase.id)
            })
        })
        .await?;

        self.advance_best_effort(db, game_id, phase_id).await;
        Ok(())
    }

    /// Host-only. Deadlines are not reconciled first: an OPENED game can be
    /// cancelled even if its time is up.
    pub async fn cancel_game(
        &self,
        db: &DatabaseConnection,
        game_name: &str,
        user_id: i64,
    ) -> Result<(), AppError> {
        let ctx = self.load_context(db, game_name, user_id).await?;
        if !ctx.requester_is_host() {
            return Err(DomainError::forbidden(
                ForbiddenKind::NotHost,
                "Only the host can cancel the game",
            )
            .into());
        }
        let game_id = ctx.game.id;

        with_txn(db, move |txn| {
            Box::pin(async move {
                let game = games::require_game(txn, game_id).await?;
                ensure_open(&game)?;
                games::update_status(txn, game_id, game.version, GameStatus::Cancel).await?;
                Ok(())
            })
        })
        .await?;

        info!(game_id, "Game cancelled by host");
        Ok(())
    }

    async fn record_word(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        participant_id: ParticipantId,
        word: &str,
    ) -> Result<i64, AppError> {
        let snap = self.load_current(txn, game_id).await?;
        ensure_open(&snap.game)?;
        ensure_kind(&snap.phase, PhaseKind::Input, "Words can only be entered during word input")?;

        let action = pending_action(txn, &snap.phase, participant_id).await?;
        complete(txn, &action).await?;
        participants::set_secret_word(txn, participant_id, word).await?;

        debug!(game_id, phase_id = snap.phase.id, participant_id, "Word recorded");
        Ok(snap.phase.id)
    }

    async fn record_vote(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        participant_id: ParticipantId,
        target_code: &str,
    ) -> Result<i64, AppError> {
        let snap = self.load_current(txn, game_id).await?;
        ensure_open(&snap.game)?;
        ensure_kind(&snap.phase, PhaseKind::Judgement, "Votes can only be cast during judgement")?;

        let voter_alive = roster::find(&snap.roster, participant_id).is_some_and(|p| p.is_alive());
        if !voter_alive {
            return Err(DomainError::conflict(
                ConflictKind::NotEligible,
                "Eliminated participants cannot vote",
            )
            .into());
        }
        let action = pending_action(txn, &snap.phase, participant_id).await?;

        let target = roster::find_by_code(&snap.roster, target_code).ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Participant,
                "The vote target is not a participant of this game",
            )
        })?;
        if !target.is_alive() {
            return Err(DomainError::validation(
                ValidationKind::InvalidVoteTarget,
                "Eliminated participants cannot be voted for",
            )
            .into());
        }

        let candidates = phases::runoff_candidates(txn, snap.phase.id).await?;
        if !candidates.is_empty() && !candidates.contains(&target.participant_id) {
            return Err(DomainError::conflict(
                ConflictKind::NotRunoffCandidate,
                "Only the tied participants can be voted for in a runoff",
            )
            .into());
        }

        complete(txn, &action).await?;
        actions::record_vote(txn, snap.phase.id, action.id, target.participant_id).await?;

        debug!(game_id, phase_id = snap.phase.id, participant_id, "Vote recorded");
        Ok(snap.phase.id)
    }

    /// Secondary effect of a recorded action: open the next phase if this
    /// was the last one missing. Never fails the request.
    async fn advance_best_effort(&self, db: &DatabaseConnection, game_id: i64, phase_id: i64) {
        let svc = self.clone();
        let result = with_txn(db, move |txn| {
            Box::pin(async move { svc.advance_if_complete(txn, game_id, phase_id).await })
        })
        .await;

        match result {
            Ok(Some(next)) => debug!(game_id, phase_id, next = next.as_str(), "Phase advanced"),
            Ok(None) => {}
            Err(err) if is_lost_race(&err) => {
                debug!(game_id, phase_id, "Phase advanced by a concurrent request")
            }
            Err(err) => warn!(game_id, phase_id, error = %err, "Phase advance check failed"),
        }
    }
}

/// The participant's still-open action in `phase`.
async fn pending_action(
    txn: &DatabaseTransaction,
    phase: &Phase,
    participant_id: ParticipantId,
) -> Result<PhaseAction, AppError> {
    let action = actions::find_action(txn, phase.id, participant_id)
        .await?
        .filter(|a| !a.is_exempt())
        .ok_or_else(|| {
            DomainError::conflict(ConflictKind::NotEligible, "You take no part in this phase")
        })?;

    if action.completed {
        return Err(already_completed().into());
    }
    Ok(action)
}

async fn complete(txn: &DatabaseTransaction, action: &PhaseAction) -> Result<(), AppError> {
    if actions::complete_action(txn, action.id, OffsetDateTime::now_utc()).await? {
        Ok(())
    } else {
        Err(already_completed().into())
    }
}

fn already_completed() -> DomainError {
    DomainError::conflict(
        ConflictKind::AlreadyCompleted,
        "You have already completed this phase",
    )
}
