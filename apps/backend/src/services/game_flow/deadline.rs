//! Lazy deadline enforcement, run at the start of every game-scoped request.

use sea_orm::DatabaseConnection;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use super::{GameContext, GameFlowService};
use crate::db::txn::with_txn;
use crate::domain::deadline::{self, DeadlineInput, DeadlineVerdict};
use crate::domain::GameStatus;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::games;

/// A single request never needs more than a couple of forced transitions:
/// an expired EXECUTION resolves into DISCUSSION or RESULT, neither of which
/// is already expired.
const MAX_RECONCILE_STEPS: usize = 4;

/// Whether the game can still be played after reconciling, and why not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub opened: bool,
    pub message: String,
}

impl Reconciled {
    fn open() -> Self {
        Self {
            opened: true,
            message: String::new(),
        }
    }

    fn closed(message: &str) -> Self {
        Self {
            opened: false,
            message: message.to_string(),
        }
    }
}

/// A transition that lost to a concurrent request already happened; the
/// caller only needs to reload.
pub(super) fn is_lost_race(err: &AppError) -> bool {
    err.code() == ErrorCode::OptimisticLock
}

impl GameFlowService {
    /// Apply every transition the clock has made due, then report whether
    /// the game is still open. Returns the refreshed context.
    pub async fn reconcile(
        &self,
        db: &DatabaseConnection,
        mut ctx: GameContext,
    ) -> Result<(GameContext, Reconciled), AppError> {
        for _ in 0..MAX_RECONCILE_STEPS {
            let verdict = deadline::evaluate(DeadlineInput {
                status: ctx.game.status,
                game_deadline: ctx.game.deadline,
                phase_kind: ctx.phase.kind,
                phase_deadline: ctx.phase.deadline,
                requester_is_host: ctx.requester_is_host(),
                now: OffsetDateTime::now_utc(),
            });

            let (game_id, phase_id) = (ctx.game.id, ctx.phase.id);
            let result = match verdict {
                DeadlineVerdict::Open => {
                    if !self.catch_up(db, &ctx).await {
                        return Ok((ctx, Reconciled::open()));
                    }
                    Ok(())
                }
                DeadlineVerdict::Closed(status) => {
                    return Ok((ctx, Reconciled::closed(status.closed_message())))
                }
                DeadlineVerdict::Finished => return Ok((ctx, Reconciled::closed(""))),
                DeadlineVerdict::Expire => {
                    self.expire(db, &ctx).await;
                    ctx.game.status = GameStatus::Timeup;
                    return Ok((ctx, Reconciled::closed(GameStatus::Timeup.closed_message())));
                }
                DeadlineVerdict::OpenJudgement => {
                    let svc = self.clone();
                    with_txn(db, move |txn| {
                        Box::pin(async move { svc.open_judgement(txn, game_id, phase_id).await })
                    })
                    .await
                }
                DeadlineVerdict::ResolveTurnEnd => {
                    let svc = self.clone();
                    with_txn(db, move |txn| {
                        Box::pin(async move {
                            svc.resolve_expired_execution(txn, game_id, phase_id)
                                .await
                                .map(|_| ())
                        })
                    })
                    .await
                }
            };

            match result {
                Ok(()) => debug!(game_id, phase_id, ?verdict, "Deadline transition applied"),
                Err(err) if is_lost_race(&err) => {
                    debug!(game_id, phase_id, "Deadline transition already applied elsewhere")
                }
                Err(err) => return Err(err),
            }

            ctx = self
                .load_context(db, &ctx.game.name, ctx.requester.user_id)
                .await?;
        }

        let outcome = if ctx.game.status.is_open() {
            Reconciled::open()
        } else {
            Reconciled::closed(ctx.game.status.closed_message())
        };
        Ok((ctx, outcome))
    }

    /// Advance a phase whose actions are all in but which never moved on,
    /// e.g. because the advance after the last submission failed. Returns
    /// whether the current phase changed. Failures are logged and reported
    /// as "unchanged".
    async fn catch_up(&self, db: &DatabaseConnection, ctx: &GameContext) -> bool {
        if !ctx.phase.kind.advances_on_completion() {
            return false;
        }
        let (game_id, phase_id) = (ctx.game.id, ctx.phase.id);
        let svc = self.clone();
        let result = with_txn(db, move |txn| {
            Box::pin(async move { svc.advance_if_complete(txn, game_id, phase_id).await })
        })
        .await;

        match result {
            Ok(Some(next)) => {
                info!(game_id, phase_id, next = next.as_str(), "Completed phase caught up");
                true
            }
            Ok(None) => false,
            Err(err) if is_lost_race(&err) => true,
            Err(err) => {
                warn!(game_id, phase_id, error = %err, "Completed phase check failed");
                false
            }
        }
    }

    /// Mark the game TIMEUP. Failure only costs the stored status: the game
    /// is reported closed either way and the next request tries again.
    async fn expire(&self, db: &DatabaseConnection, ctx: &GameContext) {
        let (game_id, version) = (ctx.game.id, ctx.game.version);
        let result = with_txn(db, move |txn| {
            Box::pin(async move {
                games::update_status(txn, game_id, version, GameStatus::Timeup).await?;
                Ok(())
            })
        })
        .await;

        match result {
            Ok(()) => info!(game_id, phase_id = ctx.phase.id, "Game timed out"),
            Err(err) => warn!(game_id, error = %err, "Failed to persist TIMEUP status"),
        }
    }
}
