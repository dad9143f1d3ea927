use sea_orm::DatabaseConnection;
use time::OffsetDateTime;

use super::GameFlowService;
use crate::domain::view::{self, GameHeader, GameView, UserSummary, ViewInput};
use crate::domain::{GameStatus, ParticipantId};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::{actions, phases, users};

impl GameFlowService {
    /// The game as the requester may see it. Reconciles deadlines first, so
    /// polling the view is what moves a timed-out game along.
    pub async fn game_view(
        &self,
        db: &DatabaseConnection,
        game_name: &str,
        user_id: i64,
    ) -> Result<GameView, AppError> {
        let ctx = self.load_context(db, game_name, user_id).await?;
        let (ctx, outcome) = self.reconcile(db, ctx).await?;

        if !matches!(ctx.game.status, GameStatus::Opened | GameStatus::Completed) {
            return Ok(view::closed_view(ctx.game.status));
        }

        let completions: Vec<(ParticipantId, bool)> = actions::list_actions(db, ctx.phase.id)
            .await?
            .into_iter()
            .map(|a| (a.participant_id, a.completed))
            .collect();
        let runoff_candidates = phases::runoff_candidates(db, ctx.phase.id).await?;

        let host = match ctx.roster.iter().find(|p| p.user_id == ctx.game.host_id) {
            Some(p) => UserSummary {
                code: p.code.clone(),
                name: p.name.clone(),
            },
            None => {
                let user = users::find_by_id(db, ctx.game.host_id)
                    .await?
                    .ok_or_else(|| DomainError::not_found(NotFoundKind::User, "Host not found"))?;
                UserSummary {
                    code: user.code,
                    name: user.name,
                }
            }
        };

        let header = GameHeader {
            name: ctx.game.name.clone(),
            title: ctx.game.title.clone(),
            host,
            max_members: ctx.game.max_members,
            max_turns: ctx.game.max_turns,
            discussion_seconds: ctx.game.discussion_seconds,
            finally_releasing: ctx.game.finally_releasing,
            status: ctx.game.status,
        };
        let phase = ctx.phase.snapshot();

        Ok(view::build_view(ViewInput {
            header: &header,
            roster: &ctx.roster,
            phase: &phase,
            completions: &completions,
            runoff_candidates: &runoff_candidates,
            open_message: &outcome.message,
            now: OffsetDateTime::now_utc(),
        }))
    }
}
