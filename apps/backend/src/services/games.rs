//! Game lifecycle outside the phase chain: creation, joining, lookup of the
//! host's running game and the finished-game history.

use sea_orm::DatabaseConnection;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::adapters::games_sea::GameCreate;
use crate::config::game::GameRules;
use crate::db::txn::with_txn;
use crate::domain::validation::{
    validate_join_password, validate_page, validate_settings, GameSettings,
};
use crate::domain::view::UserSummary;
use crate::domain::{PhaseKind, PhaseNotice, RosterEntry};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, ForbiddenKind, NotFoundKind};
use crate::errors::ErrorCode;
use crate::repos::phases::NewPhase;
use crate::repos::users::User;
use crate::repos::{games, participants, phases, users};
use crate::services::game_flow::GameFlowService;
use crate::state::app_state::AppState;
use crate::utils::game_name::generate_game_name;
use crate::utils::password::{hash_join_password, verify_join_password};

/// Fresh names are drawn from a large space; a few retries cover collisions.
const NAME_ATTEMPTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedGame {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MyGame {
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub name: String,
    pub title: String,
    pub host: UserSummary,
    pub participants: Vec<UserSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPage {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub games: Vec<HistoryEntry>,
}

fn summary(entry: &RosterEntry) -> UserSummary {
    UserSummary {
        code: entry.code.clone(),
        name: entry.name.clone(),
    }
}

#[derive(Debug, Clone)]
pub struct GameService {
    rules: GameRules,
    pepper: Vec<u8>,
}

impl GameService {
    pub fn new(rules: GameRules, pepper: impl Into<Vec<u8>>) -> Self {
        Self {
            rules,
            pepper: pepper.into(),
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(state.rules.clone(), state.security.password_salt.clone())
    }

    /// Create a game hosted by `host`, join the host and open READY, all in
    /// one transaction.
    pub async fn create_game(
        &self,
        db: &DatabaseConnection,
        host: &User,
        settings: GameSettings,
    ) -> Result<CreatedGame, AppError> {
        let settings = validate_settings(settings, &self.rules)?;

        let mut attempt = 0;
        loop {
            attempt += 1;
            let name = generate_game_name();
            match self.insert_game(db, host.id, &name, &settings).await {
                Ok(()) => {
                    info!(host_id = host.id, game_name = %name, "Game created");
                    return Ok(CreatedGame { name });
                }
                Err(err) if err.code() == ErrorCode::GameNameTaken && attempt < NAME_ATTEMPTS => {
                    warn!(attempt, "Generated game name already taken; retrying");
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn insert_game(
        &self,
        db: &DatabaseConnection,
        host_id: i64,
        name: &str,
        settings: &GameSettings,
    ) -> Result<(), AppError> {
        let now = OffsetDateTime::now_utc();
        let dto = GameCreate {
            name: name.to_string(),
            title: settings.title.clone(),
            host_id,
            password_hash: hash_join_password(&self.pepper, name, &settings.password),
            max_members: settings.member_count,
            max_turns: settings.max_turns,
            discussion_seconds: settings.discussion_seconds,
            finally_releasing: settings.finally_releasing,
            deadline: now + self.rules.game_lifetime,
        };
        let ready = NewPhase::new(PhaseKind::Ready, PhaseNotice::ready(), now + self.rules.ready_limit);

        with_txn(db, move |txn| {
            Box::pin(async move {
                let game = games::create_game(txn, dto).await?;
                participants::add_participant(txn, game.id, host_id).await?;
                phases::append_phase(txn, game.id, None, ready).await?;
                Ok(())
            })
        })
        .await
    }

    /// Join `game_name` with its password while it is still recruiting.
    pub async fn join_game(
        &self,
        db: &DatabaseConnection,
        user: &User,
        game_name: &str,
        password: &str,
    ) -> Result<(), AppError> {
        validate_join_password(password)?;
        let game = games::require_by_name(db, game_name).await?;
        let (game_id, user_id) = (game.id, user.id);

        if participants::is_member(db, game_id, user_id).await? {
            return Err(DomainError::conflict(
                ConflictKind::AlreadyJoined,
                "You have already joined this game",
            )
            .into());
        }
        if !verify_join_password(&self.pepper, &game.name, password, &game.password_hash) {
            return Err(
                DomainError::forbidden(ForbiddenKind::WrongPassword, "Wrong password").into(),
            );
        }

        with_txn(db, move |txn| {
            Box::pin(async move {
                let game = games::require_game(txn, game_id).await?;
                let phase = phases::require_current(txn, game_id).await?;
                let now = OffsetDateTime::now_utc();
                let recruiting = game.status.is_open()
                    && phase.kind == PhaseKind::Ready
                    && phase.deadline > now
                    && game.deadline > now;
                if !recruiting {
                    return Err(DomainError::conflict(
                        ConflictKind::RecruitmentClosed,
                        "This game is no longer accepting participants",
                    )
                    .into());
                }

                let joined = participants::count_by_game(txn, game_id).await?;
                if joined >= u64::try_from(game.max_members).unwrap_or(0) {
                    return Err(
                        DomainError::conflict(ConflictKind::GameFull, "This game is full").into(),
                    );
                }

                participants::add_participant(txn, game_id, user_id).await?;
                games::touch_game(txn, game_id, game.version).await?;
                Ok(())
            })
        })
        .await?;

        info!(game_id, user_id, "Participant joined");
        Ok(())
    }

    /// The OPENED game `user` hosts, if any, after reconciling its deadlines.
    pub async fn my_game(
        &self,
        db: &DatabaseConnection,
        flow: &GameFlowService,
        user: &User,
    ) -> Result<MyGame, AppError> {
        let Some(game) = games::find_opened_by_host(db, user.id).await? else {
            return Ok(MyGame {
                exists: false,
                name: None,
            });
        };

        let ctx = flow.load_context(db, &game.name, user.id).await?;
        let (ctx, outcome) = flow.reconcile(db, ctx).await?;
        Ok(if outcome.opened {
            MyGame {
                exists: true,
                name: Some(ctx.game.name),
            }
        } else {
            MyGame {
                exists: false,
                name: None,
            }
        })
    }

    /// COMPLETED games `user` took part in, newest first.
    pub async fn history(
        &self,
        db: &DatabaseConnection,
        user: &User,
        page: u64,
        per_page: u64,
    ) -> Result<HistoryPage, AppError> {
        let (page, per_page) = validate_page(page, per_page)?;
        let (found, total) = games::list_completed_for_user(db, user.id, page, per_page).await?;

        let ids: Vec<i64> = found.iter().map(|g| g.id).collect();
        let mut rosters = participants::load_rosters(db, &ids).await?;

        let mut entries = Vec::with_capacity(found.len());
        for game in found {
            let roster = rosters.remove(&game.id).unwrap_or_default();
            let host = match roster.iter().find(|p| p.user_id == game.host_id) {
                Some(entry) => summary(entry),
                None => {
                    let host = users::find_by_id(db, game.host_id).await?.ok_or_else(|| {
                        DomainError::not_found(NotFoundKind::User, "Host not found")
                    })?;
                    UserSummary {
                        code: host.code,
                        name: host.name,
                    }
                }
            };
            entries.push(HistoryEntry {
                name: game.name,
                title: game.title,
                host,
                participants: roster.iter().map(summary).collect(),
            });
        }

        Ok(HistoryPage {
            page,
            per_page,
            total,
            games: entries,
        })
    }
}
