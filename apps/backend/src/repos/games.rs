//! Game repository functions for domain layer.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::games_sea as games_adapter;
use crate::domain::GameStatus;
use crate::entities::games;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::utils::game_name::is_game_name;

/// Game domain model
///
/// Converted from `games::Model` when loaded through repos functions. The
/// password hash stays here; it never leaves the services layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub host_id: i64,
    pub password_hash: String,
    pub max_members: i32,
    pub max_turns: i32,
    pub discussion_seconds: i32,
    pub finally_releasing: bool,
    pub status: GameStatus,
    pub deadline: OffsetDateTime,
    pub version: i32,
}

impl Game {
    pub fn is_host(&self, user_id: i64) -> bool {
        self.host_id == user_id
    }
}

impl From<games::Model> for Game {
    fn from(model: games::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            title: model.title,
            host_id: model.host_id,
            password_hash: model.password_hash,
            max_members: model.max_members,
            max_turns: model.max_turns,
            discussion_seconds: model.discussion_seconds,
            finally_releasing: model.finally_releasing,
            status: model.status,
            deadline: model.deadline,
            version: model.version,
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<Game>, DomainError> {
    let game = games_adapter::find_by_id(conn, game_id).await?;
    Ok(game.map(Game::from))
}

pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Game, DomainError> {
    let game = games_adapter::require_game(conn, game_id).await?;
    Ok(Game::from(game))
}

/// Find game by its public name or fail with `NotFound(Game)`.
pub async fn require_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Game, DomainError> {
    let not_found = || DomainError::not_found(NotFoundKind::Game, format!("Game {name} not found"));
    if !is_game_name(name) {
        return Err(not_found());
    }
    games_adapter::find_by_name(conn, name)
        .await?
        .map(Game::from)
        .ok_or_else(not_found)
}

pub async fn find_opened_by_host<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    host_id: i64,
) -> Result<Option<Game>, DomainError> {
    let game = games_adapter::find_opened_by_host(conn, host_id).await?;
    Ok(game.map(Game::from))
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: games_adapter::GameCreate,
) -> Result<Game, DomainError> {
    let game = games_adapter::create_game(conn, dto).await?;
    Ok(Game::from(game))
}

/// Move the game to `status` with optimistic locking.
pub async fn update_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    expected_version: i32,
    status: GameStatus,
) -> Result<Game, DomainError> {
    let dto = games_adapter::GameStatusUpdate::new(game_id, status, expected_version);
    let game = games_adapter::update_status(conn, dto).await?;
    Ok(Game::from(game))
}

/// Increment the version without changing any game fields.
///
/// Used when related rows (participants, phases) change so that two writers
/// working from the same version cannot both commit.
pub async fn touch_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    expected_version: i32,
) -> Result<Game, DomainError> {
    let game = games_adapter::touch(conn, game_id, expected_version).await?;
    Ok(Game::from(game))
}

/// `page` is one-based.
pub async fn list_completed_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    page: u64,
    per_page: u64,
) -> Result<(Vec<Game>, u64), DomainError> {
    let (games, total) =
        games_adapter::list_completed_for_user(conn, user_id, page.saturating_sub(1), per_page)
            .await?;
    Ok((games.into_iter().map(Game::from).collect(), total))
}
