//! SeaORM adapter for game repository.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::games::{self, GameStatus};
use crate::entities::game_participants;

pub mod dto;

pub use dto::{GameCreate, GameStatusUpdate};

/// Apply `configure_update`, bump `version` and refetch, failing with an
/// `OPTIMISTIC_LOCK` payload when `expected_version` is stale.
async fn optimistic_update_then_fetch<C, F>(
    conn: &C,
    id: i64,
    expected_version: i32,
    configure_update: F,
) -> Result<games::Model, sea_orm::DbErr>
where
    C: ConnectionTrait + Send + Sync,
    F: FnOnce(sea_orm::UpdateMany<games::Entity>) -> sea_orm::UpdateMany<games::Entity>,
{
    let now = time::OffsetDateTime::now_utc();

    let result = configure_update(games::Entity::update_many())
        .col_expr(games::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            games::Column::Version,
            Expr::col(games::Column::Version).add(1),
        )
        .filter(games::Column::Id.eq(id))
        .filter(games::Column::Version.eq(expected_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return match games::Entity::find_by_id(id).one(conn).await? {
            Some(game) => Err(sea_orm::DbErr::Custom(format!(
                "OPTIMISTIC_LOCK:{{\"expected\":{},\"actual\":{}}}",
                expected_version, game.version
            ))),
            None => Err(sea_orm::DbErr::Custom(format!("GAME_NOT_FOUND:{id}"))),
        };
    }

    require_game(conn, id).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find_by_id(game_id).one(conn).await
}

/// Find game by ID or return a `GAME_NOT_FOUND` error.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<games::Model, sea_orm::DbErr> {
    find_by_id(conn, game_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::Custom(format!("GAME_NOT_FOUND:{game_id}")))
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .filter(games::Column::Name.eq(name))
        .one(conn)
        .await
}

/// The most recent OPENED game hosted by `host_id`.
pub async fn find_opened_by_host<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    host_id: i64,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .filter(games::Column::HostId.eq(host_id))
        .filter(games::Column::Status.eq(GameStatus::Opened))
        .order_by_desc(games::Column::Id)
        .one(conn)
        .await
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let game_active = games::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        title: Set(dto.title),
        host_id: Set(dto.host_id),
        password_hash: Set(dto.password_hash),
        max_members: Set(dto.max_members),
        max_turns: Set(dto.max_turns),
        discussion_seconds: Set(dto.discussion_seconds),
        finally_releasing: Set(dto.finally_releasing),
        status: Set(GameStatus::Opened),
        deadline: Set(dto.deadline),
        version: Set(1),
        created_at: Set(now),
        updated_at: Set(now),
    };

    game_active.insert(conn).await
}

pub async fn update_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameStatusUpdate,
) -> Result<games::Model, sea_orm::DbErr> {
    optimistic_update_then_fetch(conn, dto.id, dto.expected_version, |update| {
        update.col_expr(games::Column::Status, Expr::val(dto.status).into())
    })
    .await
}

/// Bump the version without touching any other column.
pub async fn touch<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    expected_version: i32,
) -> Result<games::Model, sea_orm::DbErr> {
    optimistic_update_then_fetch(conn, game_id, expected_version, |update| update).await
}

/// One page of COMPLETED games `user_id` took part in, newest first, plus
/// the total across all pages. `page` is zero-based.
pub async fn list_completed_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    page: u64,
    per_page: u64,
) -> Result<(Vec<games::Model>, u64), sea_orm::DbErr> {
    let query = games::Entity::find()
        .inner_join(game_participants::Entity)
        .filter(game_participants::Column::UserId.eq(user_id))
        .filter(games::Column::Status.eq(GameStatus::Completed));

    let total = query.clone().count(conn).await?;
    let games = query
        .order_by_desc(games::Column::Id)
        .offset(page * per_page)
        .limit(per_page)
        .all(conn)
        .await?;

    Ok((games, total))
}
