//! SeaORM adapter for game participants.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::{game_participants, users};

pub mod dto;

pub use dto::ParticipantCreate;

pub async fn create_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ParticipantCreate,
) -> Result<game_participants::Model, sea_orm::DbErr> {
    let participant = game_participants::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        user_id: Set(dto.user_id),
        secret_word: Set(None),
        is_wolf: Set(false),
        is_died: Set(false),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    participant.insert(conn).await
}

pub async fn find_by_game_and_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    user_id: i64,
) -> Result<Option<game_participants::Model>, sea_orm::DbErr> {
    game_participants::Entity::find()
        .filter(game_participants::Column::GameId.eq(game_id))
        .filter(game_participants::Column::UserId.eq(user_id))
        .one(conn)
        .await
}

pub async fn count_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    game_participants::Entity::find()
        .filter(game_participants::Column::GameId.eq(game_id))
        .count(conn)
        .await
}

/// Participants of the given games with their users, in join order.
pub async fn list_with_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_ids: &[i64],
) -> Result<Vec<(game_participants::Model, users::Model)>, sea_orm::DbErr> {
    if game_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = game_participants::Entity::find()
        .filter(game_participants::Column::GameId.is_in(game_ids.iter().copied()))
        .find_also_related(users::Entity)
        .order_by_asc(game_participants::Column::Id)
        .all(conn)
        .await?;

    rows.into_iter()
        .map(|(participant, user)| match user {
            Some(user) => Ok((participant, user)),
            None => Err(sea_orm::DbErr::RecordNotFound(format!(
                "User {} for participant {}",
                participant.user_id, participant.id
            ))),
        })
        .collect()
}

pub async fn set_secret_word<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    participant_id: i64,
    word: &str,
) -> Result<(), sea_orm::DbErr> {
    game_participants::Entity::update_many()
        .col_expr(
            game_participants::Column::SecretWord,
            Expr::val(word.to_owned()).into(),
        )
        .filter(game_participants::Column::Id.eq(participant_id))
        .exec(conn)
        .await?;
    Ok(())
}

pub async fn mark_wolf<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    participant_id: i64,
) -> Result<(), sea_orm::DbErr> {
    game_participants::Entity::update_many()
        .col_expr(game_participants::Column::IsWolf, Expr::val(true).into())
        .filter(game_participants::Column::Id.eq(participant_id))
        .exec(conn)
        .await?;
    Ok(())
}

pub async fn mark_died<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    participant_id: i64,
) -> Result<(), sea_orm::DbErr> {
    game_participants::Entity::update_many()
        .col_expr(game_participants::Column::IsDied, Expr::val(true).into())
        .filter(game_participants::Column::Id.eq(participant_id))
        .exec(conn)
        .await?;
    Ok(())
}
