//! SeaORM adapter for the phase chain and runoff candidates.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::game_phases::{self, PhaseKind};
use crate::entities::runoff_candidates;

pub mod dto;

pub use dto::PhaseCreate;

pub async fn create_phase<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PhaseCreate,
) -> Result<game_phases::Model, sea_orm::DbErr> {
    let phase = game_phases::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        kind: Set(dto.kind),
        title: Set(dto.title),
        message: Set(dto.message),
        deadline: Set(dto.deadline),
        eliminated_participant_id: Set(dto.eliminated_participant_id),
        follows_phase_id: Set(dto.follows_phase_id),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    phase.insert(conn).await
}

/// The game's newest phase.
pub async fn find_current<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<game_phases::Model>, sea_orm::DbErr> {
    game_phases::Entity::find()
        .filter(game_phases::Column::GameId.eq(game_id))
        .order_by_desc(game_phases::Column::Id)
        .one(conn)
        .await
}

pub async fn list_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<game_phases::Model>, sea_orm::DbErr> {
    game_phases::Entity::find()
        .filter(game_phases::Column::GameId.eq(game_id))
        .order_by_asc(game_phases::Column::Id)
        .all(conn)
        .await
}

pub async fn count_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    kind: Option<PhaseKind>,
) -> Result<u64, sea_orm::DbErr> {
    let mut query = game_phases::Entity::find().filter(game_phases::Column::GameId.eq(game_id));
    if let Some(kind) = kind {
        query = query.filter(game_phases::Column::Kind.eq(kind));
    }
    query.count(conn).await
}

pub async fn insert_runoff_candidates<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    phase_id: i64,
    participant_ids: &[i64],
) -> Result<(), sea_orm::DbErr> {
    if participant_ids.is_empty() {
        return Ok(());
    }

    let rows = participant_ids
        .iter()
        .map(|&participant_id| runoff_candidates::ActiveModel {
            id: NotSet,
            phase_id: Set(phase_id),
            participant_id: Set(participant_id),
        });

    runoff_candidates::Entity::insert_many(rows)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

pub async fn list_runoff_candidates<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    phase_id: i64,
) -> Result<Vec<i64>, sea_orm::DbErr> {
    runoff_candidates::Entity::find()
        .select_only()
        .column(runoff_candidates::Column::ParticipantId)
        .filter(runoff_candidates::Column::PhaseId.eq(phase_id))
        .order_by_asc(runoff_candidates::Column::Id)
        .into_tuple::<i64>()
        .all(conn)
        .await
}
