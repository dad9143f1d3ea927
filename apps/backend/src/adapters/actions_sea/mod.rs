//! SeaORM adapter for per-phase participant actions.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set,
};

use crate::entities::phase_actions;

pub mod dto;

pub use dto::ActionSeed;

pub async fn seed_actions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    phase_id: i64,
    seeds: &[ActionSeed],
) -> Result<(), sea_orm::DbErr> {
    if seeds.is_empty() {
        return Ok(());
    }

    let rows = seeds.iter().map(|seed| phase_actions::ActiveModel {
        id: NotSet,
        phase_id: Set(phase_id),
        participant_id: Set(seed.participant_id),
        completed: Set(seed.completed),
        completed_at: Set(None),
    });

    phase_actions::Entity::insert_many(rows)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

pub async fn find_action<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    phase_id: i64,
    participant_id: i64,
) -> Result<Option<phase_actions::Model>, sea_orm::DbErr> {
    phase_actions::Entity::find()
        .filter(phase_actions::Column::PhaseId.eq(phase_id))
        .filter(phase_actions::Column::ParticipantId.eq(participant_id))
        .one(conn)
        .await
}

pub async fn list_by_phase<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    phase_id: i64,
) -> Result<Vec<phase_actions::Model>, sea_orm::DbErr> {
    phase_actions::Entity::find()
        .filter(phase_actions::Column::PhaseId.eq(phase_id))
        .order_by_asc(phase_actions::Column::Id)
        .all(conn)
        .await
}

/// Flip a pending action to completed. Returns the number of rows changed,
/// so 0 means someone else completed it first.
pub async fn complete_action<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    action_id: i64,
    at: time::OffsetDateTime,
) -> Result<u64, sea_orm::DbErr> {
    let result = phase_actions::Entity::update_many()
        .col_expr(phase_actions::Column::Completed, Expr::val(true).into())
        .col_expr(phase_actions::Column::CompletedAt, Expr::val(Some(at)).into())
        .filter(phase_actions::Column::Id.eq(action_id))
        .filter(phase_actions::Column::Completed.eq(false))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
