//! SeaORM adapter for judgement votes.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::votes;

pub async fn insert_vote<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    phase_id: i64,
    action_id: i64,
    target_participant_id: i64,
) -> Result<votes::Model, sea_orm::DbErr> {
    let vote = votes::ActiveModel {
        id: NotSet,
        phase_id: Set(phase_id),
        action_id: Set(action_id),
        target_participant_id: Set(target_participant_id),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    vote.insert(conn).await
}

/// Target of every vote cast in the phase, in casting order.
pub async fn list_targets<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    phase_id: i64,
) -> Result<Vec<i64>, sea_orm::DbErr> {
    votes::Entity::find()
        .select_only()
        .column(votes::Column::TargetParticipantId)
        .filter(votes::Column::PhaseId.eq(phase_id))
        .order_by_asc(votes::Column::Id)
        .into_tuple::<i64>()
        .all(conn)
        .await
}
