use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "phase_actions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "phase_id")]
    pub phase_id: i64,
    #[sea_orm(column_name = "participant_id")]
    pub participant_id: i64,
    pub completed: bool,
    #[sea_orm(column_name = "completed_at")]
    pub completed_at: Option<OffsetDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::game_phases::Entity",
        from = "Column::PhaseId",
        to = "super::game_phases::Column::Id"
    )]
    Phase,
    #[sea_orm(
        belongs_to = "super::game_participants::Entity",
        from = "Column::ParticipantId",
        to = "super::game_participants::Column::Id"
    )]
    Participant,
}

impl Related<super::game_phases::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Phase.def()
    }
}

impl Related<super::game_participants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
