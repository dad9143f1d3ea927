use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum PhaseKind {
    #[sea_orm(string_value = "READY")]
    Ready,
    #[sea_orm(string_value = "INPUT")]
    Input,
    #[sea_orm(string_value = "DISCUSSION")]
    Discussion,
    #[sea_orm(string_value = "JUDGEMENT")]
    Judgement,
    #[sea_orm(string_value = "EXECUTION")]
    Execution,
    #[sea_orm(string_value = "RESULT")]
    Result,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "game_phases")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "game_id")]
    pub game_id: i64,
    pub kind: PhaseKind,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub deadline: OffsetDateTime,
    #[sea_orm(column_name = "eliminated_participant_id")]
    pub eliminated_participant_id: Option<i64>,
    /// Id of the phase this one succeeded; unique, so a phase has one successor.
    #[sea_orm(column_name = "follows_phase_id", unique)]
    pub follows_phase_id: Option<i64>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::games::Entity",
        from = "Column::GameId",
        to = "super::games::Column::Id"
    )]
    Game,
    #[sea_orm(has_many = "super::phase_actions::Entity")]
    PhaseActions,
    #[sea_orm(has_many = "super::runoff_candidates::Entity")]
    RunoffCandidates,
}

impl Related<super::games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Game.def()
    }
}

impl Related<super::phase_actions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PhaseActions.def()
    }
}

impl Related<super::runoff_candidates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RunoffCandidates.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
