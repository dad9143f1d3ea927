use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "votes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "phase_id")]
    pub phase_id: i64,
    #[sea_orm(column_name = "action_id", unique)]
    pub action_id: i64,
    #[sea_orm(column_name = "target_participant_id")]
    pub target_participant_id: i64,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::phase_actions::Entity",
        from = "Column::ActionId",
        to = "super::phase_actions::Column::Id"
    )]
    Action,
}

impl Related<super::phase_actions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Action.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
