use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum GameStatus {
    #[sea_orm(string_value = "OPENED")]
    Opened,
    #[sea_orm(string_value = "TIMEUP")]
    Timeup,
    #[sea_orm(string_value = "CANCEL")]
    Cancel,
    #[sea_orm(string_value = "COLLAPSE")]
    Collapse,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    #[sea_orm(string_value = "ERROR")]
    Error,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub title: String,
    #[sea_orm(column_name = "host_id")]
    pub host_id: i64,
    #[sea_orm(column_name = "password_hash")]
    pub password_hash: String,
    #[sea_orm(column_name = "max_members")]
    pub max_members: i32,
    #[sea_orm(column_name = "max_turns")]
    pub max_turns: i32,
    #[sea_orm(column_name = "discussion_seconds")]
    pub discussion_seconds: i32,
    #[sea_orm(column_name = "finally_releasing")]
    pub finally_releasing: bool,
    pub status: GameStatus,
    pub deadline: OffsetDateTime,
    pub version: i32,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::HostId",
        to = "super::users::Column::Id"
    )]
    Host,
    #[sea_orm(has_many = "super::game_participants::Entity")]
    GameParticipants,
    #[sea_orm(has_many = "super::game_phases::Entity")]
    GamePhases,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Host.def()
    }
}

impl Related<super::game_participants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameParticipants.def()
    }
}

impl Related<super::game_phases::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GamePhases.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
