//! SeaORM adapter for user repository.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};

use crate::entities::users;

pub mod dto;

pub use dto::UserUpsert;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    code: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Code.eq(code))
        .one(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(user_id).one(conn).await
}

/// Insert the user or refresh its display name, keyed by `code`.
pub async fn upsert_by_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserUpsert,
) -> Result<users::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let code = dto.code.clone();

    let user_active = users::ActiveModel {
        id: NotSet,
        code: Set(dto.code),
        name: Set(dto.name),
        created_at: Set(now),
        updated_at: Set(now),
    };

    users::Entity::insert(user_active)
        .on_conflict(
            OnConflict::column(users::Column::Code)
                .update_columns([users::Column::Name, users::Column::UpdatedAt])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    find_by_code(conn, &code)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("User {code} not found")))
}
