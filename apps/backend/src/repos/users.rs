//! User repository functions for domain layer.

use sea_orm::ConnectionTrait;

use crate::adapters::users_sea as users_adapter;
use crate::entities::users;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub code: String,
    pub name: String,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            code: model.code,
            name: model.name,
        }
    }
}

pub async fn find_by_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    code: &str,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_by_code(conn, code).await?;
    Ok(user.map(User::from))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_by_id(conn, user_id).await?;
    Ok(user.map(User::from))
}

/// Insert the user, or refresh the stored name of an existing one.
pub async fn upsert_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    code: &str,
    name: &str,
) -> Result<User, DomainError> {
    let user = users_adapter::upsert_by_code(conn, users_adapter::UserUpsert::new(code, name)).await?;
    Ok(User::from(user))
}
