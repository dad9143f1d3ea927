use sea_orm::ConnectionTrait;
use tracing::debug;

use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::repos::users::{self, User};

/// Longest display name kept from a token; longer names are cut.
const MAX_NAME_CHARS: usize = 32;

/// Ensure a user row exists for the token subject `code`, refreshing the
/// stored display name. Idempotent.
pub async fn ensure_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    code: &str,
    name: &str,
) -> Result<User, AppError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(DomainError::validation_other("Token subject is empty").into());
    }

    let name: String = match name.trim() {
        "" => code.chars().take(MAX_NAME_CHARS).collect(),
        trimmed => trimmed.chars().take(MAX_NAME_CHARS).collect(),
    };

    if let Some(existing) = users::find_by_code(conn, code).await? {
        if existing.name == name {
            return Ok(existing);
        }
    }

    let user = users::upsert_user(conn, code, &name).await?;
    debug!(user_id = user.id, "User ensured");
    Ok(user)
}
