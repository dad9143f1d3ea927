//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repos convert it here, and higher layers
//! map `DomainError` to `AppError` via `From`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract the first `table.column` from SQLite "UNIQUE constraint failed: ..." messages.
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    const MARKER: &str = "UNIQUE constraint failed: ";
    let start = error_msg.find(MARKER)? + MARKER.len();
    error_msg[start..]
        .split(|c: char| c.is_whitespace() || c == ',' || c == '"')
        .next()
        .filter(|s| !s.is_empty())
}

fn unique_conflict_for(key: &str) -> Option<(ConflictKind, &'static str)> {
    match key {
        "games.name" | "ux_games_name" => {
            Some((ConflictKind::GameNameTaken, "Game name already exists"))
        }
        "game_participants.game_id" | "ux_game_participants_game_user" => Some((
            ConflictKind::AlreadyJoined,
            "User already participates in this game",
        )),
        // A second successor for the same phase means another request won the transition
        "game_phases.follows_phase_id" | "ux_game_phases_follows" => Some((
            ConflictKind::OptimisticLock,
            "Phase was advanced by another request; please retry",
        )),
        "phase_actions.phase_id" | "ux_phase_actions_phase_participant" => Some((
            ConflictKind::AlreadyCompleted,
            "Action already recorded for this phase",
        )),
        "votes.action_id" | "ux_votes_action_id" => {
            Some((ConflictKind::AlreadyCompleted, "Vote already cast"))
        }
        "users.code" | "ux_users_code" => Some((
            ConflictKind::Other("UniqueUserCode".into()),
            "User code already registered",
        )),
        _ => None,
    }
}

/// Map PostgreSQL constraint names to domain-specific conflict errors.
fn map_postgres_constraint_to_conflict(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    [
        "ux_games_name",
        "ux_game_participants_game_user",
        "ux_game_phases_follows",
        "ux_phase_actions_phase_participant",
        "ux_votes_action_id",
        "ux_users_code",
    ]
    .into_iter()
    .find(|name| error_msg.contains(name))
    .and_then(unique_conflict_for)
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(
                NotFoundKind::Other("Record".into()),
                "Record not found",
            );
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with("GAME_NOT_FOUND:") => {
            let game_id = msg
                .strip_prefix("GAME_NOT_FOUND:")
                .and_then(|s| s.parse::<i64>().ok());
            warn!(trace_id = %trace_id, ?game_id, "Game not found");
            return DomainError::not_found(NotFoundKind::Game, "Game not found");
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with("OPTIMISTIC_LOCK:") => {
            if let Some(json_str) = msg.strip_prefix("OPTIMISTIC_LOCK:") {
                #[derive(serde::Deserialize)]
                struct LockInfo {
                    expected: i32,
                    actual: i32,
                }

                if let Ok(info) = serde_json::from_str::<LockInfo>(json_str) {
                    warn!(
                        trace_id = %trace_id,
                        expected = info.expected,
                        actual = info.actual,
                        "Optimistic lock conflict detected"
                    );

                    return DomainError::conflict(
                        ConflictKind::OptimisticLock,
                        format!(
                            "Game was modified concurrently (expected version {}, actual version {}). Please refresh and retry.",
                            info.expected, info.actual
                        ),
                    );
                }
            }

            warn!(trace_id = %trace_id, "Optimistic lock conflict detected (version info unavailable)");
            return DomainError::conflict(
                ConflictKind::OptimisticLock,
                "Game was modified by another request; please retry",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unique constraint violation");

        if let Some((kind, detail)) =
            extract_sqlite_table_column(&error_msg).and_then(unique_conflict_for)
        {
            return DomainError::conflict(kind, detail);
        }

        if let Some((kind, detail)) = map_postgres_constraint_to_conflict(&error_msg) {
            return DomainError::conflict(kind, detail);
        }

        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Foreign key constraint violation");
        return DomainError::validation_other("Foreign key constraint violation");
    }

    if error_msg.contains("timeout") || error_msg.contains("pool timed out") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

#[cfg(test)]
mod tests {
    use sea_orm::DbErr;

    use super::*;

    #[test]
    fn test_optimistic_lock_payload_maps_to_conflict() {
        let err = map_db_err(DbErr::Custom(
            r#"OPTIMISTIC_LOCK:{"expected":3,"actual":4}"#.to_string(),
        ));
        match err {
            DomainError::Conflict(ConflictKind::OptimisticLock, detail) => {
                assert!(detail.contains("expected version 3"));
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn test_sqlite_unique_on_successor_phase_is_lock_conflict() {
        let err = map_db_err(DbErr::Custom(
            "error returned from database: (code: 2067) UNIQUE constraint failed: game_phases.follows_phase_id".to_string(),
        ));
        assert!(matches!(
            err,
            DomainError::Conflict(ConflictKind::OptimisticLock, _)
        ));
    }

    #[test]
    fn test_sqlite_composite_unique_uses_first_column() {
        let err = map_db_err(DbErr::Custom(
            "UNIQUE constraint failed: game_participants.game_id, game_participants.user_id"
                .to_string(),
        ));
        assert!(matches!(
            err,
            DomainError::Conflict(ConflictKind::AlreadyJoined, _)
        ));
    }

    #[test]
    fn test_postgres_constraint_name() {
        let err = map_db_err(DbErr::Custom(
            "duplicate key value violates unique constraint \"ux_votes_action_id\"".to_string(),
        ));
        assert!(matches!(
            err,
            DomainError::Conflict(ConflictKind::AlreadyCompleted, _)
        ));
    }

    #[test]
    fn test_unknown_error_is_infra() {
        let err = map_db_err(DbErr::Custom("disk I/O error".to_string()));
        assert!(err.is_infra());
    }
}
