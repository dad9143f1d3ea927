//! Fresh application state over a private in-memory SQLite database.

use std::sync::Arc;

use backend_test_support::unique_helpers::unique_code;
use sea_orm::DatabaseConnection;
use wordwolf::config::db::DbProfile;
use wordwolf::domain::random::RandomSource;
use wordwolf::infra::state::build_state;
use wordwolf::repos::users::User;
use wordwolf::services::users::ensure_user;
use wordwolf::AppState;

pub async fn in_memory_state(random: Arc<dyn RandomSource>) -> AppState {
    build_state()
        .with_db(DbProfile::InMemory)
        .with_random(random)
        .build()
        .await
        .expect("in-memory state should build")
}

/// A user with a unique code and the given display name.
pub async fn user(db: &DatabaseConnection, name: &str) -> User {
    ensure_user(db, &unique_code(), name)
        .await
        .expect("user should be created")
}
