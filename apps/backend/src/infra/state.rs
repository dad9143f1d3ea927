use std::sync::Arc;

use crate::config::db::{DbOwner, DbProfile};
use crate::config::game::GameRules;
use crate::domain::random::RandomSource;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    db_profile: Option<DbProfile>,
    rules: Option<GameRules>,
    random: Option<Arc<dyn RandomSource>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            db_profile: None,
            rules: None,
            random: None,
        }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = Some(profile);
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_rules(mut self, rules: GameRules) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = Some(random);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let mut state = match self.db_profile {
            // single entrypoint: connect + migrate
            Some(profile) => {
                let conn = bootstrap_db(&profile, DbOwner::App).await?;
                AppState::new(conn, self.security_config)
            }
            None => AppState::without_db(self.security_config),
        };
        if let Some(rules) = self.rules {
            state = state.with_rules(rules);
        }
        if let Some(random) = self.random {
            state = state.with_random(random);
        }
        Ok(state)
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::random::FixedPick;

    #[tokio::test]
    async fn test_build_succeeds_without_db_option() {
        let state = build_state().build().await.unwrap();
        assert!(state.db().is_none());
    }

    #[tokio::test]
    async fn test_build_applies_overrides() {
        let rules = GameRules {
            min_participants: 4,
            ..GameRules::default()
        };
        let state = build_state()
            .with_rules(rules)
            .with_random(Arc::new(FixedPick(0)))
            .build()
            .await
            .unwrap();
        assert_eq!(state.rules.min_participants, 4);
        assert_eq!(state.random.pick_index(3), 0);
    }
}
