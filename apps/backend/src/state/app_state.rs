use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::config::game::GameRules;
use crate::domain::random::{RandomSource, ThreadRandom};

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    db: Option<DatabaseConnection>,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    /// Deadlines and bounds for every game
    pub rules: GameRules,
    /// Source of chance for role assignment and tie-breaks
    pub random: Arc<dyn RandomSource>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self {
            db: Some(db),
            security,
            rules: GameRules::default(),
            random: Arc::new(ThreadRandom),
        }
    }

    /// State without a database connection (for testing)
    pub fn without_db(security: SecurityConfig) -> Self {
        Self {
            db: None,
            security,
            rules: GameRules::default(),
            random: Arc::new(ThreadRandom),
        }
    }

    pub fn with_rules(mut self, rules: GameRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
