//! Game timing and bounds.
//!
//! Every limit the state machine enforces lives here so tests can shrink
//! deadlines without touching the rules themselves.

use std::env;
use std::ops::RangeInclusive;

use time::Duration;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct GameRules {
    /// Overall lifetime of an opened game.
    pub game_lifetime: Duration,
    pub ready_limit: Duration,
    pub input_limit: Duration,
    pub judgement_limit: Duration,
    pub execution_limit: Duration,
    /// Fewest participants needed to start.
    pub min_participants: usize,
    pub member_count: RangeInclusive<i32>,
    pub max_turns: RangeInclusive<i32>,
    pub discussion_seconds: RangeInclusive<i32>,
    /// Roles may only be dealt while the game has fewer phases than this.
    pub role_assignment_window: usize,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            game_lifetime: Duration::minutes(30),
            ready_limit: Duration::seconds(180),
            input_limit: Duration::seconds(180),
            judgement_limit: Duration::seconds(180),
            execution_limit: Duration::seconds(60),
            min_participants: 3,
            member_count: 3..=12,
            max_turns: 1..=7,
            discussion_seconds: 30..=600,
            role_assignment_window: 3,
        }
    }
}

impl GameRules {
    /// Defaults overridden by `WORDWOLF_*` variables (values in seconds / minutes).
    pub fn from_env() -> Result<Self, AppError> {
        let mut rules = Self::default();
        if let Some(minutes) = bounded_var("WORDWOLF_GAME_LIFETIME_MINUTES", LIFETIME_MINUTES)? {
            rules.game_lifetime = Duration::minutes(minutes);
        }
        if let Some(secs) = bounded_var("WORDWOLF_READY_SECONDS", PHASE_SECONDS)? {
            rules.ready_limit = Duration::seconds(secs);
        }
        if let Some(secs) = bounded_var("WORDWOLF_INPUT_SECONDS", PHASE_SECONDS)? {
            rules.input_limit = Duration::seconds(secs);
        }
        if let Some(secs) = bounded_var("WORDWOLF_JUDGEMENT_SECONDS", PHASE_SECONDS)? {
            rules.judgement_limit = Duration::seconds(secs);
        }
        if let Some(secs) = bounded_var("WORDWOLF_EXECUTION_SECONDS", PHASE_SECONDS)? {
            rules.execution_limit = Duration::seconds(secs);
        }
        if let Some(max) = parse_var::<i32>("WORDWOLF_MAX_MEMBERS")? {
            if max < *rules.member_count.start() {
                return Err(AppError::config(format!(
                    "WORDWOLF_MAX_MEMBERS must be at least {}",
                    rules.member_count.start()
                )));
            }
            rules.member_count = *rules.member_count.start()..=max;
        }
        Ok(rules)
    }
}

/// Accepted overrides: up to a day, at least one unit.
const LIFETIME_MINUTES: RangeInclusive<i64> = 1..=1440;
const PHASE_SECONDS: RangeInclusive<i64> = 1..=86_400;

fn bounded_var(name: &str, range: RangeInclusive<i64>) -> Result<Option<i64>, AppError> {
    match parse_var::<i64>(name)? {
        Some(value) if !range.contains(&value) => Err(AppError::config(format!(
            "{name} must be between {} and {}, got {value}",
            range.start(),
            range.end()
        ))),
        value => Ok(value),
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::config(format!("{name} must be a number, got '{raw}'"))),
        Err(_) => Ok(None),
    }
}
