//! Game flow service: the phase state machine on top of the repos.
//!
//! Every inbound game operation runs the same way:
//! 1. load the game and check the requester takes part in it,
//! 2. reconcile expired deadlines (`deadline.rs`),
//! 3. record the action in its own transaction (`player_actions.rs`),
//! 4. try to advance the phase in a second transaction (`transitions.rs`).
//!
//! Step 4 is best-effort: its failure is logged and the recorded action stands.

mod deadline;
mod player_actions;
mod transitions;
mod view;

use std::sync::Arc;

use sea_orm::ConnectionTrait;

pub use deadline::Reconciled;

use crate::config::game::GameRules;
use crate::domain::random::RandomSource;
use crate::domain::{roster, RosterEntry};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ForbiddenKind};
use crate::repos::games::Game;
use crate::repos::phases::Phase;
use crate::repos::{games, participants, phases};
use crate::state::app_state::AppState;

/// Stateless apart from the rules and the random source; cheap to clone into
/// transaction closures.
#[derive(Debug, Clone)]
pub struct GameFlowService {
    rules: GameRules,
    random: Arc<dyn RandomSource>,
}

/// A game as seen by one of its participants.
#[derive(Debug, Clone)]
pub struct GameContext {
    pub game: Game,
    pub phase: Phase,
    pub roster: Vec<RosterEntry>,
    pub requester: RosterEntry,
}

impl GameContext {
    pub fn requester_is_host(&self) -> bool {
        self.game.is_host(self.requester.user_id)
    }
}

impl GameFlowService {
    pub fn new(rules: GameRules, random: Arc<dyn RandomSource>) -> Self {
        Self { rules, random }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(state.rules.clone(), Arc::clone(&state.random))
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Load `game_name` for `user_id`, failing with `NOT_A_MEMBER` when the
    /// user does not take part in it.
    pub async fn load_context<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game_name: &str,
        user_id: i64,
    ) -> Result<GameContext, AppError> {
        let game = games::require_by_name(conn, game_name).await?;
        let roster = participants::load_roster(conn, game.id).await?;
        let requester = roster
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned()
            .ok_or_else(|| {
                DomainError::forbidden(
                    ForbiddenKind::NotAMember,
                    "You are not a participant of this game",
                )
            })?;
        let phase = phases::require_current(conn, game.id).await?;

        Ok(GameContext {
            game,
            phase,
            roster,
            requester,
        })
    }
}

/// Display name of a participant, for phase messages.
fn display_name(roster: &[RosterEntry], participant_id: i64) -> String {
    roster::find(roster, participant_id)
        .map(|p| p.name.clone())
        .unwrap_or_default()
}
