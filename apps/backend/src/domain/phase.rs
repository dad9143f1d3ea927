//! Phase kinds, game statuses and the copy shown when a phase opens.

pub use crate::entities::game_phases::PhaseKind;
pub use crate::entities::games::GameStatus;

impl PhaseKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PhaseKind::Ready => "READY",
            PhaseKind::Input => "INPUT",
            PhaseKind::Discussion => "DISCUSSION",
            PhaseKind::Judgement => "JUDGEMENT",
            PhaseKind::Execution => "EXECUTION",
            PhaseKind::Result => "RESULT",
        }
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, PhaseKind::Result)
    }

    /// Phases that move on once every seeded action is completed.
    pub const fn advances_on_completion(&self) -> bool {
        matches!(
            self,
            PhaseKind::Input | PhaseKind::Judgement | PhaseKind::Execution
        )
    }
}

impl GameStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Opened => "OPENED",
            GameStatus::Timeup => "TIMEUP",
            GameStatus::Cancel => "CANCEL",
            GameStatus::Collapse => "COLLAPSE",
            GameStatus::Completed => "COMPLETED",
            GameStatus::Error => "ERROR",
        }
    }

    pub const fn is_open(&self) -> bool {
        matches!(self, GameStatus::Opened)
    }

    /// Message reported to players once the game can no longer be played.
    pub const fn closed_message(&self) -> &'static str {
        match self {
            GameStatus::Opened => "The game is in progress",
            GameStatus::Timeup => "The game ended because time ran out",
            GameStatus::Cancel => "The game was cancelled by the host",
            GameStatus::Collapse => "The game was disbanded by its participants",
            GameStatus::Completed => "The game has finished",
            GameStatus::Error => "The game ended abnormally",
        }
    }
}

/// Title and message stored on a phase row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseNotice {
    pub title: String,
    pub message: String,
}

impl PhaseNotice {
    fn new(title: &str, message: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            message: message.into(),
        }
    }

    pub fn ready() -> Self {
        Self::new("Waiting for players", "Share the game name and start when everyone is in")
    }

    pub fn input() -> Self {
        Self::new("Word input", "The game has started\nEnter your secret word")
    }

    pub fn discussion() -> Self {
        Self::new("Discussion", "Everyone has entered a word!\nStart the discussion")
    }

    pub fn rediscussion() -> Self {
        Self::new("Discussion", "The wolf is still among you\nDiscuss again")
    }

    pub fn judgement() -> Self {
        Self::new("Judgement", "Vote for the player you suspect")
    }

    pub fn runoff() -> Self {
        Self::new("Runoff vote", "The vote was tied, so a runoff vote will be held")
    }

    pub fn execution(name: &str) -> Self {
        Self::new("Execution", format!("{name} was executed"))
    }

    pub fn random_execution(name: &str) -> Self {
        Self::new(
            "Execution",
            format!("The vote was completely tied, so {name} was executed at random"),
        )
    }

    pub fn result(message: &str) -> Self {
        Self::new("Result", message)
    }
}
