//! The externally visible game snapshot.
//!
//! Wolf roles and living players' words only appear in the `result` block,
//! which exists once the game reached its RESULT phase.

use serde::Serialize;
use time::OffsetDateTime;

use super::phase::{GameStatus, PhaseKind};
use super::roster::{self, ParticipantId, RosterEntry};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub opened: bool,
    pub message: String,
    #[serde(flatten)]
    pub detail: Option<GameDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantSummary {
    pub code: String,
    pub name: String,
    pub is_died: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub code: String,
    pub name: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EliminatedSummary {
    pub code: String,
    pub name: String,
    pub is_died: bool,
    pub secret_word: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealedParticipant {
    pub code: String,
    pub name: String,
    pub secret_word: Option<String>,
    pub is_wolf: bool,
    pub is_died: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Wolf,
    Human,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultView {
    pub participants: Vec<RevealedParticipant>,
    pub winner: Winner,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDetail {
    pub name: String,
    pub title: String,
    pub host: UserSummary,
    pub participants: Vec<ParticipantSummary>,
    pub max_members: i32,
    pub max_turns: i32,
    pub discussion_seconds: i32,
    pub current_phase: &'static str,
    pub phase_title: String,
    pub phase_message: String,
    pub phase_remaining_seconds: i64,
    pub completions: Vec<Completion>,
    pub eliminated: Option<EliminatedSummary>,
    pub runoff_candidates: Vec<UserSummary>,
    pub result: Option<ResultView>,
}

#[derive(Debug, Clone)]
pub struct GameHeader {
    pub name: String,
    pub title: String,
    pub host: UserSummary,
    pub max_members: i32,
    pub max_turns: i32,
    pub discussion_seconds: i32,
    pub finally_releasing: bool,
    pub status: GameStatus,
}

#[derive(Debug, Clone)]
pub struct PhaseSnapshot {
    pub kind: PhaseKind,
    pub title: String,
    pub message: String,
    pub deadline: OffsetDateTime,
    pub eliminated: Option<ParticipantId>,
}

pub struct ViewInput<'a> {
    pub header: &'a GameHeader,
    pub roster: &'a [RosterEntry],
    pub phase: &'a PhaseSnapshot,
    /// `(participant, completed)` for every action of the current phase.
    pub completions: &'a [(ParticipantId, bool)],
    pub runoff_candidates: &'a [ParticipantId],
    /// Message shown while the game is still open.
    pub open_message: &'a str,
    pub now: OffsetDateTime,
}

/// Whole seconds left until `deadline`, never negative.
pub fn remaining_seconds(deadline: OffsetDateTime, now: OffsetDateTime) -> i64 {
    (deadline - now).whole_seconds().max(0)
}

/// Humans win once every wolf has been eliminated.
pub fn winner(roster: &[RosterEntry]) -> Winner {
    if roster.iter().filter(|p| p.is_wolf).all(|p| p.is_died) {
        Winner::Human
    } else {
        Winner::Wolf
    }
}

fn summary(entry: &RosterEntry) -> UserSummary {
    UserSummary {
        code: entry.code.clone(),
        name: entry.name.clone(),
    }
}

fn result_view(roster: &[RosterEntry], finally_releasing: bool) -> ResultView {
    let participants = roster
        .iter()
        .filter(|p| finally_releasing || p.is_died)
        .map(|p| RevealedParticipant {
            code: p.code.clone(),
            name: p.name.clone(),
            secret_word: p.secret_word.clone(),
            is_wolf: p.is_wolf,
            is_died: p.is_died,
        })
        .collect();
    ResultView {
        participants,
        winner: winner(roster),
    }
}

fn detail(input: &ViewInput<'_>) -> GameDetail {
    let header = input.header;
    let phase = input.phase;

    let completions = input
        .completions
        .iter()
        .filter_map(|&(id, completed)| {
            roster::find(input.roster, id).map(|p| Completion {
                code: p.code.clone(),
                name: p.name.clone(),
                completed,
            })
        })
        .collect();

    let eliminated = phase
        .eliminated
        .and_then(|id| roster::find(input.roster, id))
        .map(|p| EliminatedSummary {
            code: p.code.clone(),
            name: p.name.clone(),
            is_died: p.is_died,
            secret_word: p.secret_word.clone(),
        });

    let runoff_candidates = input
        .runoff_candidates
        .iter()
        .filter_map(|&id| roster::find(input.roster, id))
        .map(summary)
        .collect();

    let result = (phase.kind == PhaseKind::Result)
        .then(|| result_view(input.roster, header.finally_releasing));

    GameDetail {
        name: header.name.clone(),
        title: header.title.clone(),
        host: header.host.clone(),
        participants: input
            .roster
            .iter()
            .map(|p| ParticipantSummary {
                code: p.code.clone(),
                name: p.name.clone(),
                is_died: p.is_died,
            })
            .collect(),
        max_members: header.max_members,
        max_turns: header.max_turns,
        discussion_seconds: header.discussion_seconds,
        current_phase: phase.kind.as_str(),
        phase_title: phase.title.clone(),
        phase_message: phase.message.clone(),
        phase_remaining_seconds: remaining_seconds(phase.deadline, input.now),
        completions,
        eliminated,
        runoff_candidates,
        result,
    }
}

pub fn build_view(input: ViewInput<'_>) -> GameView {
    match input.header.status {
        GameStatus::Opened => GameView {
            opened: true,
            message: input.open_message.to_string(),
            detail: Some(detail(&input)),
        },
        GameStatus::Completed => GameView {
            opened: false,
            message: GameStatus::Completed.closed_message().to_string(),
            detail: Some(detail(&input)),
        },
        status => closed_view(status),
    }
}

/// View for a game that ended without a result.
pub fn closed_view(status: GameStatus) -> GameView {
    GameView {
        opened: false,
        message: status.closed_message().to_string(),
        detail: None,
    }
}
