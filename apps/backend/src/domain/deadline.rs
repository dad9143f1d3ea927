//! Lazy deadline enforcement: what a request must do about expired deadlines
//! before it touches the game.

use time::OffsetDateTime;

use super::phase::{GameStatus, PhaseKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineVerdict {
    /// Nothing expired; proceed.
    Open,
    /// The game already reached a terminal status.
    Closed(GameStatus),
    /// The game or its phase ran out of time; mark it TIMEUP.
    Expire,
    /// Discussion is over; the host's request opens JUDGEMENT.
    OpenJudgement,
    /// An unacknowledged EXECUTION still has to resolve the turn.
    ResolveTurnEnd,
    /// RESULT is terminal; nothing to do.
    Finished,
}

#[derive(Debug, Clone, Copy)]
pub struct DeadlineInput {
    pub status: GameStatus,
    pub game_deadline: OffsetDateTime,
    pub phase_kind: PhaseKind,
    pub phase_deadline: OffsetDateTime,
    pub requester_is_host: bool,
    pub now: OffsetDateTime,
}

pub fn evaluate(input: DeadlineInput) -> DeadlineVerdict {
    if !input.status.is_open() {
        return DeadlineVerdict::Closed(input.status);
    }
    if input.game_deadline <= input.now {
        return DeadlineVerdict::Expire;
    }
    if input.phase_kind.is_terminal() {
        return DeadlineVerdict::Finished;
    }
    if input.phase_deadline > input.now {
        return DeadlineVerdict::Open;
    }

    match input.phase_kind {
        PhaseKind::Discussion if input.requester_is_host => DeadlineVerdict::OpenJudgement,
        // Other players keep polling until the host's request moves the game on
        PhaseKind::Discussion => DeadlineVerdict::Open,
        PhaseKind::Execution => DeadlineVerdict::ResolveTurnEnd,
        PhaseKind::Result => DeadlineVerdict::Finished,
        PhaseKind::Ready | PhaseKind::Input | PhaseKind::Judgement => DeadlineVerdict::Expire,
    }
}
