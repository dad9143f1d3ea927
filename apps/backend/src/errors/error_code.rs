//! Error codes for the word-wolf API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    Unauthorized,
    UnauthorizedMissingBearer,
    UnauthorizedInvalidJwt,
    UnauthorizedExpiredJwt,
    Forbidden,
    /// Host-only operation attempted by another participant
    NotHost,
    /// Requester does not participate in the game
    NotAMember,
    /// Join password did not match
    WrongPassword,

    // Request Validation
    ValidationError,
    InvalidWord,
    InvalidGameSettings,
    InvalidVoteTarget,
    InvalidPassword,
    InvalidPagination,
    BadRequest,

    // Resource Not Found
    GameNotFound,
    UserNotFound,
    ParticipantNotFound,
    PhaseNotFound,
    NotFound,

    // Game state conflicts
    PhaseMismatch,
    AlreadyCompleted,
    NotEnoughParticipants,
    NotEligible,
    NotRunoffCandidate,
    GameClosed,
    AlreadyJoined,
    GameFull,
    RecruitmentClosed,
    GameNameTaken,
    OptimisticLock,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    DbError,
    DbUnavailable,
    DbTimeout,
    Internal,
    ConfigError,
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::Forbidden => "FORBIDDEN",
            Self::NotHost => "NOT_HOST",
            Self::NotAMember => "NOT_A_MEMBER",
            Self::WrongPassword => "WRONG_PASSWORD",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidWord => "INVALID_WORD",
            Self::InvalidGameSettings => "INVALID_GAME_SETTINGS",
            Self::InvalidVoteTarget => "INVALID_VOTE_TARGET",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::InvalidPagination => "INVALID_PAGINATION",
            Self::BadRequest => "BAD_REQUEST",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ParticipantNotFound => "PARTICIPANT_NOT_FOUND",
            Self::PhaseNotFound => "PHASE_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::AlreadyCompleted => "ALREADY_COMPLETED",
            Self::NotEnoughParticipants => "NOT_ENOUGH_PARTICIPANTS",
            Self::NotEligible => "NOT_ELIGIBLE",
            Self::NotRunoffCandidate => "NOT_RUNOFF_CANDIDATE",
            Self::GameClosed => "GAME_CLOSED",
            Self::AlreadyJoined => "ALREADY_JOINED",
            Self::GameFull => "GAME_FULL",
            Self::RecruitmentClosed => "RECRUITMENT_CLOSED",
            Self::GameNameTaken => "GAME_NAME_TAKEN",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
