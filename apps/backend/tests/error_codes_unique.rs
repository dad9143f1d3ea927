use std::collections::HashSet;

use wordwolf::errors::ErrorCode;

#[test]
fn error_codes_are_unique() {
    let all = [
        // Keep in sync with ErrorCode enum variants
        ErrorCode::Unauthorized,
        ErrorCode::UnauthorizedMissingBearer,
        ErrorCode::UnauthorizedInvalidJwt,
        ErrorCode::UnauthorizedExpiredJwt,
        ErrorCode::Forbidden,
        ErrorCode::NotHost,
        ErrorCode::NotAMember,
        ErrorCode::WrongPassword,
        ErrorCode::ValidationError,
        ErrorCode::InvalidWord,
        ErrorCode::InvalidGameSettings,
        ErrorCode::InvalidVoteTarget,
        ErrorCode::InvalidPassword,
        ErrorCode::InvalidPagination,
        ErrorCode::BadRequest,
        ErrorCode::GameNotFound,
        ErrorCode::UserNotFound,
        ErrorCode::ParticipantNotFound,
        ErrorCode::PhaseNotFound,
        ErrorCode::NotFound,
        ErrorCode::PhaseMismatch,
        ErrorCode::AlreadyCompleted,
        ErrorCode::NotEnoughParticipants,
        ErrorCode::NotEligible,
        ErrorCode::NotRunoffCandidate,
        ErrorCode::GameClosed,
        ErrorCode::AlreadyJoined,
        ErrorCode::GameFull,
        ErrorCode::RecruitmentClosed,
        ErrorCode::GameNameTaken,
        ErrorCode::OptimisticLock,
        ErrorCode::Conflict,
        ErrorCode::DbError,
        ErrorCode::DbUnavailable,
        ErrorCode::DbTimeout,
        ErrorCode::Internal,
        ErrorCode::ConfigError,
        ErrorCode::DataCorruption,
    ];

    let mut seen = HashSet::new();
    for code in all {
        let s = code.as_str();
        assert!(seen.insert(s), "Duplicate error code string: {s}");
        assert_eq!(s, s.to_ascii_uppercase(), "{s} is not SCREAMING_SNAKE_CASE");
    }
}
