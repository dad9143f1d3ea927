//! Game view assembly: redaction before RESULT, reveal at RESULT.

use time::OffsetDateTime;

use crate::domain::phase::{GameStatus, PhaseKind};
use crate::domain::test_state_helpers::{dead, entry, header, phase, wolf};
use crate::domain::view::{build_view, remaining_seconds, winner, ViewInput, Winner};

#[test]
fn test_open_view_hides_roles_and_words() {
    let now = OffsetDateTime::now_utc();
    let roster = vec![wolf(entry(1, "Aki")), entry(2, "Ben"), entry(3, "Chie")];
    let header = header(GameStatus::Opened, true);
    let phase = phase(PhaseKind::Discussion, now, 90);

    let view = build_view(ViewInput {
        header: &header,
        roster: &roster,
        phase: &phase,
        completions: &[],
        runoff_candidates: &[],
        open_message: "ok",
        now,
    });

    assert!(view.opened);
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["currentPhase"], "DISCUSSION");
    assert!(json["result"].is_null());
    let text = json.to_string();
    assert!(!text.contains("isWolf"));
    assert!(!text.contains("word-Aki"));
}

#[test]
fn test_execution_view_reveals_only_the_eliminated_word() {
    let now = OffsetDateTime::now_utc();
    let roster = vec![entry(1, "Aki"), dead(entry(2, "Ben")), wolf(entry(3, "Chie"))];
    let header = header(GameStatus::Opened, false);
    let mut phase = phase(PhaseKind::Execution, now, 60);
    phase.eliminated = Some(2);

    let view = build_view(ViewInput {
        header: &header,
        roster: &roster,
        phase: &phase,
        completions: &[(1, false), (2, true), (3, false)],
        runoff_candidates: &[],
        open_message: "ok",
        now,
    });

    let detail = view.detail.unwrap();
    let eliminated = detail.eliminated.unwrap();
    assert_eq!(eliminated.code, "u2");
    assert_eq!(eliminated.secret_word.as_deref(), Some("word-Ben"));
    assert_eq!(detail.completions.len(), 3);
    assert!(detail.completions[1].completed);
}

#[test]
fn test_result_view_respects_finally_releasing() {
    let now = OffsetDateTime::now_utc();
    let roster = vec![entry(1, "Aki"), dead(wolf(entry(2, "Ben"))), entry(3, "Chie")];
    let phase = phase(PhaseKind::Result, now, 0);

    for (releasing, expected) in [(true, 3), (false, 1)] {
        let header = header(GameStatus::Completed, releasing);
        let view = build_view(ViewInput {
            header: &header,
            roster: &roster,
            phase: &phase,
            completions: &[],
            runoff_candidates: &[],
            open_message: "ok",
            now,
        });
        assert!(!view.opened);
        let result = view.detail.unwrap().result.unwrap();
        assert_eq!(result.participants.len(), expected);
        assert_eq!(result.winner, Winner::Human);
    }
}

#[test]
fn test_terminal_without_result_has_no_detail() {
    let now = OffsetDateTime::now_utc();
    let header = header(GameStatus::Timeup, true);
    let phase = phase(PhaseKind::Input, now, -10);
    let view = build_view(ViewInput {
        header: &header,
        roster: &[entry(1, "Aki")],
        phase: &phase,
        completions: &[],
        runoff_candidates: &[],
        open_message: "ok",
        now,
    });
    assert!(!view.opened);
    assert!(view.detail.is_none());
    assert_eq!(view.message, GameStatus::Timeup.closed_message());
}

#[test]
fn test_remaining_seconds_floors_and_clamps() {
    let now = OffsetDateTime::now_utc();
    assert_eq!(remaining_seconds(now + time::Duration::milliseconds(2900), now), 2);
    assert_eq!(remaining_seconds(now - time::Duration::seconds(5), now), 0);
}

#[test]
fn test_winner_is_wolf_while_a_wolf_lives() {
    assert_eq!(winner(&[wolf(entry(1, "Aki")), entry(2, "Ben")]), Winner::Wolf);
    assert_eq!(winner(&[dead(wolf(entry(1, "Aki"))), entry(2, "Ben")]), Winner::Human);
}

#[test]
fn test_winner_wire_names() {
    assert_eq!(serde_json::to_value(Winner::Wolf).unwrap(), "wolf");
    assert_eq!(serde_json::to_value(Winner::Human).unwrap(), "human");
}
