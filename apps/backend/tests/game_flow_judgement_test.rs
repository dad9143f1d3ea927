mod common;
mod support;

use common::assert_code;
use support::game_table::GameTable;
use wordwolf::domain::random::FixedPick;
use wordwolf::domain::PhaseKind;
use wordwolf::errors::ErrorCode;
use wordwolf::repos::phases;

#[tokio::test]
async fn test_non_host_poll_does_not_open_judgement() {
    let table = GameTable::open(2, FixedPick(0)).await;
    table.reach_discussion().await;
    table.expire_phase().await;

    let view = table
        .flow()
        .game_view(table.db(), &table.name, table.guest(1).id)
        .await
        .unwrap();

    assert!(view.opened);
    assert_eq!(table.phase().await.kind, PhaseKind::Discussion);
}

#[tokio::test]
async fn test_repeated_host_reconcile_opens_one_judgement() {
    let table = GameTable::open(2, FixedPick(0)).await;
    table.reach_discussion().await;
    table.expire_phase().await;

    let flow = table.flow();
    for _ in 0..2 {
        let ctx = flow
            .load_context(table.db(), &table.name, table.host.id)
            .await
            .unwrap();
        let (_, outcome) = flow.reconcile(table.db(), ctx).await.unwrap();
        assert!(outcome.opened);
    }

    let game = table.game().await;
    let judgements = phases::count_of_kind(table.db(), game.id, PhaseKind::Judgement)
        .await
        .unwrap();
    assert_eq!(judgements, 1);
}

#[tokio::test]
async fn test_stale_judgement_transition_loses_the_race() {
    let table = GameTable::open(2, FixedPick(0)).await;
    table.reach_discussion().await;
    table.expire_phase().await;

    // Both contexts are loaded before either reconciles
    let flow = table.flow();
    let first = flow
        .load_context(table.db(), &table.name, table.host.id)
        .await
        .unwrap();
    let second = first.clone();

    flow.reconcile(table.db(), first).await.unwrap();
    let (ctx, outcome) = flow.reconcile(table.db(), second).await.unwrap();

    assert!(outcome.opened);
    assert_eq!(ctx.phase.kind, PhaseKind::Judgement);
    assert_eq!(
        table.phase_kinds().await,
        vec![
            PhaseKind::Ready,
            PhaseKind::Input,
            PhaseKind::Discussion,
            PhaseKind::Judgement
        ]
    );
}

#[tokio::test]
async fn test_clear_majority_eliminates_and_opens_execution() {
    let table = GameTable::open(2, FixedPick(0)).await;
    table.reach_discussion().await;
    table.open_judgement().await;
    let (host, g1, g2) = (&table.host, table.guest(1), table.guest(2));

    table.vote(host, g2).await.unwrap();
    table.vote(g1, g2).await.unwrap();
    table.vote(g2, host).await.unwrap();

    let phase = table.phase().await;
    let target = table.entry(g2).await;
    assert_eq!(phase.kind, PhaseKind::Execution);
    assert_eq!(phase.eliminated, Some(target.participant_id));
    assert_eq!(phase.message, "guest2 was executed");
    assert!(target.is_died);
}

#[tokio::test]
async fn test_second_vote_is_rejected() {
    let table = GameTable::open(2, FixedPick(0)).await;
    table.reach_discussion().await;
    table.open_judgement().await;

    table.vote(&table.host, table.guest(1)).await.unwrap();
    let again = table.vote(&table.host, table.guest(2)).await;

    assert_code(again, ErrorCode::AlreadyCompleted);
}

#[tokio::test]
async fn test_vote_for_unknown_code_is_not_found() {
    let table = GameTable::open(2, FixedPick(0)).await;
    table.reach_discussion().await;
    table.open_judgement().await;

    let result = table
        .flow()
        .submit_vote(table.db(), &table.name, table.host.id, "nobody")
        .await;

    assert_code(result, ErrorCode::ParticipantNotFound);
}

#[tokio::test]
async fn test_blank_vote_target_is_rejected_before_reconciling() {
    let table = GameTable::open(2, FixedPick(0)).await;
    table.reach_discussion().await;
    table.expire_phase().await;

    for blank in ["", "   "] {
        let result = table
            .flow()
            .submit_vote(table.db(), &table.name, table.host.id, blank)
            .await;
        assert_code(result, ErrorCode::InvalidVoteTarget);
    }

    // The host's expired discussion would otherwise have moved on.
    assert_eq!(table.phase().await.kind, PhaseKind::Discussion);
}

#[tokio::test]
async fn test_five_way_vote_with_two_leaders_goes_to_runoff() {
    let table = GameTable::open(4, FixedPick(0)).await;
    table.reach_discussion().await;
    table.open_judgement().await;

    let (a, b, c) = (&table.host, table.guest(1), table.guest(2));
    let (d, e) = (table.guest(3), table.guest(4));
    table.vote(a, a).await.unwrap();
    table.vote(b, a).await.unwrap();
    table.vote(c, b).await.unwrap();
    table.vote(d, b).await.unwrap();
    table.vote(e, c).await.unwrap();

    let runoff = table.phase().await;
    assert_eq!(runoff.kind, PhaseKind::Judgement);
    assert_eq!(runoff.title, "Runoff vote");

    let (pa, pb) = (table.entry(a).await, table.entry(b).await);
    let candidates = phases::runoff_candidates(table.db(), runoff.id).await.unwrap();
    assert_eq!(candidates, vec![pa.participant_id, pb.participant_id]);

    let view = table
        .flow()
        .game_view(table.db(), &table.name, c.id)
        .await
        .unwrap()
        .detail
        .unwrap();
    let pending: Vec<&str> = view
        .completions
        .iter()
        .filter(|c| !c.completed)
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(pending, vec!["guest2", "guest3", "guest4"]);
    assert_eq!(view.runoff_candidates.len(), 2);

    // Tied candidates sit the runoff out
    assert_code(table.vote(a, b).await, ErrorCode::NotEligible);
    // Only the tied may be voted for
    assert_code(table.vote(c, e).await, ErrorCode::NotRunoffCandidate);

    table.vote(c, a).await.unwrap();
    table.vote(d, a).await.unwrap();
    table.vote(e, b).await.unwrap();

    let execution = table.phase().await;
    assert_eq!(execution.kind, PhaseKind::Execution);
    assert_eq!(execution.eliminated, Some(pa.participant_id));
}

/// Host is the wolf; guest2 falls first, then the remaining two tie.
#[tokio::test]
async fn test_tie_between_last_two_is_broken_at_random() {
    let table = GameTable::open(2, FixedPick(0)).await;
    let (host, g1, g2) = (&table.host, table.guest(1), table.guest(2));

    table.reach_discussion().await;
    table.open_judgement().await;
    table.vote(host, g2).await.unwrap();
    table.vote(g1, g2).await.unwrap();
    table.vote(g2, host).await.unwrap();
    table.acknowledge_all().await;
    assert_eq!(table.phase().await.kind, PhaseKind::Discussion);

    table.open_judgement().await;
    // The dead no longer vote
    assert_code(table.vote(g2, g1).await, ErrorCode::NotEligible);
    // Nor can they be voted for
    assert_code(table.vote(host, g2).await, ErrorCode::InvalidVoteTarget);

    table.vote(host, g1).await.unwrap();
    table.vote(g1, host).await.unwrap();

    let phase = table.phase().await;
    assert_eq!(phase.kind, PhaseKind::Execution);
    assert!(phase.message.contains("at random"), "{}", phase.message);

    let roster = table.roster().await;
    let fallen: Vec<_> = roster
        .iter()
        .filter(|p| p.user_id != g2.id && p.is_died)
        .collect();
    assert_eq!(fallen.len(), 1);
    assert_eq!(phase.eliminated, Some(fallen[0].participant_id));
    // FixedPick(0) takes the lowest participant id among the tied
    assert_eq!(fallen[0].user_id, host.id);
}

#[tokio::test]
async fn test_vote_outside_judgement_is_a_phase_mismatch() {
    let table = GameTable::open(2, FixedPick(0)).await;
    table.reach_discussion().await;

    assert_code(
        table.vote(&table.host, table.guest(1)).await,
        ErrorCode::PhaseMismatch,
    );
}
