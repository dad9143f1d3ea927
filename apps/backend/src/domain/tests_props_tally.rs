//! Property tests for vote tabulation (pure domain, no DB).
//!
//! - Exactly one outcome shape per tally, and it always names living participants
//! - A runoff never includes its candidates among the voters
//! - Random tie-breaks only happen when everyone alive is tied

use proptest::prelude::*;

use crate::domain::tally::{count_votes, decide, top_rankers, TallyOutcome};
use crate::domain::test_gens::living_and_ballots;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_counts_cover_every_living_participant((living, ballots) in living_and_ballots()) {
        let counts = count_votes(&living, &ballots);
        prop_assert_eq!(counts.len(), living.len());
        prop_assert_eq!(counts.values().sum::<usize>(), ballots.len());
    }

    #[test]
    fn prop_outcome_matches_top_rankers((living, ballots) in living_and_ballots()) {
        let top = top_rankers(&count_votes(&living, &ballots));
        prop_assert!(!top.is_empty());

        match decide(&living, &ballots) {
            TallyOutcome::Eliminate(id) => {
                prop_assert_eq!(top, vec![id]);
            }
            TallyOutcome::RandomTieBreak { tied } => {
                prop_assert!(tied.len() > 1);
                prop_assert_eq!(tied.len(), living.len());
                prop_assert_eq!(tied, top);
            }
            TallyOutcome::Runoff { candidates, voters } => {
                prop_assert!(candidates.len() > 1);
                prop_assert!(candidates.len() < living.len());
                prop_assert_eq!(&candidates, &top);
                prop_assert_eq!(candidates.len() + voters.len(), living.len());
                prop_assert!(voters.iter().all(|v| !candidates.contains(v)));
            }
        }
    }

    #[test]
    fn prop_unanimous_vote_eliminates_target(
        n in 3usize..=12,
        pick in 0usize..12,
    ) {
        let living: Vec<i64> = (1..=n as i64).collect();
        let target = living[pick % n];
        let ballots = vec![target; n];
        prop_assert_eq!(decide(&living, &ballots), TallyOutcome::Eliminate(target));
    }
}
