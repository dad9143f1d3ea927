//! Vote tabulation for JUDGEMENT phases.

use std::collections::BTreeMap;

use super::roster::ParticipantId;

/// What a completed JUDGEMENT phase leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TallyOutcome {
    /// A single participant received the most votes.
    Eliminate(ParticipantId),
    /// Every living participant is tied; a runoff could not decide, so chance does.
    RandomTieBreak { tied: Vec<ParticipantId> },
    /// Re-vote among `candidates`, cast by the living participants outside the tie.
    Runoff {
        candidates: Vec<ParticipantId>,
        voters: Vec<ParticipantId>,
    },
}

/// Counts votes per living participant. Living participants nobody voted for
/// count zero; votes for anyone else are ignored.
pub fn count_votes(
    living: &[ParticipantId],
    targets: &[ParticipantId],
) -> BTreeMap<ParticipantId, usize> {
    let mut counts: BTreeMap<ParticipantId, usize> = living.iter().map(|&id| (id, 0)).collect();
    for target in targets {
        if let Some(n) = counts.get_mut(target) {
            *n += 1;
        }
    }
    counts
}

/// Participants tied at the highest count, in ascending id order.
pub fn top_rankers(counts: &BTreeMap<ParticipantId, usize>) -> Vec<ParticipantId> {
    let Some(max) = counts.values().copied().max() else {
        return Vec::new();
    };
    counts
        .iter()
        .filter(|(_, &n)| n == max)
        .map(|(&id, _)| id)
        .collect()
}

/// Decides the JUDGEMENT outcome. `living` must not be empty.
pub fn decide(living: &[ParticipantId], targets: &[ParticipantId]) -> TallyOutcome {
    let counts = count_votes(living, targets);
    let top = top_rankers(&counts);

    match top.as_slice() {
        [only] => TallyOutcome::Eliminate(*only),
        _ if top.len() == living.len() => TallyOutcome::RandomTieBreak { tied: top },
        _ => {
            let voters = living
                .iter()
                .copied()
                .filter(|id| !top.contains(id))
                .collect();
            TallyOutcome::Runoff {
                candidates: top,
                voters,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_top_ranker_is_eliminated() {
        assert_eq!(decide(&[1, 2, 3], &[2, 2, 1]), TallyOutcome::Eliminate(2));
    }

    #[test]
    fn test_two_way_tie_among_five_goes_to_runoff() {
        // A=1, B=2, C=3; voters 1..=5
        let outcome = decide(&[1, 2, 3, 4, 5], &[1, 1, 2, 2, 3]);
        assert_eq!(
            outcome,
            TallyOutcome::Runoff {
                candidates: vec![1, 2],
                voters: vec![3, 4, 5],
            }
        );
    }

    #[test]
    fn test_tie_covering_everyone_alive_is_random() {
        assert_eq!(
            decide(&[7, 9], &[9, 7]),
            TallyOutcome::RandomTieBreak { tied: vec![7, 9] }
        );
    }

    #[test]
    fn test_votes_for_the_dead_are_ignored() {
        let counts = count_votes(&[1, 2], &[1, 5, 5]);
        assert_eq!(counts.get(&1), Some(&1));
        assert_eq!(counts.get(&2), Some(&0));
        assert_eq!(counts.get(&5), None);
    }

    #[test]
    fn test_no_votes_ties_everyone() {
        assert_eq!(
            decide(&[1, 2, 3], &[]),
            TallyOutcome::RandomTieBreak {
                tied: vec![1, 2, 3]
            }
        );
    }
}
