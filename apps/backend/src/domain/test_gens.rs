// Proptest generators for vote tabulation.

use proptest::prelude::*;

/// Living participant ids (1..=n) together with one ballot per voter.
pub fn living_and_ballots() -> impl Strategy<Value = (Vec<i64>, Vec<i64>)> {
    (2usize..=12).prop_flat_map(|n| {
        let living: Vec<i64> = (1..=n as i64).collect();
        let ballots = prop::collection::vec(1..=n as i64, 0..=n);
        (Just(living), ballots)
    })
}
