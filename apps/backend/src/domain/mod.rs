//! Domain layer: pure game rules, no I/O.

pub mod deadline;
pub mod phase;
pub mod random;
pub mod roster;
pub mod tally;
pub mod turn_end;
pub mod validation;
pub mod view;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_state_helpers;
#[cfg(test)]
mod tests_props_tally;
#[cfg(test)]
mod tests_view;

pub use phase::{GameStatus, PhaseKind, PhaseNotice};
pub use roster::{ParticipantId, RosterEntry};
