pub mod game_participants;
pub mod game_phases;
pub mod games;
pub mod phase_actions;
pub mod runoff_candidates;
pub mod users;
pub mod votes;

pub use game_participants::Entity as GameParticipants;
pub use game_phases::Entity as GamePhases;
pub use games::Entity as Games;
pub use phase_actions::Entity as PhaseActions;
pub use runoff_candidates::Entity as RunoffCandidates;
pub use users::Entity as Users;
pub use votes::Entity as Votes;
