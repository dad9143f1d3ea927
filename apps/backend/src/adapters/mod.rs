pub mod actions_sea;
pub mod games_sea;
pub mod participants_sea;
pub mod phases_sea;
pub mod users_sea;
pub mod votes_sea;
