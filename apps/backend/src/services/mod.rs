pub mod game_flow;
pub mod games;
pub mod users;
