pub mod game_name;
pub mod password;
