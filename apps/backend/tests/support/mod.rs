#![allow(dead_code)]

pub mod game_table;
pub mod test_state;

pub use game_table::GameTable;
pub use test_state::{in_memory_state, user};
