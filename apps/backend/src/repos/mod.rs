//! Repository functions for the domain layer.

pub mod actions;
pub mod games;
pub mod participants;
pub mod phases;
pub mod users;
