pub mod auth;
pub mod player;
pub mod team;
