pub mod auth;
pub mod health;
pub mod player;
pub mod team;
