pub mod players;
pub mod teams;
pub mod users;
