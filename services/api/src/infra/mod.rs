pub mod db;
pub mod mojang;
