//! Test utilities for CMS services.
//!
//! Provides bearer-token helpers and an in-process fake of the Mojang profile
//! API. Import from `[dev-dependencies]` only.

pub mod auth;
pub mod mojang;
