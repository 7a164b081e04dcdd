//! Ambient plumbing shared by CMS services: config loading, error payloads,
//! health probes, request ids, tracing and serde helpers.

pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
