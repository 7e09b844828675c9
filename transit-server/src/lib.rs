//! Madrid transit tool server.
//!
//! Exposes BiciMad bike-share and EMT bus-network lookups as agent tools,
//! normalizing upstream responses into a stable success/error envelope.

pub mod config;
pub mod domain;
pub mod emt;
pub mod envelope;
pub mod geocode;
pub mod tools;
pub mod web;
