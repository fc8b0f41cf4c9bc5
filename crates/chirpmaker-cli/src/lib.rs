//! Chirpmaker CLI library.
//!
//! Command implementations and the settings file used by the `chirpmaker`
//! binary.

pub mod commands;
pub mod config;
