//! Core types, errors, warnings, configuration, events, tracing, and constants
//! for the Posture scoring engine.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod types;
