#![forbid(unsafe_code)]

//! Crash-resumable line-oriented command interpreter.
//!
//! Every state transition is checkpointed to a [`persistence::DurableSlot`]
//! before the next line is read or written, so a session killed at any point
//! resumes exactly where it stopped.

pub mod channel;
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod models;
pub mod orchestrator;
pub mod persistence;

pub use config::GlobalConfig;
pub use errors::{AppError, Result};
