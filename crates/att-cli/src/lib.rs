//! Attendance CLI library.
//!
//! This crate provides the command-line front end for the reconciliation
//! engine: loading swipe batches, applying query criteria and printing rows.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
