//! Availability finder CLI library.
//!
//! This crate provides the CLI interface for the availability finder.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, ReportArgs};
pub use config::Config;
