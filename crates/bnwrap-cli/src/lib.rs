//! bnwrap CLI - command-line front end for the big-number demo
//!
//! With no subcommand the binary prints the curve order, runs the self-test
//! and shows its report.

pub mod commands;
pub mod config;

pub use commands::*;
pub use config::{CliConfig, ConfigError};
