//! CLI module for outreach - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for campaign management,
//! message generation and lead capture.

pub mod commands;

pub use commands::Cli;
