//! CLI module for revolver - command-line interface.

pub mod commands;

pub use commands::Cli;
