//! CLI subcommands.

pub mod catalog;
pub mod demo;
pub mod repl;
