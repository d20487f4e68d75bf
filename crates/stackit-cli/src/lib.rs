//! StackIt CLI library.
//!
//! This library provides the presentation shell for the StackIt Q&A forum:
//! the session identity, configuration, the shell state driving the store,
//! output formatting and the interactive REPL.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod identity;
pub mod markup;
pub mod output;
pub mod repl;
pub mod shell;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use identity::SessionIdentity;
pub use output::Formatter;
pub use shell::Shell;
