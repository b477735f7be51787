//! cryptoshell: interactive configuration shell for crypto trading backtests.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`]. [`shell`] is the interactive
//! loop and [`cli`] wires both binaries together.

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod shell;
pub mod cli;
