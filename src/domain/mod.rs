//! Core domain types and logic.

pub mod backtest;
pub mod command;
pub mod config;
pub mod error;
pub mod order;
pub mod random_trader;
pub mod settings;
