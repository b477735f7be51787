//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod file_config_adapter;
pub mod json_config_store;
pub mod paper_broker;
pub mod placeholder_backtest;
