//! Port traits implemented by the adapters in [`crate::adapters`].

pub mod backtest_port;
pub mod config_port;
pub mod config_store_port;
pub mod trading_port;
