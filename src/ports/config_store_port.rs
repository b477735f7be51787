//! Persistence port for the trading configuration.

use crate::domain::config::TradingConfig;
use crate::domain::error::ShellError;
use std::path::PathBuf;

pub trait ConfigStorePort {
    /// Write `config` under `file_name`, returning the path written.
    fn save(&self, file_name: &str, config: &TradingConfig) -> Result<PathBuf, ShellError>;

    /// Read the configuration stored under `file_name`.
    fn load(&self, file_name: &str) -> Result<TradingConfig, ShellError>;
}
