//! JSON file persistence for the trading configuration.
//!
//! Files live in one directory and are written with 4-space indentation in
//! field order, so saving an unchanged config reproduces the same bytes.

use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::domain::config::TradingConfig;
use crate::domain::error::ShellError;
use crate::ports::config_store_port::ConfigStorePort;

pub struct JsonConfigStore {
    dir: PathBuf,
}

impl JsonConfigStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn to_json(config: &TradingConfig) -> Result<Vec<u8>, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        config.serialize(&mut ser)?;
        Ok(buf)
    }
}

impl ConfigStorePort for JsonConfigStore {
    fn save(&self, file_name: &str, config: &TradingConfig) -> Result<PathBuf, ShellError> {
        let path = self.dir.join(file_name);
        let save_failed = |reason: String| ShellError::SaveFailed {
            file: file_name.to_string(),
            reason,
        };

        let json = Self::to_json(config).map_err(|e| save_failed(e.to_string()))?;
        fs::create_dir_all(&self.dir).map_err(|e| save_failed(e.to_string()))?;
        fs::write(&path, json).map_err(|e| save_failed(e.to_string()))?;

        info!(path = %path.display(), "configuration saved");
        Ok(path)
    }

    fn load(&self, file_name: &str) -> Result<TradingConfig, ShellError> {
        let path = self.dir.join(file_name);
        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ShellError::FileNotFound {
                file: file_name.to_string(),
            },
            _ => ShellError::LoadFailed {
                file: file_name.to_string(),
                reason: e.to_string(),
            },
        })?;

        let config: TradingConfig =
            serde_json::from_str(&content).map_err(|e| ShellError::InvalidJson {
                file: file_name.to_string(),
                reason: e.to_string(),
            })?;

        if !config.cash_at_risk_in_range() {
            warn!(
                file = file_name,
                cash_at_risk = config.cash_at_risk(),
                "loaded cash_at_risk is outside (0, 1]"
            );
        }
        info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }
}
