//! Shell settings: where configurations are stored and how the shell looks.
//!
//! Read from an optional INI file:
//!
//! ```ini
//! [shell]
//! config_dir = crypto_journey
//! default_config = crypto_config.json
//! color = true
//!
//! [log]
//! filter = warn
//! ```

use std::path::PathBuf;

use crate::ports::config_port::ConfigPort;

pub const CONFIG_EXTENSION: &str = ".json";

#[derive(Debug, Clone, PartialEq)]
pub struct ShellSettings {
    pub config_dir: PathBuf,
    pub default_config: String,
    pub color: bool,
    pub log_filter: String,
}

impl Default for ShellSettings {
    fn default() -> Self {
        ShellSettings {
            config_dir: PathBuf::from("crypto_journey"),
            default_config: "crypto_config.json".to_string(),
            color: true,
            log_filter: "warn".to_string(),
        }
    }
}

impl ShellSettings {
    pub fn from_port(port: &dyn ConfigPort) -> Self {
        let defaults = ShellSettings::default();
        ShellSettings {
            config_dir: port
                .get_string("shell", "config_dir")
                .map(PathBuf::from)
                .unwrap_or(defaults.config_dir),
            default_config: port
                .get_string("shell", "default_config")
                .map(|name| with_extension(&name))
                .unwrap_or(defaults.default_config),
            color: port.get_bool("shell", "color", defaults.color),
            log_filter: port
                .get_string("log", "filter")
                .unwrap_or(defaults.log_filter),
        }
    }

    /// File name used by `save_config`/`load_config` for an optional argument.
    pub fn config_file_name(&self, requested: Option<&str>) -> String {
        match requested {
            Some(name) => with_extension(name),
            None => self.default_config.clone(),
        }
    }
}

fn with_extension(name: &str) -> String {
    if name.ends_with(CONFIG_EXTENSION) {
        name.to_string()
    } else {
        format!("{name}{CONFIG_EXTENSION}")
    }
}
