//! Domain error types.

/// Top-level error type for cryptoshell.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("Unknown parameter: {name}")]
    UnknownParameter { name: String },

    #[error("Unknown exchange: {value}")]
    UnknownExchange { value: String },

    #[error("Unknown strategy: {value}")]
    UnknownStrategy { value: String },

    #[error("cash_at_risk must be a float value")]
    CashAtRiskNotFloat { value: String },

    #[error("cash_at_risk must be between 0 and 1")]
    CashAtRiskOutOfRange { value: f64 },

    #[error("Invalid date format. Use YYYY-MM-DD")]
    InvalidDate { key: String, value: String },

    #[error("{reason}")]
    Usage {
        reason: String,
        usage: &'static str,
    },

    #[error("input is not valid UTF-8")]
    InvalidUtf8,

    #[error("File not found: {file}")]
    FileNotFound { file: String },

    #[error("Invalid JSON format in {file}")]
    InvalidJson { file: String, reason: String },

    #[error("could not read configuration from {file}: {reason}")]
    LoadFailed { file: String, reason: String },

    #[error("could not save configuration to {file}: {reason}")]
    SaveFailed { file: String, reason: String },

    #[error("price unavailable for {base}/{quote}")]
    PriceUnavailable { base: String, quote: String },

    #[error("order rejected: {reason}")]
    OrderRejected { reason: String },

    #[error("price feed error: {reason}")]
    PriceFeed { reason: String },

    #[error("backtest failed: {reason}")]
    Backtest { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ShellError {
    /// Follow-up line shown under the error in the shell, if any.
    pub fn hint(&self) -> Option<String> {
        match self {
            ShellError::UnknownParameter { .. } => Some(format!(
                "Available parameters: {}",
                crate::domain::config::Parameter::ALL
                    .iter()
                    .map(|p| p.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
            ShellError::UnknownExchange { .. } => {
                Some("Use 'list_exchanges' to see available options.".to_string())
            }
            ShellError::UnknownStrategy { .. } => {
                Some("Use 'list_strategies' to see available options.".to_string())
            }
            ShellError::Usage { usage, .. } => Some(format!("Usage: {usage}")),
            _ => None,
        }
    }

    /// True for rejections of user-supplied parameter values.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ShellError::UnknownParameter { .. }
                | ShellError::UnknownExchange { .. }
                | ShellError::UnknownStrategy { .. }
                | ShellError::CashAtRiskNotFloat { .. }
                | ShellError::CashAtRiskOutOfRange { .. }
                | ShellError::InvalidDate { .. }
                | ShellError::Usage { .. }
                | ShellError::InvalidUtf8
        )
    }
}
