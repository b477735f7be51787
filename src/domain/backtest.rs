//! Backtest parameters assembled from the shell configuration.

use chrono::NaiveDate;

use crate::domain::config::{Exchange, StrategyKind, TradingConfig};

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestParams {
    pub exchange: Exchange,
    pub strategy: StrategyKind,
    pub coin: String,
    pub quote: String,
    pub cash_at_risk: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub min_timestep: String,
}

impl BacktestParams {
    pub fn from_config(config: &TradingConfig) -> Self {
        BacktestParams {
            exchange: config.exchange(),
            strategy: config.strategy(),
            coin: config.coin().to_string(),
            quote: config.quote().to_string(),
            cash_at_risk: config.cash_at_risk(),
            start_date: config.start_date(),
            end_date: config.end_date(),
            min_timestep: config.min_timestep().to_string(),
        }
    }

    /// `COIN/QUOTE` pair label.
    pub fn pair(&self) -> String {
        format!("{}/{}", self.coin, self.quote)
    }
}

/// What a backtest engine reports back to the shell.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestOutcome {
    /// False when the engine only acknowledged the request.
    pub executed: bool,
    pub notes: Vec<String>,
}
