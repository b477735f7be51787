//! Backtest port that acknowledges a run without simulating anything.

use tracing::info;

use crate::domain::backtest::{BacktestOutcome, BacktestParams};
use crate::domain::error::ShellError;
use crate::ports::backtest_port::BacktestPort;

pub struct PlaceholderBacktest;

impl BacktestPort for PlaceholderBacktest {
    fn run(&self, params: &BacktestParams) -> Result<BacktestOutcome, ShellError> {
        info!(
            exchange = %params.exchange,
            strategy = %params.strategy,
            pair = %params.pair(),
            "backtest requested; no engine attached"
        );
        Ok(BacktestOutcome {
            executed: false,
            notes: vec![
                "Note: This is a placeholder for the backtest functionality.".to_string(),
                format!(
                    "In the future, this will run the actual {} strategy.",
                    params.strategy
                ),
            ],
        })
    }
}
