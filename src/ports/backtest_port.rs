//! Backtest engine port.

use crate::domain::backtest::{BacktestOutcome, BacktestParams};
use crate::domain::error::ShellError;

/// Port for handing assembled parameters to a backtest engine.
pub trait BacktestPort {
    fn run(&self, params: &BacktestParams) -> Result<BacktestOutcome, ShellError>;
}
