#![allow(dead_code)]

use cryptoshell::adapters::json_config_store::JsonConfigStore;
use cryptoshell::domain::backtest::{BacktestOutcome, BacktestParams};
use cryptoshell::domain::error::ShellError;
use cryptoshell::domain::order::{Asset, Order};
use cryptoshell::domain::random_trader::{Decision, DecisionSource};
use cryptoshell::domain::settings::ShellSettings;
use cryptoshell::ports::backtest_port::BacktestPort;
use cryptoshell::ports::trading_port::TradingPort;
use cryptoshell::shell::Shell;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use tempfile::TempDir;

/// Trading port that records every call.
pub struct MockTradingPort {
    pub cash: f64,
    pub price: Option<f64>,
    pub submitted: Vec<Order>,
    pub calls: Vec<String>,
    pub reject_orders: Option<String>,
}

impl MockTradingPort {
    pub fn new(cash: f64, price: Option<f64>) -> Self {
        Self {
            cash,
            price,
            submitted: Vec::new(),
            calls: Vec::new(),
            reject_orders: None,
        }
    }

    pub fn rejecting(mut self, reason: &str) -> Self {
        self.reject_orders = Some(reason.to_string());
        self
    }
}

impl TradingPort for MockTradingPort {
    fn cash(&self) -> f64 {
        self.cash
    }

    fn last_price(&self, _base: &Asset, _quote: &Asset) -> Option<f64> {
        self.price
    }

    fn submit_order(&mut self, order: Order) -> Result<(), ShellError> {
        self.calls.push(format!("submit {}", order.side));
        if let Some(reason) = &self.reject_orders {
            return Err(ShellError::OrderRejected {
                reason: reason.clone(),
            });
        }
        self.submitted.push(order);
        Ok(())
    }

    fn sell_all(&mut self) -> Result<(), ShellError> {
        self.calls.push("sell_all".to_string());
        Ok(())
    }
}

/// Decision source that replays a fixed script, then holds.
pub struct ScriptedDecisions {
    script: VecDeque<Decision>,
}

impl ScriptedDecisions {
    pub fn new(script: &[Decision]) -> Self {
        Self {
            script: script.iter().copied().collect(),
        }
    }
}

impl DecisionSource for ScriptedDecisions {
    fn next_decision(&mut self) -> Decision {
        self.script.pop_front().unwrap_or(Decision::Hold)
    }
}

/// Backtest port that records the params it was handed.
#[derive(Clone, Default)]
pub struct RecordingBacktest {
    pub received: Rc<RefCell<Vec<BacktestParams>>>,
    pub fail_with: Option<String>,
}

impl BacktestPort for RecordingBacktest {
    fn run(&self, params: &BacktestParams) -> Result<BacktestOutcome, ShellError> {
        self.received.borrow_mut().push(params.clone());
        match &self.fail_with {
            Some(reason) => Err(ShellError::Backtest {
                reason: reason.clone(),
            }),
            None => Ok(BacktestOutcome {
                executed: true,
                notes: vec!["Total Return: 0.00%".to_string()],
            }),
        }
    }
}

pub struct TestShell {
    pub dir: TempDir,
    pub shell: Shell<Vec<u8>>,
}

impl TestShell {
    pub fn new() -> Self {
        Self::with_backtest(RecordingBacktest::default())
    }

    pub fn with_backtest(backtest: RecordingBacktest) -> Self {
        colored::control::set_override(false);
        let dir = TempDir::new().unwrap();
        let settings = ShellSettings {
            config_dir: dir.path().join("crypto_journey"),
            ..ShellSettings::default()
        };
        let store = JsonConfigStore::new(&settings.config_dir);
        let shell = Shell::new(settings, Box::new(store), Box::new(backtest), Vec::new());
        Self { dir, shell }
    }

    /// Run `line` and return only the output it produced.
    pub fn exec(&mut self, line: &str) -> String {
        let before = self.shell.output().len();
        self.shell.execute_line(line).unwrap();
        String::from_utf8(self.shell.output()[before..].to_vec()).unwrap()
    }

    /// `show_config` output as `(key, value)` pairs.
    pub fn shown_config(&mut self) -> Vec<(String, String)> {
        self.exec("show_config")
            .lines()
            .skip(1)
            .filter_map(|l| l.split_once(": "))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    pub fn config_path(&self, file: &str) -> std::path::PathBuf {
        self.dir.path().join("crypto_journey").join(file)
    }
}
