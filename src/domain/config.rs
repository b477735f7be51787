//! Trading configuration and per-parameter validation.
//!
//! [`TradingConfig`] holds the eight parameters the shell edits. Every field
//! has its own validated setter; a rejected value leaves the config untouched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::ShellError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exchange {
    Coinbase,
    Kraken,
    Binance,
    Bitfinex,
}

impl Exchange {
    pub const ALL: [Exchange; 4] = [
        Exchange::Coinbase,
        Exchange::Kraken,
        Exchange::Binance,
        Exchange::Bitfinex,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Exchange::Coinbase => "coinbase",
            Exchange::Kraken => "kraken",
            Exchange::Binance => "binance",
            Exchange::Bitfinex => "bitfinex",
        }
    }
}

impl FromStr for Exchange {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Exchange::ALL
            .into_iter()
            .find(|e| e.name() == s)
            .ok_or_else(|| ShellError::UnknownExchange {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Random,
    SmaCrossover,
    RsiStrategy,
    SentimentBased,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Random,
        StrategyKind::SmaCrossover,
        StrategyKind::RsiStrategy,
        StrategyKind::SentimentBased,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Random => "random",
            StrategyKind::SmaCrossover => "sma_crossover",
            StrategyKind::RsiStrategy => "rsi_strategy",
            StrategyKind::SentimentBased => "sentiment_based",
        }
    }
}

impl FromStr for StrategyKind {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| ShellError::UnknownStrategy {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The configuration keys, in display and serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    Exchange,
    Strategy,
    Coin,
    Quote,
    CashAtRisk,
    StartDate,
    EndDate,
    MinTimestep,
}

impl Parameter {
    pub const ALL: [Parameter; 8] = [
        Parameter::Exchange,
        Parameter::Strategy,
        Parameter::Coin,
        Parameter::Quote,
        Parameter::CashAtRisk,
        Parameter::StartDate,
        Parameter::EndDate,
        Parameter::MinTimestep,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Parameter::Exchange => "exchange",
            Parameter::Strategy => "strategy",
            Parameter::Coin => "coin",
            Parameter::Quote => "quote",
            Parameter::CashAtRisk => "cash_at_risk",
            Parameter::StartDate => "start_date",
            Parameter::EndDate => "end_date",
            Parameter::MinTimestep => "min_timestep",
        }
    }
}

/// Parameter names are matched case-insensitively.
impl FromStr for Parameter {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        Parameter::ALL
            .into_iter()
            .find(|p| p.name() == lowered)
            .ok_or(ShellError::UnknownParameter { name: lowered })
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TradingConfig {
    exchange: Exchange,
    strategy: StrategyKind,
    coin: String,
    quote: String,
    cash_at_risk: f64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    min_timestep: String,
}

impl Default for TradingConfig {
    fn default() -> Self {
        TradingConfig {
            exchange: Exchange::Coinbase,
            strategy: StrategyKind::Random,
            coin: "BTC".to_string(),
            quote: "USD".to_string(),
            cash_at_risk: 0.25,
            start_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap_or_default(),
            min_timestep: "day".to_string(),
        }
    }
}

impl TradingConfig {
    pub fn exchange(&self) -> Exchange {
        self.exchange
    }

    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    pub fn coin(&self) -> &str {
        &self.coin
    }

    pub fn quote(&self) -> &str {
        &self.quote
    }

    pub fn cash_at_risk(&self) -> f64 {
        self.cash_at_risk
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn min_timestep(&self) -> &str {
        &self.min_timestep
    }

    pub fn set_exchange(&mut self, raw: &str) -> Result<Exchange, ShellError> {
        self.exchange = raw.parse()?;
        Ok(self.exchange)
    }

    pub fn set_strategy(&mut self, raw: &str) -> Result<StrategyKind, ShellError> {
        self.strategy = raw.parse()?;
        Ok(self.strategy)
    }

    pub fn set_coin(&mut self, raw: &str) {
        self.coin = raw.to_string();
    }

    pub fn set_quote(&mut self, raw: &str) {
        self.quote = raw.to_string();
    }

    pub fn set_cash_at_risk(&mut self, raw: &str) -> Result<f64, ShellError> {
        self.cash_at_risk = parse_cash_at_risk(raw)?;
        Ok(self.cash_at_risk)
    }

    pub fn set_start_date(&mut self, raw: &str) -> Result<NaiveDate, ShellError> {
        self.start_date = parse_date(Parameter::StartDate, raw)?;
        Ok(self.start_date)
    }

    pub fn set_end_date(&mut self, raw: &str) -> Result<NaiveDate, ShellError> {
        self.end_date = parse_date(Parameter::EndDate, raw)?;
        Ok(self.end_date)
    }

    pub fn set_min_timestep(&mut self, raw: &str) {
        self.min_timestep = raw.to_string();
    }

    /// Validate `raw` for `param` and store it. Returns the stored value as
    /// it will appear in `show_config`.
    pub fn set(&mut self, param: Parameter, raw: &str) -> Result<String, ShellError> {
        match param {
            Parameter::Exchange => {
                self.set_exchange(raw)?;
            }
            Parameter::Strategy => {
                self.set_strategy(raw)?;
            }
            Parameter::Coin => self.set_coin(raw),
            Parameter::Quote => self.set_quote(raw),
            Parameter::CashAtRisk => {
                self.set_cash_at_risk(raw)?;
            }
            Parameter::StartDate => {
                self.set_start_date(raw)?;
            }
            Parameter::EndDate => {
                self.set_end_date(raw)?;
            }
            Parameter::MinTimestep => self.set_min_timestep(raw),
        }
        Ok(self.value(param))
    }

    /// Render one field for display.
    pub fn value(&self, param: Parameter) -> String {
        match param {
            Parameter::Exchange => self.exchange.to_string(),
            Parameter::Strategy => self.strategy.to_string(),
            Parameter::Coin => self.coin.clone(),
            Parameter::Quote => self.quote.clone(),
            // Debug keeps the decimal point on whole numbers (1.0, not 1).
            Parameter::CashAtRisk => format!("{:?}", self.cash_at_risk),
            Parameter::StartDate => self.start_date.format(DATE_FORMAT).to_string(),
            Parameter::EndDate => self.end_date.format(DATE_FORMAT).to_string(),
            Parameter::MinTimestep => self.min_timestep.clone(),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (Parameter, String)> + '_ {
        Parameter::ALL.into_iter().map(|p| (p, self.value(p)))
    }

    /// True when `cash_at_risk` satisfies the bound `set_parameter` enforces.
    /// Configs loaded from disk are not re-checked against it.
    pub fn cash_at_risk_in_range(&self) -> bool {
        cash_at_risk_in_range(self.cash_at_risk)
    }
}

fn cash_at_risk_in_range(value: f64) -> bool {
    value > 0.0 && value <= 1.0
}

/// Parse a fraction of cash in (0, 1]. NaN is out of range.
pub fn parse_cash_at_risk(raw: &str) -> Result<f64, ShellError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ShellError::CashAtRiskNotFloat {
            value: raw.to_string(),
        })?;
    if !cash_at_risk_in_range(value) {
        return Err(ShellError::CashAtRiskOutOfRange { value });
    }
    Ok(value)
}

pub fn parse_date(param: Parameter, raw: &str) -> Result<NaiveDate, ShellError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| ShellError::InvalidDate {
        key: param.name().to_string(),
        value: raw.to_string(),
    })
}
