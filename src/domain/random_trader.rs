//! Placeholder strategy: a uniform hold/buy/sell draw on every tick.
//!
//! The trader remembers only which side it last traded, as a
//! [`PositionState`]. Switching sides first liquidates through the port.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::domain::error::ShellError;
use crate::domain::order::{Asset, Order, Side};
use crate::ports::trading_port::TradingPort;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Hold,
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionState {
    #[default]
    Flat,
    Long,
    Short,
}

/// Where the trader's decisions come from.
pub trait DecisionSource {
    fn next_decision(&mut self) -> Decision;
}

/// Draws hold, buy and sell with equal probability.
pub struct UniformDecisions<R: Rng> {
    rng: R,
}

impl<R: Rng> UniformDecisions<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl UniformDecisions<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> DecisionSource for UniformDecisions<R> {
    fn next_decision(&mut self) -> Decision {
        match self.rng.gen_range(0..3) {
            0 => Decision::Hold,
            1 => Decision::Buy,
            _ => Decision::Sell,
        }
    }
}

/// Cash, price and order size for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sizing {
    pub cash: f64,
    pub last_price: Option<f64>,
    pub quantity: f64,
}

impl Sizing {
    pub fn affordable(&self) -> bool {
        match self.last_price {
            Some(price) => self.quantity > 0.0 && self.cash > self.quantity * price,
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The port had no price for the pair.
    NoPrice,
    /// Size was zero or not affordable; no decision was drawn.
    Skipped,
    Held,
    Ordered(Order),
}

pub struct RandomTrader<D: DecisionSource> {
    coin: String,
    quote: String,
    cash_at_risk: f64,
    state: PositionState,
    decisions: D,
}

impl<D: DecisionSource> RandomTrader<D> {
    pub fn new(coin: impl Into<String>, quote: impl Into<String>, cash_at_risk: f64, decisions: D) -> Self {
        Self {
            coin: coin.into(),
            quote: quote.into(),
            cash_at_risk,
            state: PositionState::Flat,
            decisions,
        }
    }

    pub fn state(&self) -> PositionState {
        self.state
    }

    fn base_asset(&self) -> Asset {
        Asset::crypto(&self.coin)
    }

    fn quote_asset(&self) -> Asset {
        Asset::crypto(&self.quote)
    }

    pub fn position_sizing(&self, port: &dyn TradingPort) -> Sizing {
        let cash = port.cash();
        let last_price = port.last_price(&self.base_asset(), &self.quote_asset());
        let quantity = match last_price {
            Some(price) => cash * self.cash_at_risk / price,
            None => {
                warn!(coin = %self.coin, quote = %self.quote, "could not get price");
                0.0
            }
        };
        Sizing {
            cash,
            last_price,
            quantity,
        }
    }

    /// Run one trading iteration against `port`.
    pub fn on_tick(&mut self, port: &mut dyn TradingPort) -> Result<TickOutcome, ShellError> {
        let sizing = self.position_sizing(port);
        if sizing.last_price.is_none() {
            return Ok(TickOutcome::NoPrice);
        }
        if !sizing.affordable() {
            return Ok(TickOutcome::Skipped);
        }

        let side = match self.decisions.next_decision() {
            Decision::Hold => return Ok(TickOutcome::Held),
            Decision::Buy => Side::Buy,
            Decision::Sell => Side::Sell,
        };

        let opposing = match side {
            Side::Buy => PositionState::Short,
            Side::Sell => PositionState::Long,
        };
        if self.state == opposing {
            info!(state = ?self.state, "liquidating before {side}");
            port.sell_all()?;
        }

        let order = port.create_order(self.base_asset(), sizing.quantity, side, self.quote_asset());
        info!(%order, "submitting order");
        port.submit_order(order.clone())?;
        self.state = match side {
            Side::Buy => PositionState::Long,
            Side::Sell => PositionState::Short,
        };
        Ok(TickOutcome::Ordered(order))
    }
}
