//! In-memory trading port for a single pair.
//!
//! Fills every market order in full at the current replay price. Selling
//! more than is held opens a short.

use tracing::debug;

use crate::domain::error::ShellError;
use crate::domain::order::{Asset, Order, Side};
use crate::ports::trading_port::TradingPort;

#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    pub side: Side,
    pub quantity: f64,
    pub price: f64,
}

pub struct PaperBroker {
    base: Asset,
    quote: Asset,
    cash: f64,
    holdings: f64,
    price: Option<f64>,
    fills: Vec<Fill>,
}

impl PaperBroker {
    pub fn new(base: Asset, quote: Asset, cash: f64) -> Self {
        Self {
            base,
            quote,
            cash,
            holdings: 0.0,
            price: None,
            fills: Vec::new(),
        }
    }

    /// Advance the replay to a new price (or none).
    pub fn set_price(&mut self, price: Option<f64>) {
        self.price = price;
    }

    /// Signed base-asset position; negative when short.
    pub fn holdings(&self) -> f64 {
        self.holdings
    }

    pub fn fills(&self) -> &[Fill] {
        &self.fills
    }

    /// Cash plus holdings marked at the last price.
    pub fn equity(&self) -> f64 {
        self.cash + self.holdings * self.price.unwrap_or(0.0)
    }

    fn current_price(&self) -> Result<f64, ShellError> {
        self.price.ok_or_else(|| ShellError::PriceUnavailable {
            base: self.base.symbol.clone(),
            quote: self.quote.symbol.clone(),
        })
    }

    fn fill(&mut self, side: Side, quantity: f64, price: f64) {
        match side {
            Side::Buy => {
                self.cash -= quantity * price;
                self.holdings += quantity;
            }
            Side::Sell => {
                self.cash += quantity * price;
                self.holdings -= quantity;
            }
        }
        debug!(%side, quantity, price, cash = self.cash, holdings = self.holdings, "filled");
        self.fills.push(Fill {
            side,
            quantity,
            price,
        });
    }
}

impl TradingPort for PaperBroker {
    fn cash(&self) -> f64 {
        self.cash
    }

    fn last_price(&self, base: &Asset, quote: &Asset) -> Option<f64> {
        if *base == self.base && *quote == self.quote {
            self.price
        } else {
            None
        }
    }

    fn submit_order(&mut self, order: Order) -> Result<(), ShellError> {
        if order.base != self.base || order.quote != self.quote {
            return Err(ShellError::OrderRejected {
                reason: format!("pair {}/{} is not traded here", order.base, order.quote),
            });
        }
        if !(order.quantity > 0.0) {
            return Err(ShellError::OrderRejected {
                reason: format!("quantity must be positive, got {}", order.quantity),
            });
        }
        let price = self.current_price()?;
        self.fill(order.side, order.quantity, price);
        Ok(())
    }

    fn sell_all(&mut self) -> Result<(), ShellError> {
        if self.holdings == 0.0 {
            return Ok(());
        }
        let price = self.current_price()?;
        let (side, quantity) = if self.holdings > 0.0 {
            (Side::Sell, self.holdings)
        } else {
            (Side::Buy, -self.holdings)
        };
        self.fill(side, quantity, price);
        self.holdings = 0.0;
        Ok(())
    }
}
