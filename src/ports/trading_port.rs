//! Brokerage port driven by the strategy on every iteration.

use crate::domain::error::ShellError;
use crate::domain::order::{Asset, Order, Side};

pub trait TradingPort {
    /// Cash available in the quote currency.
    fn cash(&self) -> f64;

    /// Last traded price of `base` in `quote`, if the feed has one.
    fn last_price(&self, base: &Asset, quote: &Asset) -> Option<f64>;

    fn create_order(&self, base: Asset, quantity: f64, side: Side, quote: Asset) -> Order {
        Order::market(base, quantity, side, quote)
    }

    fn submit_order(&mut self, order: Order) -> Result<(), ShellError>;

    /// Close every open position at the current price.
    fn sell_all(&mut self) -> Result<(), ShellError>;
}
