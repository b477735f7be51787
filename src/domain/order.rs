//! Assets and orders exchanged with a trading port.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetClass {
    Crypto,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub symbol: String,
    pub class: AssetClass,
}

impl Asset {
    pub fn crypto(symbol: impl Into<String>) -> Self {
        Asset {
            symbol: symbol.into(),
            class: AssetClass::Crypto,
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("buy"),
            Side::Sell => f.write_str("sell"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKind {
    Market,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub base: Asset,
    pub quote: Asset,
    pub quantity: f64,
    pub side: Side,
    pub kind: OrderKind,
}

impl Order {
    pub fn market(base: Asset, quantity: f64, side: Side, quote: Asset) -> Self {
        Order {
            base,
            quote,
            quantity,
            side,
            kind: OrderKind::Market,
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "market order | {} {:.8} {}/{}",
            self.side, self.quantity, self.base, self.quote
        )
    }
}
