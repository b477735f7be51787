//! Strategy stub tests against a mock trading port and the paper broker.

mod common;

use approx::assert_relative_eq;
use common::*;
use cryptoshell::adapters::csv_adapter::PriceBar;
use cryptoshell::adapters::paper_broker::PaperBroker;
use cryptoshell::cli::run_replay_pipeline;
use cryptoshell::domain::error::ShellError;
use cryptoshell::domain::order::{Asset, OrderKind, Side};
use cryptoshell::domain::random_trader::{
    Decision, PositionState, RandomTrader, TickOutcome, UniformDecisions,
};
use chrono::NaiveDate;

fn trader(script: &[Decision]) -> RandomTrader<ScriptedDecisions> {
    RandomTrader::new("BTC", "USD", 0.25, ScriptedDecisions::new(script))
}

mod on_tick {
    use super::*;

    #[test]
    fn missing_price_places_no_order() {
        let mut port = MockTradingPort::new(10_000.0, None);
        let mut t = trader(&[Decision::Buy]);
        assert_eq!(t.on_tick(&mut port).unwrap(), TickOutcome::NoPrice);
        assert!(port.calls.is_empty());
        assert_eq!(t.state(), PositionState::Flat);
    }

    #[test]
    fn buy_submits_market_order_for_sized_quantity() {
        let mut port = MockTradingPort::new(10_000.0, Some(25_000.0));
        let mut t = trader(&[Decision::Buy]);
        let outcome = t.on_tick(&mut port).unwrap();

        let TickOutcome::Ordered(order) = outcome else {
            panic!("expected an order, got {outcome:?}");
        };
        assert_eq!(order.side, Side::Buy);
        assert_eq!(order.kind, OrderKind::Market);
        assert_eq!(order.base, Asset::crypto("BTC"));
        assert_eq!(order.quote, Asset::crypto("USD"));
        assert_relative_eq!(order.quantity, 0.1);
        assert_eq!(port.submitted.len(), 1);
        assert_eq!(t.state(), PositionState::Long);
    }

    #[test]
    fn switching_sides_liquidates_first() {
        let mut port = MockTradingPort::new(10_000.0, Some(100.0));
        let mut t = trader(&[Decision::Buy, Decision::Sell, Decision::Buy]);
        for _ in 0..3 {
            t.on_tick(&mut port).unwrap();
        }
        assert_eq!(
            port.calls,
            vec!["submit buy", "sell_all", "submit sell", "sell_all", "submit buy"]
        );
        assert_eq!(t.state(), PositionState::Long);
    }

    #[test]
    fn repeating_a_side_does_not_liquidate() {
        let mut port = MockTradingPort::new(10_000.0, Some(100.0));
        let mut t = trader(&[Decision::Sell, Decision::Sell]);
        t.on_tick(&mut port).unwrap();
        t.on_tick(&mut port).unwrap();
        assert_eq!(port.calls, vec!["submit sell", "submit sell"]);
        assert_eq!(t.state(), PositionState::Short);
    }

    #[test]
    fn hold_leaves_port_untouched() {
        let mut port = MockTradingPort::new(10_000.0, Some(100.0));
        let mut t = trader(&[Decision::Hold]);
        assert_eq!(t.on_tick(&mut port).unwrap(), TickOutcome::Held);
        assert!(port.calls.is_empty());
    }

    #[test]
    fn no_cash_skips_without_drawing() {
        let mut port = MockTradingPort::new(0.0, Some(100.0));
        let mut t = trader(&[Decision::Buy, Decision::Sell]);
        assert_eq!(t.on_tick(&mut port).unwrap(), TickOutcome::Skipped);
        port.cash = 1_000.0;
        // The first scripted decision was not consumed by the skipped tick.
        let TickOutcome::Ordered(order) = t.on_tick(&mut port).unwrap() else {
            panic!("expected an order");
        };
        assert_eq!(order.side, Side::Buy);
    }

    #[test]
    fn rejected_order_propagates_and_keeps_state() {
        let mut port = MockTradingPort::new(10_000.0, Some(100.0)).rejecting("halted");
        let mut t = trader(&[Decision::Buy]);
        let err = t.on_tick(&mut port).unwrap_err();
        assert!(matches!(err, ShellError::OrderRejected { reason } if reason == "halted"));
        assert_eq!(t.state(), PositionState::Flat);
    }
}

mod replay {
    use super::*;

    fn bar(day: u32, close: Option<f64>) -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(2023, 6, day).unwrap(),
            close,
        }
    }

    fn broker() -> PaperBroker {
        PaperBroker::new(Asset::crypto("BTC"), Asset::crypto("USD"), 10_000.0)
    }

    #[test]
    fn scripted_replay_through_paper_broker() {
        let bars = [bar(1, Some(100.0)), bar(2, None), bar(3, Some(110.0)), bar(4, Some(120.0))];
        let mut t = trader(&[Decision::Buy, Decision::Sell, Decision::Hold]);
        let mut b = broker();
        let mut printed = Vec::new();

        let summary = run_replay_pipeline(&mut t, &mut b, &bars, |bar, order| {
            printed.push((bar.date, order.side));
        })
        .unwrap();

        assert_eq!(summary.ticks, 4);
        assert_eq!(summary.ticks_without_price, 1);
        assert_eq!(summary.orders, 2);
        assert_eq!(printed.len(), 2);
        assert_eq!(printed[1].1, Side::Sell);

        // Day 1: buy 25 @ 100. Day 3: size off the 7_500 cash left, liquidate
        // 25 @ 110, then go short that size @ 110.
        let short = 0.25 * 7_500.0 / 110.0;
        assert_relative_eq!(summary.final_holdings, -short, epsilon = 1e-9);
        assert_relative_eq!(summary.final_cash, 10_250.0 + short * 110.0, epsilon = 1e-9);
        assert_relative_eq!(summary.final_equity, summary.final_cash - short * 120.0, epsilon = 1e-9);
        assert_eq!(b.fills().len(), 3);
        assert_eq!(t.state(), PositionState::Short);
    }

    #[test]
    fn seeded_random_replay_is_reproducible() {
        let bars: Vec<_> = (1..=30).map(|d| bar(d, Some(100.0 + d as f64))).collect();
        let run = || {
            let mut t = RandomTrader::new("BTC", "USD", 0.2, UniformDecisions::seeded(11));
            let mut b = broker();
            run_replay_pipeline(&mut t, &mut b, &bars, |_, _| {}).unwrap()
        };
        assert_eq!(run(), run());
    }
}
