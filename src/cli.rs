//! CLI definitions and entry points for both binaries.

use chrono::NaiveDate;
use clap::Parser;
use colored::Colorize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::adapters::csv_adapter::{CsvPriceReplay, PriceBar};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_config_store::JsonConfigStore;
use crate::adapters::paper_broker::PaperBroker;
use crate::adapters::placeholder_backtest::PlaceholderBacktest;
use crate::domain::config::{DATE_FORMAT, Exchange, parse_cash_at_risk};
use crate::domain::error::ShellError;
use crate::domain::order::{Asset, Order};
use crate::domain::random_trader::{DecisionSource, RandomTrader, TickOutcome, UniformDecisions};
use crate::domain::settings::ShellSettings;
use crate::ports::trading_port::TradingPort;
use crate::shell::Shell;

pub const DEFAULT_SETTINGS_FILE: &str = "cryptoshell.ini";

#[derive(Parser, Debug)]
#[command(name = "cryptoshell", version, about = "Interactive shell for configuring crypto trading backtests")]
pub struct Cli {
    /// Shell settings INI file (defaults to ./cryptoshell.ini when present)
    #[arg(short, long)]
    pub settings: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(name = "randobot", version, about = "Replay the random trading strategy over a CSV of closes")]
pub struct RandobotCli {
    /// CSV file with `date` and `close` columns
    #[arg(short, long)]
    pub prices: PathBuf,
    /// Exchange label shown in the report; prices always come from `--prices`
    #[arg(long, default_value = "coinbase", value_parser = exchange_arg)]
    pub exchange: Exchange,
    #[arg(long, default_value = "BTC")]
    pub coin: String,
    #[arg(long, default_value = "USD")]
    pub quote: String,
    /// Starting cash in the quote currency
    #[arg(long, default_value_t = 10_000.0)]
    pub cash: f64,
    #[arg(long, default_value = "0.25", value_parser = cash_at_risk_arg)]
    pub cash_at_risk: f64,
    #[arg(long, default_value = "2023-06-01", value_parser = date_arg)]
    pub start: NaiveDate,
    #[arg(long, default_value = "2023-12-31", value_parser = date_arg)]
    pub end: NaiveDate,
    /// Seed for reproducible decisions
    #[arg(long)]
    pub seed: Option<u64>,
}

fn cash_at_risk_arg(raw: &str) -> Result<f64, String> {
    parse_cash_at_risk(raw).map_err(|e| e.to_string())
}

fn exchange_arg(raw: &str) -> Result<Exchange, String> {
    raw.parse().map_err(|e: ShellError| e.to_string())
}

fn date_arg(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| "expected YYYY-MM-DD".to_string())
}

pub fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Resolve shell settings: an explicit file must load, the default file is
/// optional.
pub fn load_settings(path: Option<&Path>) -> Result<ShellSettings, ShellError> {
    let (path, required) = match path {
        Some(p) => (p, true),
        None => (Path::new(DEFAULT_SETTINGS_FILE), false),
    };
    if !required && !path.exists() {
        return Ok(ShellSettings::default());
    }
    let adapter = FileConfigAdapter::from_file(path)?;
    Ok(ShellSettings::from_port(&adapter))
}

/// Exit with status 0 on Ctrl-C, whatever the shell is blocked on.
fn spawn_interrupt_watcher() {
    std::thread::spawn(|| {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                warn!(error = %e, "interrupt handling unavailable");
                return;
            }
        };
        if runtime.block_on(tokio::signal::ctrl_c()).is_ok() {
            println!("\nExiting due to keyboard interrupt");
            std::process::exit(0);
        }
    });
}

pub fn run(cli: Cli) -> ExitCode {
    let settings = match load_settings(cli.settings.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: failed to read settings: {e}");
            return ExitCode::from(2);
        }
    };
    init_logging(&settings.log_filter);
    if !settings.color {
        colored::control::set_override(false);
    }
    spawn_interrupt_watcher();

    info!(config_dir = %settings.config_dir.display(), "starting shell");
    let store = JsonConfigStore::new(&settings.config_dir);
    let mut shell = Shell::new(
        settings,
        Box::new(store),
        Box::new(PlaceholderBacktest),
        io::stdout(),
    );

    match shell.run(io::stdin().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format!("Error: {e}").red());
            ExitCode::FAILURE
        }
    }
}

/// Totals after a replay.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySummary {
    pub ticks: usize,
    pub ticks_without_price: usize,
    pub orders: usize,
    pub final_cash: f64,
    pub final_holdings: f64,
    pub final_equity: f64,
}

/// Drive `trader` through `bars`, one tick per bar.
pub fn run_replay_pipeline<D: DecisionSource>(
    trader: &mut RandomTrader<D>,
    broker: &mut PaperBroker,
    bars: &[PriceBar],
    mut on_order: impl FnMut(&PriceBar, &Order),
) -> Result<ReplaySummary, ShellError> {
    let mut ticks_without_price = 0;
    let mut orders = 0;

    for bar in bars {
        broker.set_price(bar.close);
        match trader.on_tick(&mut *broker)? {
            TickOutcome::NoPrice => ticks_without_price += 1,
            TickOutcome::Ordered(order) => {
                orders += 1;
                on_order(bar, &order);
            }
            TickOutcome::Held | TickOutcome::Skipped => {}
        }
    }

    Ok(ReplaySummary {
        ticks: bars.len(),
        ticks_without_price,
        orders,
        final_cash: broker.cash(),
        final_holdings: broker.holdings(),
        final_equity: broker.equity(),
    })
}

fn randobot_backtest<W: Write>(cli: &RandobotCli, out: &mut W) -> Result<ReplaySummary, ShellError> {
    writeln!(
        out,
        "Running backtest for {}/{} on {} from {} to {}",
        cli.coin, cli.quote, cli.exchange, cli.start, cli.end
    )?;
    let bars = CsvPriceReplay::new(&cli.prices).bars(cli.start, cli.end)?;
    info!(bars = bars.len(), path = %cli.prices.display(), "loaded prices");

    let decisions = match cli.seed {
        Some(seed) => UniformDecisions::seeded(seed),
        None => UniformDecisions::from_entropy(),
    };
    let mut trader = RandomTrader::new(&cli.coin, &cli.quote, cli.cash_at_risk, decisions);
    let mut broker = PaperBroker::new(Asset::crypto(&cli.coin), Asset::crypto(&cli.quote), cli.cash);

    let mut printed = Ok(());
    let summary = run_replay_pipeline(&mut trader, &mut broker, &bars, |bar, order| {
        if printed.is_ok() {
            printed = writeln!(out, "{} {}", bar.date, order.to_string().bright_magenta());
        }
    })?;
    printed?;
    Ok(summary)
}

fn print_summary<W: Write>(cli: &RandobotCli, summary: &ReplaySummary, out: &mut W) -> io::Result<()> {
    writeln!(out, "\n=== Replay Results ===")?;
    writeln!(out, "Ticks:            {}", summary.ticks)?;
    writeln!(out, "Missing prices:   {}", summary.ticks_without_price)?;
    writeln!(out, "Orders:           {}", summary.orders)?;
    writeln!(out, "Final cash:       {:.2} {}", summary.final_cash, cli.quote)?;
    writeln!(out, "Final holdings:   {:.8} {}", summary.final_holdings, cli.coin)?;
    writeln!(out, "Final equity:     {:.2} {}", summary.final_equity, cli.quote)
}

/// Replay, report to `out`, and return the process exit status. Every
/// failure is reported on `err` and exits 1.
pub fn randobot_status<O: Write, E: Write>(cli: &RandobotCli, out: &mut O, err: &mut E) -> u8 {
    let result = randobot_backtest(cli, out)
        .and_then(|summary| print_summary(cli, &summary, out).map_err(ShellError::from));
    match result {
        Ok(()) => 0,
        Err(e) => {
            let _ = writeln!(err, "Error during backtest: {e}");
            1
        }
    }
}

pub fn run_randobot(cli: RandobotCli) -> ExitCode {
    init_logging("info");
    ExitCode::from(randobot_status(&cli, &mut io::stdout(), &mut io::stderr()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn randobot_defaults() {
        let cli = RandobotCli::try_parse_from(["randobot", "--prices", "btc.csv"]).unwrap();
        assert_eq!(cli.coin, "BTC");
        assert_eq!(cli.cash_at_risk, 0.25);
        assert_eq!(cli.start, NaiveDate::from_ymd_opt(2023, 6, 1).unwrap());
        assert_eq!(cli.end, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert!(cli.seed.is_none());
    }

    #[test]
    fn randobot_rejects_out_of_range_cash_at_risk() {
        let parsed =
            RandobotCli::try_parse_from(["randobot", "-p", "btc.csv", "--cash-at-risk", "1.5"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn randobot_rejects_bad_dates() {
        let parsed = RandobotCli::try_parse_from(["randobot", "-p", "x.csv", "--start", "06/01/2023"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn explicit_missing_settings_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_settings(Some(&dir.path().join("nope.ini"))).is_err());
    }

    #[test]
    fn explicit_settings_file_is_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[shell]\nconfig_dir = /tmp/desk\ncolor = no\n[log]\nfilter = debug").unwrap();
        let settings = load_settings(Some(file.path())).unwrap();
        assert_eq!(settings.config_dir, PathBuf::from("/tmp/desk"));
        assert!(!settings.color);
        assert_eq!(settings.log_filter, "debug");
        assert_eq!(settings.default_config, "crypto_config.json");
    }

    #[test]
    fn shell_takes_optional_settings_flag() {
        assert!(Cli::try_parse_from(["cryptoshell"]).unwrap().settings.is_none());
        let cli = Cli::try_parse_from(["cryptoshell", "--settings", "desk.ini"]).unwrap();
        assert_eq!(cli.settings, Some(PathBuf::from("desk.ini")));
    }

    fn randobot_cli(prices: &Path, extra: &[&str]) -> RandobotCli {
        let prices = prices.to_string_lossy().into_owned();
        let mut args = vec!["randobot".to_string(), "--prices".to_string(), prices];
        args.extend(extra.iter().map(|a| a.to_string()));
        RandobotCli::try_parse_from(args).unwrap()
    }

    #[test]
    fn randobot_missing_prices_file_exits_one() {
        colored::control::set_override(false);
        let dir = tempfile::tempdir().unwrap();
        let cli = randobot_cli(&dir.path().join("missing.csv"), &[]);
        let (mut out, mut err) = (Vec::new(), Vec::new());

        assert_eq!(randobot_status(&cli, &mut out, &mut err), 1);
        let err = String::from_utf8(err).unwrap();
        assert!(err.starts_with("Error during backtest: "), "{err}");
        assert!(!String::from_utf8(out).unwrap().contains("Replay Results"));
    }

    #[test]
    fn randobot_malformed_close_exits_one() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "date,close\n2023-06-02,abc").unwrap();
        let cli = randobot_cli(file.path(), &[]);
        let mut err = Vec::new();
        assert_eq!(randobot_status(&cli, &mut Vec::new(), &mut err), 1);
        assert!(String::from_utf8(err).unwrap().contains("invalid close value"));
    }

    #[test]
    fn randobot_reports_replay_and_exits_zero() {
        colored::control::set_override(false);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "date,close\n2023-06-01,100\n2023-06-02,\n2023-06-03,105").unwrap();
        let cli = randobot_cli(file.path(), &["--exchange", "kraken", "--seed", "3"]);
        let (mut out, mut err) = (Vec::new(), Vec::new());

        assert_eq!(randobot_status(&cli, &mut out, &mut err), 0);
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Running backtest for BTC/USD on kraken from 2023-06-01 to 2023-12-31\n"));
        assert!(out.contains("Ticks:            3\n"));
        assert!(out.contains("Missing prices:   1\n"));
        assert!(err.is_empty());
    }

    #[test]
    fn randobot_rejects_unknown_exchange() {
        let parsed = RandobotCli::try_parse_from(["randobot", "-p", "x.csv", "--exchange", "mtgox"]);
        assert!(parsed.is_err());
        let cli = RandobotCli::try_parse_from(["randobot", "-p", "x.csv"]).unwrap();
        assert_eq!(cli.exchange, Exchange::Coinbase);
    }
}
