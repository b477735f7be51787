//! Interactive read-eval-print loop over [`Command`]s.

use colored::Colorize;
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

use crate::domain::backtest::BacktestParams;
use crate::domain::command::{self, Command, CommandKind};
use crate::domain::config::{Exchange, Parameter, StrategyKind, TradingConfig};
use crate::domain::error::ShellError;
use crate::domain::settings::ShellSettings;
use crate::ports::backtest_port::BacktestPort;
use crate::ports::config_store_port::ConfigStorePort;

pub const SHELL_NAME: &str = "Crypto Trading Shell";
pub const PROMPT: &str = "crypto> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

pub struct Shell<W: Write> {
    config: TradingConfig,
    settings: ShellSettings,
    store: Box<dyn ConfigStorePort>,
    backtester: Box<dyn BacktestPort>,
    out: W,
}

impl<W: Write> Shell<W> {
    pub fn new(
        settings: ShellSettings,
        store: Box<dyn ConfigStorePort>,
        backtester: Box<dyn BacktestPort>,
        out: W,
    ) -> Self {
        Self {
            config: TradingConfig::default(),
            settings,
            store,
            backtester,
            out,
        }
    }

    pub fn config(&self) -> &TradingConfig {
        &self.config
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Prompt, read and execute lines until `exit`/`quit` or end of input.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> io::Result<()> {
        self.intro()?;
        let mut buf = Vec::new();
        loop {
            write!(self.out, "{}", PROMPT.green())?;
            self.out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                writeln!(self.out)?;
                self.goodbye()?;
                return Ok(());
            }
            let flow = match std::str::from_utf8(&buf) {
                Ok(line) => self.execute_line(line)?,
                Err(_) => {
                    self.report(&ShellError::InvalidUtf8)?;
                    Flow::Continue
                }
            };
            if flow == Flow::Stop {
                return Ok(());
            }
        }
    }

    /// Execute one line. Command failures are printed, never returned; only
    /// output errors escape.
    pub fn execute_line(&mut self, line: &str) -> io::Result<Flow> {
        let result = command::parse(line).and_then(|parsed| match parsed {
            Some(cmd) => self.dispatch(cmd),
            None => Ok(Flow::Continue),
        });
        match result {
            Ok(flow) => Ok(flow),
            Err(ShellError::Io(e)) => Err(e),
            Err(e) => {
                self.report(&e)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn dispatch(&mut self, cmd: Command) -> Result<Flow, ShellError> {
        match cmd {
            Command::Help(topic) => self.help(topic.as_deref())?,
            Command::Exit => {
                self.goodbye()?;
                return Ok(Flow::Stop);
            }
            Command::Version => self.version()?,
            Command::ListExchanges => self.list_exchanges()?,
            Command::ListStrategies => self.list_strategies()?,
            Command::ShowConfig => self.show_config()?,
            Command::SetParameter { name, value } => self.set_parameter(&name, &value)?,
            Command::SaveConfig(file) => self.save_config(file.as_deref())?,
            Command::LoadConfig(file) => self.load_config(file.as_deref())?,
            Command::RunBacktest => self.run_backtest()?,
            Command::Unknown(line) => self.unknown(&line)?,
        }
        Ok(Flow::Continue)
    }

    fn report(&mut self, err: &ShellError) -> io::Result<()> {
        if err.is_validation() {
            debug!(error = %err, "rejected");
        } else {
            warn!(error = %err, "command failed");
        }
        writeln!(self.out, "{}", format!("Error: {err}").red())?;
        if let Some(hint) = err.hint() {
            writeln!(self.out, "{hint}")?;
        }
        Ok(())
    }

    fn intro(&mut self) -> io::Result<()> {
        let title = format!("{SHELL_NAME} v{}", env!("CARGO_PKG_VERSION"));
        let border = "═".repeat(47);
        writeln!(self.out, "{}", format!("╔{border}╗").cyan())?;
        writeln!(self.out, "{}  {:<45}{}", "║".cyan(), title.yellow(), "║".cyan())?;
        for text in [
            "Type 'help' or '?' to list commands.",
            "Type 'exit' or 'quit' to exit.",
        ] {
            writeln!(self.out, "{}", format!("║  {text:<45}║").cyan())?;
        }
        writeln!(self.out, "{}", format!("╚{border}╝").cyan())?;
        Ok(())
    }

    fn goodbye(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "Goodbye!".yellow())
    }

    fn help_line(&mut self, kind: CommandKind) -> io::Result<()> {
        writeln!(self.out, "{} - {}", kind.usage().green(), kind.summary())
    }

    fn help(&mut self, topic: Option<&str>) -> Result<(), ShellError> {
        match topic {
            Some(name) => match CommandKind::lookup(name) {
                Some(kind) => self.help_line(kind)?,
                None => writeln!(self.out, "*** No help on {name}")?,
            },
            None => {
                writeln!(self.out, "{}", "Available commands:".cyan())?;
                for kind in CommandKind::BASIC {
                    self.help_line(kind)?;
                }
                writeln!(self.out, "{}", "\nTrading Commands:".yellow())?;
                for kind in CommandKind::TRADING {
                    self.help_line(kind)?;
                }
            }
        }
        Ok(())
    }

    fn version(&mut self) -> Result<(), ShellError> {
        writeln!(
            self.out,
            "{}",
            format!("{SHELL_NAME} v{}", env!("CARGO_PKG_VERSION")).cyan()
        )?;
        writeln!(
            self.out,
            "Built for {}/{}",
            std::env::consts::OS,
            std::env::consts::ARCH
        )?;
        Ok(())
    }

    fn list_options(&mut self, title: &str, names: &[&str], current: &str) -> Result<(), ShellError> {
        writeln!(self.out, "{}", title.cyan())?;
        for name in names {
            if *name == current {
                writeln!(self.out, "{} {}", name.green(), "(current)".yellow())?;
            } else {
                writeln!(self.out, "{}", name.green())?;
            }
        }
        Ok(())
    }

    fn list_exchanges(&mut self) -> Result<(), ShellError> {
        let names = Exchange::ALL.map(Exchange::name);
        let current = self.config.exchange().name();
        self.list_options("Available exchanges:", &names, current)
    }

    fn list_strategies(&mut self) -> Result<(), ShellError> {
        let names = StrategyKind::ALL.map(StrategyKind::name);
        let current = self.config.strategy().name();
        self.list_options("Available strategies:", &names, current)
    }

    fn show_config(&mut self) -> Result<(), ShellError> {
        writeln!(self.out, "{}", "Current configuration:".cyan())?;
        let entries: Vec<_> = self.config.entries().collect();
        for (param, value) in entries {
            writeln!(self.out, "{} {}", format!("{param}:").green(), value)?;
        }
        Ok(())
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), ShellError> {
        let param: Parameter = name.parse()?;
        let stored = self.config.set(param, value)?;
        debug!(parameter = %param, value = %stored, "parameter set");
        writeln!(
            self.out,
            "{}",
            format!("Parameter {param} set to {stored}").green()
        )?;
        Ok(())
    }

    fn save_config(&mut self, requested: Option<&str>) -> Result<(), ShellError> {
        let file_name = self.settings.config_file_name(requested);
        self.store.save(&file_name, &self.config)?;
        writeln!(
            self.out,
            "{}",
            format!("Configuration saved to {file_name}").green()
        )?;
        Ok(())
    }

    fn load_config(&mut self, requested: Option<&str>) -> Result<(), ShellError> {
        let file_name = self.settings.config_file_name(requested);
        self.config = self.store.load(&file_name)?;
        writeln!(
            self.out,
            "{}",
            format!("Configuration loaded from {file_name}").green()
        )?;
        Ok(())
    }

    fn run_backtest(&mut self) -> Result<(), ShellError> {
        writeln!(self.out, "{}", "Initializing backtest with configuration:".cyan())?;
        self.show_config()?;
        writeln!(
            self.out,
            "{}",
            "\nStarting backtest... This may take a moment.".yellow()
        )?;

        let params = BacktestParams::from_config(&self.config);
        writeln!(
            self.out,
            "Running backtest for {} on {} from {} to {}",
            params.pair(),
            params.exchange,
            params.start_date,
            params.end_date
        )?;

        let outcome = self.backtester.run(&params)?;
        if !outcome.executed {
            writeln!(self.out)?;
        }
        for note in &outcome.notes {
            if outcome.executed {
                writeln!(self.out, "{note}")?;
            } else {
                writeln!(self.out, "{}", note.red())?;
            }
        }
        Ok(())
    }

    fn unknown(&mut self, line: &str) -> Result<(), ShellError> {
        writeln!(self.out, "{}", format!("Unknown command: {line}").red())?;
        writeln!(self.out, "Type 'help' to see available commands.")?;
        Ok(())
    }
}
