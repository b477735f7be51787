//! Shell command grammar.
//!
//! A line is split at its first whitespace into a command name and the rest;
//! a leading `?` is its own name.
//! Names are matched exactly; anything unrecognised becomes
//! [`Command::Unknown`] so the loop can report it and carry on.

use crate::domain::error::ShellError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Help,
    Exit,
    Version,
    ListExchanges,
    ListStrategies,
    ShowConfig,
    SetParameter,
    SaveConfig,
    LoadConfig,
    RunBacktest,
}

impl CommandKind {
    /// Listed under "Available commands".
    pub const BASIC: [CommandKind; 3] = [CommandKind::Help, CommandKind::Exit, CommandKind::Version];

    /// Listed under "Trading Commands".
    pub const TRADING: [CommandKind; 7] = [
        CommandKind::ListExchanges,
        CommandKind::ListStrategies,
        CommandKind::ShowConfig,
        CommandKind::SetParameter,
        CommandKind::SaveConfig,
        CommandKind::LoadConfig,
        CommandKind::RunBacktest,
    ];

    /// Every name this command answers to. The first is canonical.
    pub fn names(self) -> &'static [&'static str] {
        match self {
            CommandKind::Help => &["help", "?"],
            CommandKind::Exit => &["exit", "quit"],
            CommandKind::Version => &["version"],
            CommandKind::ListExchanges => &["list_exchanges"],
            CommandKind::ListStrategies => &["list_strategies"],
            CommandKind::ShowConfig => &["show_config"],
            CommandKind::SetParameter => &["set_parameter"],
            CommandKind::SaveConfig => &["save_config"],
            CommandKind::LoadConfig => &["load_config"],
            CommandKind::RunBacktest => &["run_backtest"],
        }
    }

    pub fn usage(self) -> &'static str {
        match self {
            CommandKind::Help => "help",
            CommandKind::Exit => "quit, exit",
            CommandKind::Version => "version",
            CommandKind::ListExchanges => "list_exchanges",
            CommandKind::ListStrategies => "list_strategies",
            CommandKind::ShowConfig => "show_config",
            CommandKind::SetParameter => "set_parameter <name> <value>",
            CommandKind::SaveConfig => "save_config <filename>",
            CommandKind::LoadConfig => "load_config <filename>",
            CommandKind::RunBacktest => "run_backtest",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            CommandKind::Help => "Show this help message",
            CommandKind::Exit => "Exit the shell",
            CommandKind::Version => "Show version information",
            CommandKind::ListExchanges => "List available exchanges",
            CommandKind::ListStrategies => "List available trading strategies",
            CommandKind::ShowConfig => "Show current configuration",
            CommandKind::SetParameter => "Set configuration parameter",
            CommandKind::SaveConfig => "Save configuration to file",
            CommandKind::LoadConfig => "Load configuration from file",
            CommandKind::RunBacktest => "Run backtest with current configuration",
        }
    }

    pub fn lookup(name: &str) -> Option<CommandKind> {
        CommandKind::BASIC
            .into_iter()
            .chain(CommandKind::TRADING)
            .find(|kind| kind.names().contains(&name))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help(Option<String>),
    Exit,
    Version,
    ListExchanges,
    ListStrategies,
    ShowConfig,
    SetParameter { name: String, value: String },
    SaveConfig(Option<String>),
    LoadConfig(Option<String>),
    RunBacktest,
    Unknown(String),
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, ShellError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    // `?topic` is `help topic`.
    let (name, rest) = if let Some(topic) = line.strip_prefix('?') {
        ("?", topic.trim())
    } else {
        match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        }
    };
    let argument = (!rest.is_empty()).then(|| rest.to_string());

    let Some(kind) = CommandKind::lookup(name) else {
        return Ok(Some(Command::Unknown(line.to_string())));
    };

    let command = match kind {
        CommandKind::Help => Command::Help(argument),
        CommandKind::Exit => Command::Exit,
        CommandKind::Version => Command::Version,
        CommandKind::ListExchanges => Command::ListExchanges,
        CommandKind::ListStrategies => Command::ListStrategies,
        CommandKind::ShowConfig => Command::ShowConfig,
        CommandKind::SetParameter => {
            let mut tokens = rest.split_whitespace();
            match (tokens.next(), tokens.next()) {
                (Some(name), Some(value)) => Command::SetParameter {
                    name: name.to_string(),
                    value: value.to_string(),
                },
                _ => {
                    return Err(ShellError::Usage {
                        reason: "Missing parameter name or value".to_string(),
                        usage: kind.usage(),
                    });
                }
            }
        }
        CommandKind::SaveConfig => Command::SaveConfig(argument),
        CommandKind::LoadConfig => Command::LoadConfig(argument),
        CommandKind::RunBacktest => Command::RunBacktest,
    };
    Ok(Some(command))
}
