use std::{fs, io};

use thiserror::Error;

use crate::cli::{commands, output, registry::CommandRegistry};
use crate::config::{self, Config, ConfigError};
use crate::core::{LedgerManager, OpenReport};
use crate::errors::LedgerError;
use crate::ledger::{display_category, Amount, Transaction};
use crate::storage::JsonFileStorage;

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Failure of a single shell command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("exit requested")]
    ExitRequested,
}

/// Failure that ends the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// State shared by every command handler for the lifetime of the shell.
pub struct ShellContext {
    pub(crate) manager: LedgerManager,
    pub(crate) config: Config,
    pub(crate) registry: CommandRegistry,
    mode: CliMode,
    pub(crate) running: bool,
}

impl ShellContext {
    /// Loads configuration, opens the ledger and runs the startup recurring pass.
    pub fn new(mode: CliMode) -> Result<(Self, OpenReport), CliError> {
        let config_manager = config::default_manager();
        let config = config_manager.load()?;
        fs::create_dir_all(config_manager.base_dir())?;
        output::set_color_enabled(config.ui_color_enabled && mode == CliMode::Interactive);

        let storage = JsonFileStorage::new(config_manager.ledger_file(&config));
        let (mut manager, report) = LedgerManager::open_with_system_clock(Box::new(storage))?;
        manager.set_approaching_percent(config.approaching_threshold_percent);
        Ok((Self::with_manager(manager, config, mode), report))
    }

    pub fn with_manager(manager: LedgerManager, config: Config, mode: CliMode) -> Self {
        Self {
            manager,
            config,
            registry: CommandRegistry::with_entries(commands::all()),
            mode,
            running: true,
        }
    }

    pub fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn manager(&self) -> &LedgerManager {
        &self.manager
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        format!("fintrack [{}]> ", self.money(self.manager.available_funds()))
    }

    pub fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.handler(command) else {
            self.suggest_command(command);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.registry.suggest(input, 3) {
            output::hint(format!("Did you mean `{}`?", best));
        }
    }

    /// Reports a failed command. Persistence failures end the shell.
    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(&message);
                output::hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Ledger(err) if err.is_rejection() => {
                output::error(format!("Rejected: {err}"));
                Ok(())
            }
            CommandError::Ledger(err) => {
                output::error(format!("Changes were NOT saved: {err}"));
                Err(CliError::Ledger(err))
            }
        }
    }

    pub(crate) fn money(&self, amount: Amount) -> String {
        amount.format_with(&self.config.currency_symbol)
    }

    pub(crate) fn transaction_row(&self, txn: &Transaction) -> Vec<String> {
        vec![
            txn.date.to_string(),
            self.money(txn.amount),
            display_category(&txn.category),
            display_category(txn.kind.as_str()),
        ]
    }
}
