use std::{io, path::PathBuf};

use dialoguer::{theme::ColorfulTheme, Confirm};
use rustyline::error::ReadlineError;
use thiserror::Error;

use crate::{
    cli::{commands, output},
    config::{Config, ConfigManager},
    errors::{ConfigError, ValidationError},
    ledger::Ledger,
    storage::{FileStore, KeyValueStore, MemoryStore, TransactionStore},
    utils::app_home_dir,
};

/// Fatal shell failures; the process exits with an error.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
}

/// Failures of a single command; reported and the loop continues.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
}

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

/// Everything a command handler can touch.
pub struct ShellContext {
    pub mode: CliMode,
    pub running: bool,
    pub ledger: Ledger,
    pub config: Config,
    pub config_manager: ConfigManager,
    pub home: PathBuf,
    pub(crate) theme: ColorfulTheme,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let home = app_home_dir();
        let config_manager = ConfigManager::with_base_dir(&home);
        let config = config_manager.load().unwrap_or_else(|err| {
            output::warning(format!("ignoring unreadable configuration: {err}"));
            Config::default()
        });

        let data_dir = config.resolve_data_dir(&home);
        let ledger = match FileStore::new(data_dir.clone()) {
            Ok(store) => open_ledger(store, &config),
            Err(err) => {
                output::warning(format!(
                    "cannot open {}: {err}; changes will only last for this session",
                    data_dir.display()
                ));
                open_ledger(MemoryStore::new(), &config)
            }
        };

        Ok(Self::from_parts(mode, ledger, config, config_manager, home))
    }

    pub fn from_parts(
        mode: CliMode,
        ledger: Ledger,
        config: Config,
        config_manager: ConfigManager,
        home: PathBuf,
    ) -> Self {
        output::set_color_enabled(config.ui_color_enabled && mode == CliMode::Interactive);
        Self {
            mode,
            running: true,
            ledger,
            config,
            config_manager,
            home,
            theme: ColorfulTheme::default(),
        }
    }

    pub fn prompt(&self) -> String {
        format!("ledger [{}]> ", self.ledger.len())
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        commands::COMMANDS.iter().map(|spec| spec.name).collect()
    }

    pub fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        commands::dispatch(self, command, raw, args)
    }

    pub fn report_error(&self, err: CommandError) {
        output::error(err);
    }

    pub fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(CommandError::from)
    }

    pub fn confirm_exit(&self) -> Result<bool, CliError> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt("Exit the ledger shell?")
            .default(true)
            .interact()?)
    }
}

fn open_ledger<S: KeyValueStore + 'static>(store: S, config: &Config) -> Ledger {
    let storage = TransactionStore::with_key(store, config.storage_key.clone());
    Ledger::load(Box::new(storage)).with_locale(config.decimal_separator)
}
