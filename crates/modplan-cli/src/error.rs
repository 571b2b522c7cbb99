//! CLI error types

use modplan_core::PlanError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("Output error: {0}")]
    Output(String),
}

impl CliError {
    /// Message with a hint on what to check
    pub fn user_message(&self) -> String {
        match self {
            CliError::InvalidArgument { message } => {
                format!("Invalid argument: {}\n\nRun 'modplan --help' for usage information.", message)
            }
            CliError::Settings(e) => {
                format!("Settings error: {}\n\nCheck your settings file and MODPLAN_* variables.", e)
            }
            CliError::Plan(PlanError::UnregisteredModule(name)) => {
                format!(
                    "Module '{}' is not registered.\n\nAdd it to the settings file or pass --module {}.",
                    name, name
                )
            }
            CliError::Plan(e) => e.to_string(),
            CliError::Output(msg) => format!("Failed to write output: {}", msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
