//! Modplan CLI
//!
//! Builds and renders module configs from the command line.
//!
//! ```text
//! modplan [--settings FILE] [--module NAME[=PATH]]... [-v|-q] <COMMAND>
//!
//! plan <CONFIG> [--format json|yaml]   print the construction plan
//! render <CONFIG>                      print the rendered markup
//! modules [--format table|json]        list registered modules
//! settings                             print the effective settings
//! ```

pub mod commands;
pub mod error;
pub mod formatter;
pub mod logging;
pub mod settings;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use modplan_core::Engine;
use tracing::debug;

pub use error::{CliError, Result};
pub use formatter::{ListFormat, PlanFormat};
pub use settings::{ModuleEntry, Settings};

#[derive(Parser, Debug)]
#[command(name = "modplan")]
#[command(about = "Build and render configuration-driven module trees")]
#[command(version)]
pub struct Cli {
    /// Settings file (defaults to <config dir>/modplan/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Register a module, optionally at an explicit path (repeatable)
    #[arg(long = "module", global = true, value_name = "NAME[=PATH]")]
    pub modules: Vec<ModuleEntry>,

    /// Override the modules directory
    #[arg(long, global = true, value_name = "DIR")]
    pub modules_dir: Option<PathBuf>,

    /// Override the config directory
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// More log output (repeatable)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the construction plan of a config
    Plan {
        /// Config name, resolved in the config directory
        config: String,

        #[arg(short, long, value_enum, default_value_t = PlanFormat::Json)]
        format: PlanFormat,
    },

    /// Render a config to markup
    Render {
        /// Config name, resolved in the config directory
        config: String,
    },

    /// List registered modules
    Modules {
        #[arg(short, long, value_enum, default_value_t = ListFormat::Table)]
        format: ListFormat,
    },

    /// Print the effective settings
    Settings,
}

/// Settings after applying command-line overrides
pub fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings::load(cli.settings.as_deref())?;
    if let Some(dir) = &cli.modules_dir {
        settings.modules_dir = dir.clone();
    }
    if let Some(dir) = &cli.config_dir {
        settings.config_dir = dir.clone();
    }
    settings.modules.extend(cli.modules.iter().cloned());
    Ok(settings)
}

/// Engine with every configured module registered, in order
pub fn build_engine(settings: &Settings) -> Result<Engine> {
    let engine = Engine::new(settings.engine_options());
    for module in &settings.modules {
        engine.register_module(&module.name, module.path.as_deref())?;
    }
    debug!(modules = settings.modules.len(), "Engine ready");
    Ok(engine)
}

/// Run a parsed command line and return what it prints
pub fn run(cli: &Cli) -> Result<String> {
    let settings = resolve_settings(cli)?;
    let engine = build_engine(&settings)?;
    match &cli.command {
        Commands::Plan { config, format } => commands::plan::execute(&engine, config, *format),
        Commands::Render { config } => commands::render::execute(&engine, config),
        Commands::Modules { format } => commands::modules::execute(&engine, *format),
        Commands::Settings => commands::settings::execute(&settings),
    }
}
