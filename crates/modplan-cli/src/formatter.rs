//! Output formatting for modplan commands

use clap::ValueEnum;
use modplan_core::ResolvedNode;
use serde::Serialize;

use crate::error::{CliError, Result};

/// Output format for construction plans
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PlanFormat {
    #[default]
    Json,
    Yaml,
}

/// Output format for listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    #[default]
    Table,
    Json,
}

#[derive(Serialize)]
struct ModuleRow<'a> {
    name: &'a str,
    path: &'a str,
}

/// Format a construction plan
pub fn format_plan(plan: &ResolvedNode, format: PlanFormat) -> Result<String> {
    match format {
        PlanFormat::Json => serde_json::to_string_pretty(plan)
            .map(|json| json + "\n")
            .map_err(|e| CliError::Output(format!("Failed to serialize plan: {}", e))),
        PlanFormat::Yaml => serde_yaml::to_string(plan)
            .map_err(|e| CliError::Output(format!("Failed to serialize plan: {}", e))),
    }
}

/// Format registered modules as a table
pub fn format_modules_table(modules: &[(String, String)]) -> String {
    if modules.is_empty() {
        return "No modules registered\n".to_string();
    }

    let width = modules
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0)
        .max("Name".len());

    let mut output = String::new();
    output.push_str(&format!("{:<width$} | Path\n", "Name"));
    output.push_str(&format!("{}-|-{}\n", "-".repeat(width), "-".repeat(24)));
    for (name, path) in modules {
        output.push_str(&format!("{:<width$} | {}\n", name, path));
    }

    output
}

/// Format registered modules as JSON
pub fn format_modules_json(modules: &[(String, String)]) -> Result<String> {
    let rows: Vec<ModuleRow<'_>> = modules
        .iter()
        .map(|(name, path)| ModuleRow { name, path })
        .collect();
    serde_json::to_string_pretty(&rows)
        .map(|json| json + "\n")
        .map_err(|e| CliError::Output(format!("Failed to serialize modules: {}", e)))
}

pub fn format_modules(modules: &[(String, String)], format: ListFormat) -> Result<String> {
    match format {
        ListFormat::Table => Ok(format_modules_table(modules)),
        ListFormat::Json => format_modules_json(modules),
    }
}
