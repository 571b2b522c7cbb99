//! `modplan render`: render a config to markup

use modplan_core::Engine;
use tracing::info;

use crate::error::Result;

pub fn execute(engine: &Engine, config: &str) -> Result<String> {
    let html = engine.html_from_config_file(config)?;
    info!(config, bytes = html.len(), "Rendered config");
    Ok(html)
}
