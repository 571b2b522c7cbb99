//! `modplan plan`: print the construction plan of a config

use modplan_core::Engine;
use tracing::info;

use crate::{
    error::Result,
    formatter::{format_plan, PlanFormat},
};

pub fn execute(engine: &Engine, config: &str, format: PlanFormat) -> Result<String> {
    let plan = engine.plan_from_config_file(config)?;
    info!(config, nodes = plan.node_count(), "Built construction plan");
    format_plan(&plan, format)
}
