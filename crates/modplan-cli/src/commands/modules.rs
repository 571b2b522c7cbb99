//! `modplan modules`: list registered modules

use modplan_core::Engine;

use crate::{
    error::Result,
    formatter::{format_modules, ListFormat},
};

pub fn execute(engine: &Engine, format: ListFormat) -> Result<String> {
    let modules = engine.module_list()?;
    format_modules(&modules, format)
}
