//! `modplan settings`: print the effective settings as TOML

use crate::{error::Result, settings::Settings};

pub fn execute(settings: &Settings) -> Result<String> {
    settings.to_toml()
}
