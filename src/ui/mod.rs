mod app;
mod style;

use crate::config::Config;
use anyhow::Result;

pub fn run(config: Config) -> Result<()> {
    app::run(config)
}
