//! Explorations run by the `tabpipe` binary, one module per data set.

// dependencies
use std::path::Path;
use tabpipe::{config_key_constants, Config, Pipeline, Result, Table};

// modules
pub mod weather;
pub mod salaries;
pub mod lego;
pub mod trends;

// environment variables naming input files and the output directory
config_key_constants!(
    WEATHER_CSV
    SALARIES_CSV
    COLORS_CSV
    SETS_CSV
    THEMES_CSV
    PRICES_CSV
    OUTPUT_DIR
);

/// Collect every input and output path that is set in the environment.
pub fn config() -> Config {
    let mut cfg = Config::new();
    for key in [WEATHER_CSV, SALARIES_CSV, COLORS_CSV, SETS_CSV, THEMES_CSV, PRICES_CSV, OUTPUT_DIR] {
        cfg.set_string_env_opt(key);
    }
    cfg
}

/// Run every exploration in turn; each skips itself if its inputs are unset.
pub fn run_all(p: &mut Pipeline) -> Result<()> {
    weather::run(p)?;
    salaries::run(p)?;
    lego::run(p)?;
    trends::run(p)
}

/// Write a derived Table into OUTPUT_DIR, if set.
pub fn export(p: &mut Pipeline, df: &Table, file_name: &str) -> Result<()> {
    if !p.cfg.has_string(OUTPUT_DIR) {
        return Ok(());
    }
    let filepath = Path::new(p.cfg.get_string(OUTPUT_DIR)?)
        .join(file_name)
        .to_string_lossy()
        .to_string();
    p.export(df, &filepath)
}
