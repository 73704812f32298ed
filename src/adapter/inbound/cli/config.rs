//! Handler for the `config` command group and shared config loading.

use std::path::Path;

use serde_json::json;
use tracing::debug;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Load the config file if one was given, defaults otherwise.
pub fn load(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

/// Start logging, letting `-v` and `-q` override the configured level.
pub fn init_logging(config: &Config) {
    let mut logging = config.logging.clone();
    if output::is_quiet() {
        logging.level = "error".into();
    }
    match output::verbosity() {
        0 => {}
        1 => logging.level = "info".into(),
        2 => logging.level = "debug".into(),
        _ => logging.level = "trace".into(),
    }
    logging.init();
    debug!(level = %logging.level, format = %logging.format, "Logging initialized");
}

/// Execute `config show`.
pub fn execute_show(path: Option<&Path>) -> Result<()> {
    let config = load(path)?;

    if output::is_json() {
        output::json_output("config", json!(config));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field(
        "Source",
        path.map_or_else(|| "(defaults)".to_string(), |p| p.display().to_string()),
    );

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    output::section("Model");
    output::field("Big-M", config.model.big_m);
    output::field("Kind", config.model.kind);
    output::field("Integrality", config.model.integrality);

    if output::verbosity() > 0 {
        output::section("TOML");
        output::lines(&config.to_toml()?);
    }
    Ok(())
}
