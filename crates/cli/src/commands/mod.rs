//! Subcommand implementations and the helpers they share.

pub mod actions;
pub mod config_cmd;
pub mod select;
pub mod table;
pub mod text;

use std::path::Path;
use tracing::debug;
use ucatable_config::AppConfig;
use ucatable_core::{Diagnostic, Mode, ModelDocument};
use ucatable_table::TableOptions;

/// Load the configuration and the model file.
pub fn load(model: &Path) -> Result<(AppConfig, ModelDocument), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    debug!(
        mode = %config.default_mode,
        max_rows = config.max_rows,
        tense = %config.text.tense,
        "Configuration loaded"
    );
    let doc = ModelDocument::load(model)?;
    Ok((config, doc))
}

/// Engine limits from the configuration.
pub fn table_options(config: &AppConfig) -> TableOptions {
    TableOptions {
        max_rows: config.max_rows,
    }
}

/// The mode given on the command line, else the configured default.
pub fn resolve_mode(arg: Option<&str>, config: &AppConfig) -> (Mode, Option<Diagnostic>) {
    match arg {
        Some(mode) => Mode::parse_lenient(mode),
        None => config.mode(),
    }
}

/// Print diagnostics to stderr, one per line.
pub fn print_diagnostics<'a>(diagnostics: impl IntoIterator<Item = &'a Diagnostic>) {
    for d in diagnostics {
        eprintln!("  ⚠️  {d}");
    }
}
