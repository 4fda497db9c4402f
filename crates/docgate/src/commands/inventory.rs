//! `docgate inventory` command implementation.

use std::path::PathBuf;

use clap::Args;
use docgate_config::{CliSettings, Config};
use docgate_scan::InventoryScanner;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the inventory command.
#[derive(Args)]
pub(crate) struct InventoryArgs {
    /// Path to configuration file (default: auto-discover docgate.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl InventoryArgs {
    /// Execute the inventory command.
    ///
    /// Lists every discovered document id on stdout in sorted order. The
    /// root document (the source directory's `index.md`) is shown as `/`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or scanning fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let inventory = InventoryScanner::new(config.docs_resolved.source_dir.clone()).scan()?;

        for id in inventory.sorted_ids() {
            if id.is_empty() {
                println!("/");
            } else {
                println!("{id}");
            }
        }
        output.info(&format!("{} document(s)", inventory.len()));

        Ok(())
    }
}
