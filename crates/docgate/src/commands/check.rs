//! `docgate check` command implementation.

use std::path::PathBuf;

use clap::Args;
use docgate_config::{CliSettings, Config};
use docgate_nav::NavTree;
use docgate_resolve::{LinkPolicy, ReportEntry, resolve};
use docgate_scan::InventoryScanner;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover docgate.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Policy for broken document references: ignore, warn or throw
    /// (overrides config).
    #[arg(long, value_parser = parse_policy)]
    on_broken_links: Option<LinkPolicy>,

    /// Policy for unresolved anchors: ignore, warn or throw
    /// (overrides config).
    #[arg(long, value_parser = parse_policy)]
    on_broken_anchors: Option<LinkPolicy>,

    /// Emit the full report as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, scanning, or navigation building
    /// fails, or if broken references are found under the `throw` policy.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            on_broken_links: self.on_broken_links,
            on_broken_anchors: self.on_broken_anchors,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let tree = NavTree::build(config.sidebar_spec())?;
        let inventory = InventoryScanner::new(config.docs_resolved.source_dir.clone()).scan()?;

        output.info(&format!(
            "Checking '{}' against {}",
            config.site.title,
            config.docs_resolved.source_dir.display()
        ));

        let report = resolve(&tree, &inventory, &config.declared_links());

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        let fatal_links =
            report_failures(&output, config.links.on_broken_links, report.broken());
        let fatal_anchors =
            report_failures(&output, config.links.on_broken_anchors, report.warned());

        let summary = format!(
            "Checked {} references: {} resolved, {} warned, {} broken",
            report.entries().len(),
            report.resolved_count(),
            report.warned_count(),
            report.broken_count()
        );
        if report.has_broken() {
            output.warning(&summary);
        } else {
            output.success(&summary);
        }

        let fatal = fatal_links + fatal_anchors;
        if fatal > 0 {
            return Err(CliError::BrokenReferences(fatal));
        }
        Ok(())
    }
}

/// Print unresolved entries according to policy.
///
/// Returns the number of fatal entries (non-zero only under `throw`).
fn report_failures<'a>(
    output: &Output,
    policy: LinkPolicy,
    entries: impl Iterator<Item = &'a ReportEntry>,
) -> usize {
    match policy {
        LinkPolicy::Ignore => 0,
        LinkPolicy::Warn => {
            for entry in entries {
                output.warning(&format_entry(entry));
            }
            0
        }
        LinkPolicy::Throw => {
            let mut count = 0;
            for entry in entries {
                output.error(&format_entry(entry));
                count += 1;
            }
            count
        }
    }
}

fn format_entry(entry: &ReportEntry) -> String {
    match &entry.detail {
        Some(detail) => format!("  {}: {detail}", entry.origin),
        None => format!("  {}: {}", entry.origin, entry.reference.target),
    }
}

/// Parse a link policy from a CLI argument.
fn parse_policy(value: &str) -> Result<LinkPolicy, String> {
    match value {
        "ignore" => Ok(LinkPolicy::Ignore),
        "warn" => Ok(LinkPolicy::Warn),
        "throw" => Ok(LinkPolicy::Throw),
        other => Err(format!(
            "invalid policy '{other}' (expected ignore, warn or throw)"
        )),
    }
}
