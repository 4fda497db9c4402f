//! CLI error types.

use docgate_config::ConfigError;
use docgate_nav::SchemaError;
use docgate_scan::ScanError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Schema(#[from] SchemaError),

    #[error("{0}")]
    Scan(#[from] ScanError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Report(#[from] serde_json::Error),

    #[error("{0} broken reference(s) found")]
    BrokenReferences(usize),
}
