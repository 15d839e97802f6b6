use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::error::Result;

/// Redirects SQL statement logging to a file.
///
/// When `path` is given, installs a global tracing subscriber writing to
/// that file, with the driver targets (`sea_orm`, `sqlx`) enabled at DEBUG
/// so every executed statement is recorded, and everything else at INFO.
/// When `path` is `None`, or a global subscriber is already installed by
/// the host application, logging is left at its ambient configuration.
pub fn init_sql_log(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let installed = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("info,sea_orm=debug,sqlx=debug"))
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init()
        .is_ok();
    if !installed {
        tracing::debug!(
            path = %path.display(),
            "global subscriber already set, SQL log file not installed"
        );
    }
    Ok(())
}
