mod config;
pub mod database;

pub use config::{Config, ReportConfig};
pub use database::{Database, StoredTask, TaskEvent};

use std::path::PathBuf;

/// Returns `~/.config/wellplan[-dev]/` based on WELLPLAN_ENV.
///
/// Set WELLPLAN_ENV=dev to use the development data directory, or
/// WELLPLAN_HOME to point at an explicit directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("WELLPLAN_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("WELLPLAN_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("wellplan-dev")
            } else {
                base_dir.join("wellplan")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
