//! Where the shell keeps its data.

use std::path::{Path, PathBuf};

pub const HOME_ENV: &str = "POCKET_LEDGER_HOME";
const APP_DIR: &str = "pocket_ledger";
const FALLBACK_DIR: &str = ".pocket_ledger";

/// `$POCKET_LEDGER_HOME`, else the platform data directory, else a hidden
/// directory under the working directory.
pub fn app_data_dir() -> PathBuf {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|value| !value.is_empty()) {
        return PathBuf::from(home);
    }
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DIR))
}

pub fn store_dir(home: &Path) -> PathBuf {
    home.join("store")
}

pub fn config_file(home: &Path) -> PathBuf {
    home.join("config.json")
}
