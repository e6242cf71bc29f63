use eyre::{Report, Result, eyre};
use std::path::Path;

pub type ConfigResult<T> = Result<T, Report>;

// Helper functions for creating specific config errors
pub fn config_load_error(path: &Path, source: std::io::Error) -> Report {
    eyre!("config load error; path={}: {}", path.display(), source)
}

pub fn serde_yaml_error(path: &Path, source: serde_yaml::Error) -> Report {
    eyre!("serde yaml error; path={}: {}", path.display(), source)
}
