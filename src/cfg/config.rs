use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cfg::error::{ConfigResult, config_load_error, serde_yaml_error};
use crate::cli::table::PROGRAM;

fn default_program() -> String {
    PROGRAM.to_string()
}

fn default_true() -> bool {
    true
}

/// Registration flags and lister behaviour
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConfigSpec {
    #[serde(default = "default_program")]
    pub program: String,

    /// Do not append a space after a completed word
    #[serde(default = "default_true")]
    pub no_trailing_space: bool,

    /// Let the shell quote results and mark directories as it does for file names
    #[serde(default = "default_true")]
    pub treat_as_filenames: bool,

    /// Descend one level into a single matching directory
    #[serde(default = "default_true")]
    pub follow_dirs: bool,
}

impl Default for ConfigSpec {
    fn default() -> Self {
        Self {
            program: default_program(),
            no_trailing_space: true,
            treat_as_filenames: true,
            follow_dirs: true,
        }
    }
}

impl ConfigSpec {
    /// Per-user config location, `<config_dir>/grond-complete/config.yml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("grond-complete").join("config.yml"))
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| config_load_error(path, e))?;
        // an empty file deserializes to unit, not a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|e| serde_yaml_error(path, e))
    }

    /// Load an explicit path, else the per-user file if it exists, else defaults
    pub fn discover(explicit: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                debug!("loading config from {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}
