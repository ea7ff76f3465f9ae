//! Configuration
//!
//! One small TOML table, `typesync.toml`, looked up in the working
//! directory. CLI flags take priority over file values; a missing file
//! falls back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{TypesyncError, TypesyncResult};
use crate::pipeline;

pub const CONFIG_FILE: &str = "typesync.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Persisted typings module kept in sync
    #[serde(default = "default_types")]
    pub types: PathBuf,

    /// Service sources: files, or directories walked recursively
    #[serde(default = "default_services")]
    pub services: Vec<PathBuf>,

    /// Freshly generated typings. When absent, the conventional increment
    /// location under the first service path is used.
    #[serde(default)]
    pub fresh: Option<PathBuf>,
}

fn default_types() -> PathBuf {
    PathBuf::from("src/typings.d.ts")
}

fn default_services() -> Vec<PathBuf> {
    vec![PathBuf::from("src/services")]
}

impl Default for Config {
    fn default() -> Self {
        Config {
            types: default_types(),
            services: default_services(),
            fresh: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> TypesyncResult<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| TypesyncError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load `typesync.toml` from `dir` if present, defaults otherwise.
    pub fn load_or_default(dir: &Path) -> TypesyncResult<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Fresh typings path: explicit, or derived from the first service root.
    pub fn fresh_path(&self) -> PathBuf {
        match &self.fresh {
            Some(path) => path.clone(),
            None => {
                let root = self
                    .services
                    .first()
                    .map(PathBuf::as_path)
                    .unwrap_or_else(|| Path::new("."));
                pipeline::default_fresh_path(root)
            }
        }
    }
}
