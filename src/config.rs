use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DATA_DIR_ENV: &str = "RUSTY_AVOCADO_DATA_DIR";
pub const JSON_FILE_ENV: &str = "RUSTY_AVOCADO_JSON";
pub const CSV_FILE_ENV: &str = "RUSTY_AVOCADO_CSV";

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_JSON_FILE: &str = "chemical.json";
pub const DEFAULT_CSV_FILE: &str = "Avocado registred Chemicals.csv";

/// Where the bundled dataset lives.
///
/// Layered as defaults → environment → command line; see [`Config::from_env`]
/// and [`Config::with_overrides`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: PathBuf,
    pub json_file: PathBuf,
    pub csv_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            json_file: PathBuf::from(DEFAULT_JSON_FILE),
            csv_file: PathBuf::from(DEFAULT_CSV_FILE),
        }
    }
}

impl Config {
    /// Defaults, overridden by any of the `RUSTY_AVOCADO_*` variables that are set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(v) = non_empty(DATA_DIR_ENV) {
            cfg.data_dir = PathBuf::from(v);
        }
        if let Some(v) = non_empty(JSON_FILE_ENV) {
            cfg.json_file = PathBuf::from(v);
        }
        if let Some(v) = non_empty(CSV_FILE_ENV) {
            cfg.csv_file = PathBuf::from(v);
        }
        cfg
    }

    /// Apply command-line values on top.
    pub fn with_overrides(
        mut self,
        data_dir: Option<PathBuf>,
        json_file: Option<PathBuf>,
        csv_file: Option<PathBuf>,
    ) -> Self {
        if let Some(d) = data_dir {
            self.data_dir = d;
        }
        if let Some(j) = json_file {
            self.json_file = j;
        }
        if let Some(c) = csv_file {
            self.csv_file = c;
        }
        self
    }

    pub fn json_path(&self) -> PathBuf {
        self.data_dir.join(&self.json_file)
    }

    pub fn csv_path(&self) -> PathBuf {
        self.data_dir.join(&self.csv_file)
    }
}
