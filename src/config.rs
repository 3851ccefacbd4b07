//! Runtime configuration
//!
//! Defaults can be overridden through environment variables:
//!   ECON_INDEXER_DATA_PATH - directory holding `<collection>.csv` per indicator

use std::env;
use std::path::PathBuf;

/// Default directory of the indicator CSV files
pub const DEFAULT_DATA_PATH: &str = "data/indexers";

/// Environment variable overriding the data directory
pub const DATA_PATH_ENV: &str = "ECON_INDEXER_DATA_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexerConfig {
    /// Directory the rate series are loaded from
    pub data_path: PathBuf,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

impl IndexerConfig {
    /// Read config from environment or use defaults
    pub fn from_env() -> Self {
        Self::from_data_path(env::var(DATA_PATH_ENV).ok())
    }

    fn from_data_path(data_path: Option<String>) -> Self {
        let data_path = data_path
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
        Self { data_path }
    }

    /// Replace the data directory (e.g. from a CLI flag)
    pub fn with_data_path(mut self, data_path: impl Into<PathBuf>) -> Self {
        self.data_path = data_path.into();
        self
    }
}
