//! Engine configuration, loadable from TOML.

use std::path::Path;

use crate::error::ConfigError;

/// Deepest search the engine accepts.
pub const MAX_SEARCH_DEPTH: i8 = 10;

/// Tunables of the decision policy.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Plies searched below each root candidate (the candidate itself is
    /// one more ply).
    pub search_depth: i8,
    /// Root candidates evaluated concurrently; the rest run on the caller.
    pub parallel_batch: usize,
    /// Worker threads in the search pool.
    pub threads: usize,
    /// Transposition table size in megabytes.
    pub tt_size_mb: usize,
    /// Optional per-decision time budget. `None` searches to full depth.
    pub time_limit_ms: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            search_depth: 3,
            parallel_batch: 8,
            threads: 4,
            tt_size_mb: 16,
            time_limit_ms: None,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: EngineConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0..=MAX_SEARCH_DEPTH).contains(&self.search_depth) {
            return Err(ConfigError::Validation(format!(
                "search_depth must be in [0, {MAX_SEARCH_DEPTH}]"
            )));
        }
        if self.threads == 0 {
            return Err(ConfigError::Validation("threads must be >= 1".into()));
        }
        if self.tt_size_mb == 0 {
            return Err(ConfigError::Validation("tt_size_mb must be >= 1".into()));
        }
        if self.time_limit_ms == Some(0) {
            return Err(ConfigError::Validation(
                "time_limit_ms must be > 0 when set".into(),
            ));
        }
        Ok(())
    }

    /// TOML text holding every default value.
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&EngineConfig::default())
    }
}
