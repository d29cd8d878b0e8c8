use std::path::PathBuf;

/// Errors from parsing a board in text form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardParseError {
    #[error("row {row}: unexpected character '{ch}' (expected '.', 'X' or 'O')")]
    InvalidChar { row: usize, ch: char },

    #[error("row {row}: expected {expected} cells, found {len}", expected = crate::board::BOARD_SIZE)]
    RowLength { row: usize, len: usize },

    #[error("expected {expected} rows, found {0}", expected = crate::board::BOARD_SIZE)]
    RowCount(usize),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors that can occur when building an engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid engine configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build search thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
