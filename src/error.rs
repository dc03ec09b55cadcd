use std::path::PathBuf;

/// Errors the engine reports instead of a move result.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("no legal move: every column is full")]
    NoLegalMove,

    #[error("engine channel closed")]
    Disconnected,

    #[error("failed to start engine thread: {0}")]
    Spawn(#[from] std::io::Error),
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

    #[error("failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_display() {
        assert_eq!(
            EngineError::NoLegalMove.to_string(),
            "no legal move: every column is full"
        );
        assert_eq!(EngineError::Disconnected.to_string(), "engine channel closed");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("engine.max_depth must be <= 8".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: engine.max_depth must be <= 8"
        );
    }
}
