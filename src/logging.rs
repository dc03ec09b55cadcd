use log::LevelFilter;
use simple_logger::SimpleLogger;

use crate::config::LoggingConfig;
use crate::error::ConfigError;

/// Install the stderr logger at the configured level.
///
/// With the level at `off` nothing is installed, so the terminal UI owns the
/// screen. Run with `2> connect4.log` to keep a trace alongside the game.
pub fn init(config: &LoggingConfig) -> Result<(), ConfigError> {
    let level = config.level_filter()?;
    if level == LevelFilter::Off {
        return Ok(());
    }
    SimpleLogger::new().with_level(level).init()?;
    Ok(())
}
