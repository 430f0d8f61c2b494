//! logging stuff
use {
    crate::{
        config::{LoggingConfig, LoggingFormat},
        error::Result,
    },
    tracing::{Level, debug, subscriber},
    tracing_subscriber::FmtSubscriber,
};

/// turn a level name into a [`tracing::Level`], `None` for `off`
pub fn string_to_log_level(lvl: &str) -> Option<Level> {
    match lvl.to_lowercase().as_str() {
        "t" | "trace" | "trc" => Some(Level::TRACE),
        "d" | "debug" | "dbg" => Some(Level::DEBUG),
        "i" | "info" | "inf" => Some(Level::INFO),
        "w" | "warn" | "wrn" => Some(Level::WARN),
        "off" => None,
        _ => Some(Level::ERROR),
    }
}

/// setup logging
///
/// logs go to stderr so a stylesheet written to stdout stays clean
pub fn setup(cfg: &LoggingConfig) -> Result<()> {
    let defaults = LoggingConfig::default();

    if !cfg.enable.or(defaults.enable).unwrap_or(true) {
        return Ok(());
    }

    let Some(max_level) = cfg
        .level
        .as_deref()
        .or(defaults.level.as_deref())
        .and_then(string_to_log_level)
    else {
        return Ok(());
    };

    let subscriber = FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_max_level(max_level)
        .with_ansi(cfg.ansi.unwrap_or(true))
        .with_line_number(cfg.line_numbers.unwrap_or(false))
        .with_target(cfg.event_targets.unwrap_or(false));

    let installed = match cfg.format.unwrap_or_default() {
        LoggingFormat::Pretty => subscriber::set_global_default(subscriber.pretty().finish()),
        LoggingFormat::Compact => subscriber::set_global_default(subscriber.compact().finish()),
    };
    installed.map_err(|e| format!("failed to install the log subscriber: {}", e))?;

    debug!("Logging setup successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_to_log_level() {
        assert_eq!(string_to_log_level("DEBUG"), Some(Level::DEBUG));
        assert_eq!(string_to_log_level("wrn"), Some(Level::WARN));
        assert_eq!(string_to_log_level("off"), None);
        assert_eq!(string_to_log_level("nonsense"), Some(Level::ERROR));
    }

    #[test]
    fn test_disabled_logging_installs_nothing() {
        let cfg = LoggingConfig {
            enable: Some(false),
            ..Default::default()
        };
        assert!(setup(&cfg).is_ok());
    }
}
