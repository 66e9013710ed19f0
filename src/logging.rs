//! logging stuff
use {
    crate::{
        config::options::{LoggingConfig, LoggingFormat},
        error::Result,
        utils::string_to_log_level,
    },
    tracing::{info, subscriber},
    tracing_subscriber::FmtSubscriber,
};

/// install a global tracing subscriber built from the logging settings
///
/// does nothing when logging is disabled
pub fn setup(cfg: &LoggingConfig) -> Result<()> {
    let defaults = LoggingConfig::default();

    if !cfg.enable.or(defaults.enable).unwrap_or(true) {
        return Ok(());
    }

    let level = cfg.level.as_deref().or(defaults.level.as_deref()).unwrap_or("info");
    let subscriber = FmtSubscriber::builder()
        .with_max_level(string_to_log_level(level))
        .with_ansi(cfg.ansi.or(defaults.ansi).unwrap_or(true))
        .with_line_number(cfg.line_numbers.or(defaults.line_numbers).unwrap_or(false))
        .with_target(cfg.event_targets.or(defaults.event_targets).unwrap_or(false));

    match cfg.format.or(defaults.format).unwrap_or_default() {
        LoggingFormat::Pretty => {
            subscriber::set_global_default(subscriber.pretty().finish())?;
        }
        LoggingFormat::Compact => {
            subscriber::set_global_default(subscriber.compact().finish())?;
        }
    }

    info!("logging setup successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_logging_is_a_noop() {
        let cfg = LoggingConfig {
            enable: Some(false),
            ..Default::default()
        };

        assert!(setup(&cfg).is_ok());
        assert!(setup(&cfg).is_ok());
    }

    #[test]
    fn test_second_install_fails() {
        let cfg = LoggingConfig {
            format: Some(LoggingFormat::Compact),
            ansi: Some(false),
            ..Default::default()
        };

        // only one global subscriber can ever be installed per process
        let first = setup(&cfg);
        let second = setup(&cfg);

        assert!(first.is_err() || second.is_err());
        assert!(matches!(
            second,
            Err(crate::error::PanicError::Logging(_))
        ));
    }
}
