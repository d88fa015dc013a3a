//! Error types for the Herald game process

use thiserror::Error;

/// Main error type for the Herald game protocol
#[derive(Debug, Error)]
pub enum GameProtocolError {
    #[error("I/O error on {channel}: {source}")]
    Io {
        #[source]
        source: std::io::Error,
        channel: &'static str,
    },

    /// The input stream ended. The command loop treats this as a normal stop.
    #[error("End of input")]
    EndOfInput,

    #[error("Malformed token '{token}': expected {expected}")]
    MalformedToken {
        expected: &'static str,
        token: String,
    },

    #[error("Invalid layout: {message}")]
    InvalidLayout { message: String },

    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        field: String,
    },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl GameProtocolError {
    /// Wrap an I/O error with the name of the stream it came from
    pub fn io(channel: &'static str, source: std::io::Error) -> Self {
        GameProtocolError::Io { source, channel }
    }

    pub fn malformed(expected: &'static str, token: impl Into<String>) -> Self {
        GameProtocolError::MalformedToken {
            expected,
            token: token.into(),
        }
    }

    pub fn invalid_layout(message: impl Into<String>) -> Self {
        GameProtocolError::InvalidLayout {
            message: message.into(),
        }
    }

    /// Whether the error came from bad command arguments rather than the streams
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, GameProtocolError::MalformedToken { .. })
    }
}

impl From<toml::ser::Error> for GameProtocolError {
    fn from(err: toml::ser::Error) -> Self {
        GameProtocolError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Type alias for the main result type used throughout the library
pub type GameResult<T> = Result<T, GameProtocolError>;

/// Logging configuration and initialization
///
/// Standard output carries protocol responses, so log records only ever go to
/// standard error or a file.
pub mod logging {
    use std::env;
    use std::fs::OpenOptions;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tracing::Level;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    /// Logging output format
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum LogFormat {
        Human,
        Json,
    }

    /// Logging output destination
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum LogOutput {
        Stderr,
        File(PathBuf),
    }

    /// Logging configuration
    #[derive(Debug, Clone)]
    pub struct LoggingConfig {
        pub level: Level,
        pub format: LogFormat,
        pub output: LogOutput,
    }

    impl Default for LoggingConfig {
        fn default() -> Self {
            Self {
                // Diagnostics share stderr, keep it quiet unless asked
                level: Level::WARN,
                format: LogFormat::Human,
                output: LogOutput::Stderr,
            }
        }
    }

    /// Initialize structured logging with the given configuration
    pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let env_filter = EnvFilter::builder()
            .with_default_directive(config.level.into())
            .from_env_lossy();

        let registry = tracing_subscriber::registry().with(env_filter);

        match config.format {
            LogFormat::Human => {
                let fmt_layer = fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .with_file(true)
                    .with_line_number(true);

                match config.output {
                    LogOutput::Stderr => registry.with(fmt_layer.with_writer(std::io::stderr)).try_init()?,
                    LogOutput::File(path) => {
                        let file = OpenOptions::new().create(true).append(true).open(path)?;
                        registry.with(fmt_layer.with_writer(Mutex::new(file))).try_init()?
                    }
                }
            }
            LogFormat::Json => {
                let fmt_layer = fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_span_events(fmt::format::FmtSpan::CLOSE);

                match config.output {
                    LogOutput::Stderr => registry.with(fmt_layer.with_writer(std::io::stderr)).try_init()?,
                    LogOutput::File(path) => {
                        let file = OpenOptions::new().create(true).append(true).open(path)?;
                        registry.with(fmt_layer.with_writer(Mutex::new(file))).try_init()?
                    }
                }
            }
        }

        Ok(())
    }

    /// Build a logging configuration from `HERALD_LOG_*` environment variables
    pub fn config_from_env() -> LoggingConfig {
        let level = env::var("HERALD_LOG_LEVEL")
            .ok()
            .and_then(|s| s.parse::<Level>().ok())
            .unwrap_or(Level::WARN);

        let format = match env::var("HERALD_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Human,
        };

        let output = match env::var("HERALD_LOG_FILE") {
            Ok(path) if !path.is_empty() => LogOutput::File(PathBuf::from(path)),
            _ => LogOutput::Stderr,
        };

        LoggingConfig { level, format, output }
    }

    /// Initialize logging with environment-based configuration
    pub fn init_from_env() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        init_logging(config_from_env())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_default_logging_avoids_stdout() {
            let config = LoggingConfig::default();
            assert_eq!(config.output, LogOutput::Stderr);
            assert_eq!(config.format, LogFormat::Human);
            assert_eq!(config.level, Level::WARN);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_token_message() {
        let err = GameProtocolError::malformed("integer", "abc");
        assert_eq!(err.to_string(), "Malformed token 'abc': expected integer");
        assert!(err.is_malformed_input());
    }

    #[test]
    fn test_end_of_input_is_not_malformed() {
        assert!(!GameProtocolError::EndOfInput.is_malformed_input());
    }

    #[test]
    fn test_io_error_names_channel() {
        let err = GameProtocolError::io(
            "response",
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed"),
        );
        assert!(err.to_string().contains("response"));
    }
}
