//! error handling stuff
use {miette::Diagnostic, std::path::PathBuf, thiserror::Error};

/// a fatal configuration problem, the build is aborted and no stylesheet is produced
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigurationError {
    /// the content list is empty
    #[error("no content sources were configured")]
    #[diagnostic(
        code(breeze::config::empty_content),
        help("add at least one glob to `content`, e.g. \"**/*.html\"")
    )]
    EmptyContent,

    /// every content pattern resolved to zero files
    #[error("content patterns matched no files: {}", .patterns.join(", "))]
    #[diagnostic(
        code(breeze::config::no_files),
        help("check that the patterns are relative to the build root")
    )]
    NoContentFiles {
        /// the patterns that were tried
        patterns: Vec<String>,
        /// the directory the patterns were resolved against
        root: PathBuf,
    },

    /// a content glob could not be compiled
    #[error("invalid content glob `{pattern}`: {source}")]
    #[diagnostic(code(breeze::config::invalid_glob))]
    InvalidGlob {
        /// the offending pattern
        pattern: String,
        /// the underlying glob error
        #[source]
        source: globset::Error,
    },

    /// the theme structure could not be interpreted at all
    #[error("malformed theme: {0}")]
    #[diagnostic(code(breeze::config::malformed_theme))]
    MalformedTheme(String),

    /// a plugin failed shape validation at registration time
    #[error("invalid plugin `{plugin}`: {reason}")]
    #[diagnostic(code(breeze::config::invalid_plugin))]
    InvalidPlugin {
        /// the plugin name
        plugin: String,
        /// what was wrong with it
        reason: String,
    },

    /// a plugin name in the config file is not in the catalog
    #[error("unknown plugin `{0}`")]
    #[diagnostic(
        code(breeze::config::unknown_plugin),
        help("built-in plugins are: core, preflight, layout, spacing, sizing, typography, colors, borders, effects, variants")
    )]
    UnknownPlugin(String),

    /// one or more option values failed validation
    #[error("invalid options:\n{0}")]
    #[diagnostic(code(breeze::config::invalid_options))]
    InvalidOptions(String),
}

#[derive(Debug, Error)]
/// An error
pub enum BuildError {
    /// a fatal configuration error
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// the build was superseded before it finished
    #[error("build cancelled")]
    Cancelled,

    /// an IO error
    #[error("i/o error: {0}")]
    IO(#[from] std::io::Error),

    /// a blocking task failed to join
    #[error("task join error: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// a rayon thread pool could not be built
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// a json error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// a toml deserialization error
    #[error("toml deserialization error: {0}")]
    TOMLDe(#[from] toml::de::Error),

    /// a toml serialization error
    #[error("toml serialization error: {0}")]
    TOMLSer(#[from] toml::ser::Error),

    /// a config source error
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),

    /// a custom error
    #[error("error: {0}")]
    Other(String),
}

impl BuildError {
    /// whether the error belongs to the fatal configuration class
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl From<String> for BuildError {
    fn from(value: String) -> Self {
        Self::Other(value)
    }
}

/// A result using [`BuildError`] as the `Err` variant
pub type Result<T, U = BuildError> = miette::Result<T, U>;

/// bail
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::error::BuildError::from(String::from($msg)))
    };

    ($err:expr $(,)?) => {
        return Err($crate::error::BuildError::from($err))
    };

    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::BuildError::from(format!($fmt, $($arg)*)))
    };
}
