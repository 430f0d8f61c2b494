//! every available configuration option and its type is listed in this file
use {
    crate::{
        config::validate::{Validate, format_validation_errors},
        engine::BuildConfig,
        error::{ConfigurationError, Result},
        generate::Important,
        output::OutputStyle,
        plugin::{DarkMode, PluginCatalog},
        scan::ContentSource,
        theme::ThemeSpec,
    },
    config::{Config, Environment, File},
    schemars::JsonSchema,
    serde::{Deserialize, Serialize},
    smart_default::SmartDefault,
    std::path::{Path, PathBuf},
    tracing::{debug, info},
};

/// the config file name looked for in the working directory and its ancestors
pub const CONFIG_FILE_NAME: &str = "breeze.toml";

/// the prefix of environment variable overrides
pub const ENV_PREFIX: &str = "BREEZE";

/// The log output format
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema, SmartDefault)]
#[serde(rename_all = "lowercase")]
pub enum LoggingFormat {
    /// Use the compact output format
    #[default]
    Compact,

    /// Use an excessively pretty output format
    Pretty,
}

/// Settings for logging
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault)]
#[serde(default)]
#[schemars(default)]
pub struct LoggingConfig {
    /// Enable logging
    #[default(Some(true))]
    pub enable: Option<bool>,

    /// The max level to log at
    #[default(Some("warn".to_string()))]
    pub level: Option<String>,

    /// The log output format
    #[default(Some(LoggingFormat::Compact))]
    pub format: Option<LoggingFormat>,

    /// Enable ANSI escape codes for colors and stuff
    #[default(Some(true))]
    pub ansi: Option<bool>,

    /// Display event targets in log messages
    #[default(Some(false))]
    pub event_targets: Option<bool>,

    /// Display line numbers in log messages
    #[default(Some(false))]
    pub line_numbers: Option<bool>,
}

/// Settings for the generated stylesheet
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault)]
#[serde(default)]
#[schemars(default)]
pub struct OutputConfig {
    /// How the stylesheet is written (pretty, minified)
    #[default(Some(OutputStyle::Pretty))]
    pub style: Option<OutputStyle>,

    /// Where the stylesheet is written, stdout when unset
    #[default(None)]
    pub path: Option<String>,
}

/// Settings for reading content files
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault)]
#[serde(default)]
#[schemars(default)]
pub struct ScanConfig {
    /// Files larger than this many bytes are skipped with a warning
    #[default(Some(4 * 1024 * 1024))]
    pub max_file_size: Option<u64>,

    /// The amount of threads used to read files, picked from the cpu count when unset
    #[default(None)]
    pub threads: Option<usize>,
}

/// The breeze config file
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault)]
#[serde(default)]
#[schemars(default)]
pub struct BreezeConfig {
    /// Glob patterns of the files to look for class names in, `!` excludes
    #[default(Some(vec!["**/*.{html,templ}".to_string()]))]
    pub content: Option<Vec<String>>,

    /// Theme overrides, with additive changes under `extend`
    #[default(Some(ThemeSpec::default()))]
    pub theme: Option<ThemeSpec>,

    /// Plugins in registration order, `core` expands to every built-in but `preflight`
    #[default(Some(vec!["preflight".to_string(), "core".to_string()]))]
    pub plugins: Option<Vec<String>>,

    /// How the `dark` variant is expressed (media, class, or { selector = "..." })
    #[serde(alias = "darkMode")]
    #[default(Some(DarkMode::Media))]
    pub dark_mode: Option<DarkMode>,

    /// The character between variants and the utility
    #[default(Some(':'))]
    pub separator: Option<char>,

    /// A prefix every utility has to carry, e.g. `tw-`
    #[default(None)]
    pub prefix: Option<String>,

    /// Mark every declaration `!important`, or nest utilities under a selector
    #[default(Some(Important::Flag(false)))]
    pub important: Option<Important>,

    /// Settings for the generated stylesheet
    #[default(Some(OutputConfig::default()))]
    pub output: Option<OutputConfig>,

    /// Settings for reading content files
    #[default(Some(ScanConfig::default()))]
    pub scan: Option<ScanConfig>,

    /// Settings for logging
    #[default(Some(LoggingConfig::default()))]
    pub logging: Option<LoggingConfig>,
}

impl BreezeConfig {
    /// load config from the default locations
    ///
    /// load prio: env > explicit path or nearest breeze.toml > defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::find_local_config(&std::env::current_dir()?),
        };

        let mut builder = Config::builder();

        if let Some(ref path) = path {
            info!("Loading configuration from {}", path.display());
            builder = builder.add_source(File::from(path.as_path()).required(explicit.is_some()));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("content")
                .with_list_parse_key("plugins"),
        );

        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.run_validation()?;

        Ok(cfg)
    }

    /// parse a config from toml text, without looking at the environment
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(text)?;
        cfg.run_validation()?;
        Ok(cfg)
    }

    /// find the nearest config file, walking up from `start`
    pub fn find_local_config(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|ancestor| ancestor.join(CONFIG_FILE_NAME))
            .find(|path| path.is_file())
    }

    /// run validation and collect every problem into one error
    pub fn run_validation(&self) -> Result<()> {
        self.validate().map_err(|errors| {
            ConfigurationError::InvalidOptions(format_validation_errors(&errors)).into()
        })
    }

    /// turn the file model into the runtime build config
    ///
    /// content patterns resolve against `root`, plugin names through `catalog`
    pub fn into_build_config(
        self,
        root: impl Into<PathBuf>,
        catalog: &PluginCatalog,
    ) -> Result<BuildConfig> {
        self.run_validation()?;

        let plugins = catalog.resolve(&self.plugins.unwrap_or_default())?;
        let output = self.output.unwrap_or_default();
        let scan = self.scan.unwrap_or_default();

        let mut build = BuildConfig::new(root);
        build.content = self
            .content
            .unwrap_or_default()
            .iter()
            .map(ContentSource::glob)
            .collect();
        build.theme = self.theme.unwrap_or_default();
        build.plugins = plugins;
        build.dark_mode = self.dark_mode.unwrap_or_default();
        build.separator = self.separator.unwrap_or(':');
        build.prefix = self.prefix.filter(|p| !p.is_empty());
        build.important = self.important.unwrap_or_default();
        build.output = output.style.unwrap_or_default();
        build.max_file_size = scan.max_file_size;
        build.threads = scan.threads;

        debug!(
            "Build config: {} content sources, {} plugins, dark mode {}",
            build.content.len(),
            build.plugins.len(),
            build.dark_mode
        );

        Ok(build)
    }

    /// the logging settings
    pub fn logging(&self) -> LoggingConfig {
        self.logging.clone().unwrap_or_default()
    }

    /// the configured output path, if any
    pub fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.path.as_deref())
    }

    /// save config to a file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let toml_str = toml::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), toml_str)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::fs, tempfile::TempDir};

    #[test]
    fn test_defaults() {
        let cfg = BreezeConfig::default();

        assert_eq!(cfg.content.as_deref(), Some(&["**/*.{html,templ}".to_string()][..]));
        assert_eq!(cfg.separator, Some(':'));
        assert!(cfg.is_valid());
    }

    #[test]
    fn test_parse_original_shape() {
        let cfg = BreezeConfig::from_toml_str(
            r##"
            content = ["**/*.{html,templ}", "./node_modules/preline/dist/*.js"]
            darkMode = "class"
            plugins = ["core"]

            [theme.extend.colors]
            brand = "#123456"
            "##,
        )
        .unwrap();

        assert_eq!(cfg.dark_mode, Some(DarkMode::Class));
        assert_eq!(cfg.content.as_ref().map(Vec::len), Some(2));
        assert!(!cfg.theme.as_ref().unwrap().is_empty());

        let build = cfg.into_build_config(".", &PluginCatalog::new()).unwrap();
        assert_eq!(build.content[1].to_string(), "node_modules/preline/dist/*.js");
        assert!(build.plugins.iter().all(|p| p.name() != "preflight"));
    }

    #[test]
    fn test_selector_dark_mode_and_scope() {
        let cfg = BreezeConfig::from_toml_str(
            r##"
            dark_mode = { selector = "[data-theme=dark]" }
            important = "#app"
            prefix = "tw-"
            separator = "_"
            "##,
        )
        .unwrap();

        let build = cfg.into_build_config(".", &PluginCatalog::new()).unwrap();
        assert_eq!(build.dark_mode, DarkMode::Selector("[data-theme=dark]".to_string()));
        assert_eq!(build.important.scope(), Some("#app"));
        assert_eq!(build.prefix.as_deref(), Some("tw-"));
        assert_eq!(build.separator, '_');
    }

    #[test]
    fn test_invalid_values_are_collected() {
        let err = BreezeConfig::from_toml_str(
            r#"
            separator = "-"
            plugins = [""]

            [scan]
            threads = 0

            [logging]
            level = "loud"
            "#,
        )
        .unwrap_err();

        assert!(err.is_configuration());
        let message = err.to_string();
        assert!(message.contains("separator"));
        assert!(message.contains("plugins"));
        assert!(message.contains("scan.threads"));
        assert!(message.contains("logging.level"));
    }

    #[test]
    fn test_unknown_plugin_is_fatal() {
        let cfg = BreezeConfig::from_toml_str(r#"plugins = ["forms"]"#).unwrap();
        let err = cfg.into_build_config(".", &PluginCatalog::new()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::BuildError::Configuration(ConfigurationError::UnknownPlugin(_))
        ));
    }

    #[test]
    fn test_find_local_config() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "prefix = \"x-\"\n").unwrap();

        assert_eq!(
            BreezeConfig::find_local_config(&nested),
            Some(dir.path().join(CONFIG_FILE_NAME))
        );
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            "content = [\"src/**/*.html\"]\n\n[output]\nstyle = \"minified\"\n",
        )
        .unwrap();

        let cfg = BreezeConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.content, Some(vec!["src/**/*.html".to_string()]));
        assert_eq!(cfg.output.unwrap().style, Some(OutputStyle::Minified));
        assert_eq!(cfg.plugins.map(|p| p.len()), Some(2));
    }

    #[test]
    fn test_defaults_round_trip_through_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("defaults.toml");
        BreezeConfig::default().save_to_file(&path).unwrap();

        let cfg = BreezeConfig::from_toml_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(cfg.plugins, BreezeConfig::default().plugins);
    }
}
