//! runtime build configuration
use {
    crate::{
        generate::{GeneratorOptions, Important},
        output::OutputStyle,
        plugin::{DarkMode, Plugin, VariantOptions},
        scan::ContentSource,
        theme::ThemeSpec,
    },
    std::path::PathBuf,
};

/// everything one build needs
///
/// passed by value into the engine, there is no global configuration
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// the directory relative content patterns resolve against
    pub root: PathBuf,
    /// where to look for class tokens
    pub content: Vec<ContentSource>,
    /// the user theme
    pub theme: ThemeSpec,
    /// the plugins, in registration order
    pub plugins: Vec<Plugin>,
    /// how `dark` is expressed
    pub dark_mode: DarkMode,
    /// the variant separator
    pub separator: char,
    /// a prefix every utility must carry
    pub prefix: Option<String>,
    /// global `!important` handling
    pub important: Important,
    /// the serialization style
    pub output: OutputStyle,
    /// files over this many bytes are skipped
    pub max_file_size: Option<u64>,
    /// scanner threads, `None` picks from the cpu count
    pub threads: Option<usize>,
}

impl BuildConfig {
    /// make a config rooted at a directory with no content and no plugins
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            content: Vec::new(),
            theme: ThemeSpec::new(),
            plugins: Vec::new(),
            dark_mode: DarkMode::default(),
            separator: ':',
            prefix: None,
            important: Important::default(),
            output: OutputStyle::default(),
            max_file_size: None,
            threads: None,
        }
    }

    /// add a content source
    pub fn with_content(mut self, source: impl Into<ContentSource>) -> Self {
        self.content.push(source.into());
        self
    }

    /// set the theme
    pub fn with_theme(mut self, theme: ThemeSpec) -> Self {
        self.theme = theme;
        self
    }

    /// add plugins
    pub fn with_plugins(mut self, plugins: impl IntoIterator<Item = Plugin>) -> Self {
        self.plugins.extend(plugins);
        self
    }

    /// set the dark mode
    pub fn with_dark_mode(mut self, dark_mode: DarkMode) -> Self {
        self.dark_mode = dark_mode;
        self
    }

    /// set the output style
    pub fn with_output(mut self, output: OutputStyle) -> Self {
        self.output = output;
        self
    }

    /// the generator options
    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            separator: self.separator,
            prefix: self.prefix.clone(),
            important: self.important.clone(),
        }
    }

    /// the variant options
    pub fn variant_options(&self) -> VariantOptions {
        VariantOptions {
            dark_mode: self.dark_mode.clone(),
        }
    }
}
