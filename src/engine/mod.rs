//! the build pipeline
pub mod config;
pub mod stats;

use {
    crate::{
        cancel::CancelToken,
        diagnostics::Diagnostics,
        error::{BuildError, ConfigurationError, Result},
        generate::{Generator, GeneratorOptions},
        output::{GeneratedStylesheet, OutputAssembler, OutputStyle},
        plugin::PluginRegistry,
        scan::{ContentScanner, FsScanner, TokenSet, source::validate_glob},
        theme::{ResolvedTheme, ThemeResolver},
    },
    std::time::Instant,
    tracing::{debug, info},
};

pub use {config::BuildConfig, stats::BuildStats};

/// the result of a successful build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    /// the stylesheet
    pub stylesheet: GeneratedStylesheet,
    /// every warning raised, in the order they happened
    pub diagnostics: Diagnostics,
    /// numbers about the build
    pub stats: BuildStats,
}

/// turn a token set into a stylesheet
///
/// pure: the same tokens, theme and registry always give the same css
pub fn generate_stylesheet(
    tokens: &TokenSet,
    theme: &ResolvedTheme,
    registry: &PluginRegistry,
    options: &GeneratorOptions,
    style: OutputStyle,
) -> GeneratedStylesheet {
    let generated = Generator::new(theme, registry, options).generate_all(tokens);
    OutputAssembler::new(style).assemble(registry.base_rules(), generated)
}

/// the theme and plugins of one build
struct Prepared {
    /// the resolved theme
    theme: ResolvedTheme,
    /// the composed plugins
    registry: PluginRegistry,
    /// warnings raised while preparing
    diagnostics: Diagnostics,
}

/// runs builds
///
/// every build resolves its own theme and composes its own registry, nothing
/// is shared between builds
pub struct Engine<S: ContentScanner = FsScanner> {
    /// the configuration
    config: BuildConfig,
    /// where tokens come from
    scanner: S,
}

impl Engine<FsScanner> {
    /// make an engine scanning the filesystem
    pub fn new(config: BuildConfig) -> Self {
        let scanner = match config.threads {
            Some(threads) => FsScanner::with_threads(&config.root, threads),
            None => FsScanner::new(&config.root),
        }
        .with_max_file_size(config.max_file_size);

        Self { config, scanner }
    }
}

impl<S: ContentScanner> Engine<S> {
    /// make an engine with a custom scanner
    pub fn with_scanner(config: BuildConfig, scanner: S) -> Self {
        Self { config, scanner }
    }

    /// the configuration
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// run a build
    ///
    /// configuration problems abort before anything is scanned. a cancelled
    /// build returns [`BuildError::Cancelled`] and no stylesheet
    pub async fn build(&self, cancel: &CancelToken) -> Result<BuildOutput> {
        let mut stats = BuildStats::default();

        let started = Instant::now();
        self.check_content()?;
        let Prepared {
            theme,
            registry,
            mut diagnostics,
        } = self.prepare()?;
        stats.prepare = started.elapsed();
        check_cancelled(cancel)?;

        let started = Instant::now();
        let scanned = self.scanner.scan(&self.config.content, cancel).await?;
        stats.scan = started.elapsed();
        stats.files = scanned.files;
        stats.bytes = scanned.bytes;
        stats.tokens = scanned.tokens.len();
        diagnostics.extend(scanned.warnings);
        check_cancelled(cancel)?;

        let started = Instant::now();
        let stylesheet = generate_stylesheet(
            &scanned.tokens,
            &theme,
            &registry,
            &self.config.generator_options(),
            self.config.output,
        );
        stats.generate = started.elapsed();
        stats.rules = stylesheet.rule_count();
        check_cancelled(cancel)?;

        info!("Build finished: {}", stats);

        Ok(BuildOutput {
            stylesheet,
            diagnostics,
            stats,
        })
    }

    /// generate a stylesheet from tokens that were gathered elsewhere
    pub fn render(&self, tokens: &TokenSet) -> Result<(GeneratedStylesheet, Diagnostics)> {
        let prepared = self.prepare()?;
        let stylesheet = generate_stylesheet(
            tokens,
            &prepared.theme,
            &prepared.registry,
            &self.config.generator_options(),
            self.config.output,
        );

        Ok((stylesheet, prepared.diagnostics))
    }

    /// fail early on content lists that can never work
    fn check_content(&self) -> Result<()> {
        if self.config.content.is_empty() {
            return Err(ConfigurationError::EmptyContent.into());
        }

        for source in &self.config.content {
            if !source.is_raw() {
                validate_glob(&source.to_string())?;
            }
        }

        Ok(())
    }

    /// resolve the theme and compose the plugins
    fn prepare(&self) -> Result<Prepared> {
        let mut diagnostics = Diagnostics::new();

        let (theme, theme_warnings) =
            ThemeResolver::with_base_theme()?.resolve(&self.config.theme)?;
        diagnostics.extend(theme_warnings);

        let (registry, shadows) = PluginRegistry::compose(
            &self.config.plugins,
            &theme,
            &self.config.variant_options(),
            self.config.separator,
        )?;
        diagnostics.extend(shadows);

        debug!(
            "Prepared {} utilities and {} variants",
            registry.utility_count(),
            registry.variant_count()
        );

        Ok(Prepared {
            theme,
            registry,
            diagnostics,
        })
    }
}

/// bail out of a superseded build
fn check_cancelled(cancel: &CancelToken) -> Result<()> {
    if cancel.is_cancelled() {
        info!("Build cancelled");
        return Err(BuildError::Cancelled);
    }
    Ok(())
}
