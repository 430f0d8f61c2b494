//! the core app
use {
    super::{cli::Cli, logging},
    crate::{
        cancel::CancelToken,
        config::BreezeConfig,
        diagnostics::Diagnostics,
        engine::{BuildOutput, Engine},
        output::OutputStyle,
        plugin::PluginCatalog,
    },
    clap::Parser,
    color_eyre::{
        Section,
        eyre::{Context, Result},
    },
    owo_colors::{OwoColorize, Stream},
    std::{
        io::Write,
        path::{Path, PathBuf},
    },
    tracing::info,
};

/// the breeze app
pub struct BreezeApp {
    /// the parsed arguments
    cli: Cli,
    /// the loaded config file
    config: BreezeConfig,
    /// the directory content patterns resolve against
    root: PathBuf,
    /// cancels the build on ctrl+c
    cancel: CancelToken,
}

impl BreezeApp {
    /// initialize breeze
    ///
    /// - 1. installs the color_eyre error hook
    /// - 2. parses the cli and handles the generator flags
    /// - 3. loads the config file
    /// - 4. sets up logging
    /// - 5. sets up the ctrl+c handler
    ///
    /// returns `None` when the cli only asked for generated files
    ///
    /// # Errors
    ///
    /// returns an error if color_eyre fails to install
    /// returns an error if the config file can't be loaded or is invalid
    /// returns an error if it fails to setup logging or the interrupt handler
    pub fn init() -> Result<Option<Self>> {
        color_eyre::install()?;

        let cli = Cli::parse();
        if cli.generates_only() {
            cli.run_generators()?;
            return Ok(None);
        }

        let cwd = std::env::current_dir().wrap_err("failed to get current working directory")?;
        let config_path = cli
            .config
            .clone()
            .or_else(|| BreezeConfig::find_local_config(&cwd));

        let config = BreezeConfig::load(config_path.as_deref())
            .wrap_err("failed to load configuration")
            .suggestion("run `breeze --gen-default` to see every option with its default")?;

        logging::setup(&config.logging()).wrap_err("failed to setup logging")?;

        let root = cli
            .root
            .clone()
            .or_else(|| {
                config_path
                    .as_deref()
                    .and_then(Path::parent)
                    .filter(|parent| !parent.as_os_str().is_empty())
                    .map(Path::to_path_buf)
            })
            .unwrap_or(cwd);

        let cancel = Self::setup_interrupt_handler()?;

        Ok(Some(Self {
            cli,
            config,
            root,
            cancel,
        }))
    }

    /// run one build and write the stylesheet
    ///
    /// # Errors
    ///
    /// returns an error if the build fails or the stylesheet can't be written
    pub async fn run(self) -> Result<()> {
        info!(
            "Starting {} v{} in {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            self.root.display()
        );

        let output_path = self
            .cli
            .output
            .clone()
            .or_else(|| self.config.output_path().map(|p| self.root.join(p)));

        let mut build = self
            .config
            .clone()
            .into_build_config(&self.root, &PluginCatalog::new())
            .wrap_err("invalid configuration")?;
        if self.cli.minify {
            build.output = OutputStyle::Minified;
        }

        let BuildOutput {
            stylesheet,
            diagnostics,
            stats,
        } = Engine::new(build)
            .build(&self.cancel)
            .await
            .wrap_err("build failed")?;

        Self::report_warnings(&diagnostics);

        match output_path {
            Some(path) => {
                Cli::write_to_file(&path, stylesheet.css())
                    .wrap_err_with(|| format!("failed to write {}", path.display()))?;
                info!("Wrote {}", path.display());
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(stylesheet.css().as_bytes())?;
                stdout.flush()?;
            }
        }

        if self.cli.stats {
            eprintln!("{}", stats);
        }

        Ok(())
    }

    /// print every warning to stderr
    fn report_warnings(diagnostics: &Diagnostics) {
        for warning in diagnostics.warnings() {
            eprintln!(
                "{} {}",
                "warning:".if_supports_color(Stream::Stderr, |t| t.yellow()),
                warning
            );
        }
    }

    /// setup the interruption handler
    fn setup_interrupt_handler() -> Result<CancelToken> {
        let cancel = CancelToken::new();
        let handler = cancel.clone();

        ctrlc::set_handler(move || {
            handler.cancel();
        })
        .context("failed to set Ctrl+C handler")?;

        Ok(cancel)
    }
}
