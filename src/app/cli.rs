//! cli stuff
use {
    crate::{config::BreezeConfig, plugin::PluginCatalog},
    clap::Parser,
    color_eyre::{Report, eyre::Result},
    schemars::generate::SchemaSettings,
    std::{
        fs::OpenOptions,
        io::{BufWriter, Write},
        path::{Path, PathBuf},
    },
};

/// the CLI
#[derive(Parser, Debug, Default)]
#[command(version, about)]
pub struct Cli {
    /// The config file to use instead of the nearest breeze.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the stylesheet to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write a minified stylesheet
    #[arg(short, long)]
    pub minify: bool,

    /// Resolve content patterns against this directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Print build stats to stderr
    #[arg(long)]
    pub stats: bool,

    /// Save generated files into `resources/` instead of printing
    #[arg(long)]
    pub save: bool,

    /// Generate a JSON schema for the config file
    #[arg(short = 's', long)]
    pub gen_schema: bool,

    /// Generate the default config file
    #[arg(short = 'd', long)]
    pub gen_default: bool,

    /// List the plugins that can be named in the config
    #[arg(short, long)]
    pub list_plugins: bool,
}

impl Cli {
    /// whether the cli only asked for generated files, not a build
    pub fn generates_only(&self) -> bool {
        self.gen_schema || self.gen_default || self.list_plugins
    }

    /// handle the generator flags
    ///
    /// # Errors
    ///
    /// returns an error if it fails to generate and/or save the json schema
    /// returns an error if it fails to generate and/or save the default config
    pub fn run_generators(&self) -> Result<()> {
        if self.gen_schema {
            Self::gen_schema(self.save)?;
        }

        if self.gen_default {
            Self::gen_defaults(self.save)?;
        }

        if self.list_plugins {
            println!("{}", Self::plugin_list());
        }

        Ok(())
    }

    /// the names of the built-in plugins, one per line
    pub fn plugin_list() -> String {
        PluginCatalog::new().list_plugins().join("\n")
    }

    /// save a string to a file
    ///
    /// # Errors
    ///
    /// returns an error if it fails to open `path`
    pub fn write_to_file(path: impl AsRef<Path>, contents: &str) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(path)?;
        let mut w = BufWriter::new(file);
        w.write_all(contents.as_bytes()).map_err(Report::new)
    }

    /// the json schema of the config file
    ///
    /// # Errors
    ///
    /// returns an error if it fails to convert the schema to a JSON string
    pub fn schema() -> Result<String> {
        let settings = SchemaSettings::draft2020_12().for_serialize();
        let generator = settings.into_generator();
        let schema = generator.into_root_schema_for::<BreezeConfig>();
        Ok(serde_json::to_string_pretty(&schema)?)
    }

    /// generate/save the config schema
    ///
    /// # Errors
    ///
    /// returns an error if it fails to build the schema
    /// returns an error if it fails to save the schema to `resources/breeze.schema.json`
    pub fn gen_schema(save: bool) -> Result<()> {
        let schema_str = Self::schema()?;

        if save {
            Self::write_to_file("resources/breeze.schema.json", &schema_str)?;
        } else {
            println!("{}", schema_str);
        }

        Ok(())
    }

    /// generate/save the default config file
    ///
    /// # Errors
    ///
    /// returns an error if it fails to convert the default config to TOML
    /// returns an error if it fails to save the default config to `resources/breeze.default.toml`
    pub fn gen_defaults(save: bool) -> Result<()> {
        let defaults = toml::to_string_pretty(&BreezeConfig::default())?;

        if save {
            Self::write_to_file("resources/breeze.default.toml", &defaults)?;
        } else {
            println!("{}", defaults);
        }

        Ok(())
    }
}
