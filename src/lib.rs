//! breeze is a utility-first css generator that only emits the classes your templates use
#![forbid(
    clippy::missing_docs_in_private_items,
    missing_docs,
    rustdoc::missing_crate_level_docs
)]

pub mod app;
pub mod cancel;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod generate;
pub mod macros;
pub mod output;
pub mod plugin;
pub mod rule;
pub mod scan;
pub mod theme;

pub use {
    cancel::CancelToken,
    diagnostics::{Diagnostics, Warning},
    engine::{BuildConfig, BuildOutput, Engine},
    error::{BuildError, ConfigurationError, Result},
    output::{GeneratedStylesheet, OutputStyle},
    plugin::{Plugin, PluginCatalog},
    scan::ContentSource,
    theme::ThemeSpec,
};
