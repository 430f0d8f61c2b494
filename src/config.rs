//! configuration file stuff
pub mod options;
pub mod validate;

pub use {
    options::{BreezeConfig, LoggingConfig, LoggingFormat, OutputConfig, ScanConfig},
    validate::{Validate, format_validation_errors},
};
