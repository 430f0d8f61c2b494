//! the application around the engine
#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod core;
pub mod logging;

#[cfg(feature = "cli")]
pub use self::core::BreezeApp;
