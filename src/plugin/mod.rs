//! plugins, the registry they compose into, and the built-in catalog
pub mod builtin;
pub mod catalog;
pub mod registry;
pub mod utility;
pub mod variant;

use {
    crate::{
        error::{ConfigurationError, Result},
        rule::UtilityRule,
        theme::ResolvedTheme,
    },
    std::{fmt, sync::Arc},
};

pub use {
    catalog::PluginCatalog,
    registry::PluginRegistry,
    utility::{Utility, UtilityKind, ValueHint, ValueRule},
    variant::{DarkMode, Variant, VariantKind, VariantOptions},
};

/// contributes utilities given the resolved theme
pub type UtilitiesFn = Arc<dyn Fn(&ResolvedTheme) -> Vec<Utility> + Send + Sync>;

/// contributes variants given the resolved theme and the build options
pub type VariantsFn = Arc<dyn Fn(&ResolvedTheme, &VariantOptions) -> Vec<Variant> + Send + Sync>;

/// contributes unconditional base-layer rules
pub type BaseFn = Arc<dyn Fn(&ResolvedTheme) -> Vec<UtilityRule> + Send + Sync>;

/// something a plugin can contribute
#[derive(Clone)]
pub enum Capability {
    /// named utility generators
    Utilities(UtilitiesFn),
    /// named variant transformations
    Variants(VariantsFn),
    /// base rules emitted whenever the plugin is registered
    Base(BaseFn),
}

impl Capability {
    /// a short name for logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::Utilities(_) => "utilities",
            Self::Variants(_) => "variants",
            Self::Base(_) => "base",
        }
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Capability::{}", self.label())
    }
}

/// a named set of capabilities
///
/// plugins are plain values built by the caller, there is no dynamic loading
#[derive(Debug, Clone)]
pub struct Plugin {
    /// the plugin name, used in shadow warnings
    name: String,
    /// what it contributes, in order
    capabilities: Vec<Capability>,
}

impl Plugin {
    /// make a plugin with no capabilities
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capabilities: Vec::new(),
        }
    }

    /// contribute utilities
    pub fn utilities<F>(mut self, f: F) -> Self
    where
        F: Fn(&ResolvedTheme) -> Vec<Utility> + Send + Sync + 'static,
    {
        self.capabilities.push(Capability::Utilities(Arc::new(f)));
        self
    }

    /// contribute variants
    pub fn variants<F>(mut self, f: F) -> Self
    where
        F: Fn(&ResolvedTheme, &VariantOptions) -> Vec<Variant> + Send + Sync + 'static,
    {
        self.capabilities.push(Capability::Variants(Arc::new(f)));
        self
    }

    /// contribute base rules
    pub fn base<F>(mut self, f: F) -> Self
    where
        F: Fn(&ResolvedTheme) -> Vec<UtilityRule> + Send + Sync + 'static,
    {
        self.capabilities.push(Capability::Base(Arc::new(f)));
        self
    }

    /// the plugin name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// the capabilities
    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    /// check the plugin's own shape
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| ConfigurationError::InvalidPlugin {
            plugin: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.name.trim().is_empty() {
            return Err(invalid("plugin name is empty").into());
        }

        if self.capabilities.is_empty() {
            return Err(invalid("plugin contributes nothing").into());
        }

        Ok(())
    }
}
