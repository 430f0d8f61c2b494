//! plugin catalog stuff
use {
    crate::{
        error::{ConfigurationError, Result},
        plugin::{Plugin, builtin},
    },
    hashbrown::HashMap,
};

/// the name that expands to every built-in plugin except `preflight`
pub const CORE: &str = "core";

/// the plugins `core` expands to, in registration order
const CORE_PLUGINS: &[&str] = &[
    "layout",
    "spacing",
    "sizing",
    "typography",
    "colors",
    "borders",
    "effects",
    "variants",
];

/// maps plugin names from config files to plugin constructors
pub struct PluginCatalog {
    /// the installed plugins
    plugins: HashMap<&'static str, fn() -> Plugin>,
}

impl PluginCatalog {
    /// make a new catalog with the built-in plugins
    pub fn new() -> Self {
        let mut catalog = Self {
            plugins: HashMap::new(),
        };

        catalog.register("preflight", builtin::preflight::plugin);
        catalog.register("layout", builtin::layout::plugin);
        catalog.register("spacing", builtin::spacing::plugin);
        catalog.register("sizing", builtin::sizing::plugin);
        catalog.register("typography", builtin::typography::plugin);
        catalog.register("colors", builtin::colors::plugin);
        catalog.register("borders", builtin::borders::plugin);
        catalog.register("effects", builtin::effects::plugin);
        catalog.register("variants", builtin::variants::plugin);

        catalog
    }

    /// register a plugin constructor
    pub fn register(&mut self, name: &'static str, constructor: fn() -> Plugin) {
        self.plugins.insert(name, constructor);
    }

    /// make a plugin by name
    pub fn get(&self, name: &str) -> Option<Plugin> {
        self.plugins.get(name).map(|constructor| constructor())
    }

    /// the core plugins, in registration order
    pub fn core(&self) -> Vec<Plugin> {
        CORE_PLUGINS.iter().filter_map(|name| self.get(name)).collect()
    }

    /// resolve a list of names, expanding `core`, into plugins
    ///
    /// the order of the list is kept since it decides shadowing
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Plugin>> {
        let mut plugins = Vec::new();

        for name in names {
            let name = name.as_ref().trim();

            if name == CORE {
                plugins.extend(self.core());
                continue;
            }

            match self.get(name) {
                Some(plugin) => plugins.push(plugin),
                None => return Err(ConfigurationError::UnknownPlugin(name.to_string()).into()),
            }
        }

        Ok(plugins)
    }

    /// list available plugins
    pub fn list_plugins(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.plugins.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for PluginCatalog {
    fn default() -> Self {
        Self::new()
    }
}
