//! plugin registry stuff
use {
    crate::{
        diagnostics::{ShadowKind, Warning},
        error::{ConfigurationError, Result},
        plugin::{Capability, Plugin, Utility, UtilityKind, Variant, VariantOptions},
        rule::UtilityRule,
        theme::ResolvedTheme,
    },
    hashbrown::HashMap,
    tracing::{debug, warn},
};

/// a utility and where it came from
#[derive(Debug, Clone)]
pub struct RegisteredUtility {
    /// the generator
    pub utility: Utility,
    /// the plugin that registered it
    pub plugin: String,
    /// its registration order, used to order output
    pub order: usize,
}

/// a variant and where it came from
#[derive(Debug, Clone)]
pub struct RegisteredVariant {
    /// the transformation
    pub variant: Variant,
    /// the plugin that registered it
    pub plugin: String,
    /// its registration order, used to order output
    pub rank: usize,
}

/// the composed generator of an ordered plugin list
///
/// one registry is built per build and only read afterwards
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    /// utilities by name
    utilities: HashMap<String, RegisteredUtility>,
    /// variants by name
    variants: HashMap<String, RegisteredVariant>,
    /// functional utility names by root, in registration order
    roots: HashMap<String, Vec<String>>,
    /// base rules, in registration order
    base: Vec<(String, UtilityRule)>,
}

impl PluginRegistry {
    /// fold a plugin list into a registry
    ///
    /// later registrations replace earlier ones of the same name and every
    /// replacement is reported as a shadow warning. any malformed plugin
    /// aborts the fold
    pub fn compose(
        plugins: &[Plugin],
        theme: &ResolvedTheme,
        options: &VariantOptions,
        separator: char,
    ) -> Result<(Self, Vec<Warning>)> {
        let mut registry = Self::default();
        let mut warnings = Vec::new();
        let mut counter = 0usize;

        for plugin in plugins {
            plugin.validate()?;

            let invalid = |reason: String| ConfigurationError::InvalidPlugin {
                plugin: plugin.name().to_string(),
                reason,
            };

            for capability in plugin.capabilities() {
                match capability {
                    Capability::Utilities(generate) => {
                        for utility in generate(theme) {
                            utility.check().map_err(invalid)?;
                            counter += 1;

                            let name = utility.name().to_string();
                            let previous = registry.utilities.insert(
                                name.clone(),
                                RegisteredUtility {
                                    utility,
                                    plugin: plugin.name().to_string(),
                                    order: counter,
                                },
                            );

                            if let Some(previous) = previous {
                                warnings.push(Warning::PluginShadow {
                                    kind: ShadowKind::Utility,
                                    name,
                                    shadowed: previous.plugin,
                                    by: plugin.name().to_string(),
                                });
                            }
                        }
                    }
                    Capability::Variants(generate) => {
                        for variant in generate(theme, options) {
                            variant.check(separator).map_err(invalid)?;
                            counter += 1;

                            let name = variant.name().to_string();
                            let previous = registry.variants.insert(
                                name.clone(),
                                RegisteredVariant {
                                    variant,
                                    plugin: plugin.name().to_string(),
                                    rank: counter,
                                },
                            );

                            if let Some(previous) = previous {
                                warnings.push(Warning::PluginShadow {
                                    kind: ShadowKind::Variant,
                                    name,
                                    shadowed: previous.plugin,
                                    by: plugin.name().to_string(),
                                });
                            }
                        }
                    }
                    Capability::Base(generate) => {
                        for rule in generate(theme) {
                            if rule.declarations().is_empty() {
                                return Err(invalid(format!(
                                    "base rule `{}` has no declarations",
                                    rule.selector()
                                ))
                                .into());
                            }
                            registry.base.push((plugin.name().to_string(), rule));
                        }
                    }
                }
            }

            debug!("Registered plugin {}", plugin.name());
        }

        registry.index_roots();

        for warning in &warnings {
            warn!("{}", warning);
        }

        debug!(
            "Composed {} utilities and {} variants from {} plugins",
            registry.utilities.len(),
            registry.variants.len(),
            plugins.len()
        );

        Ok((registry, warnings))
    }

    /// rebuild the root index from the final utility map
    fn index_roots(&mut self) {
        self.roots.clear();

        for (name, registered) in &self.utilities {
            if let UtilityKind::Functional(rule) = registered.utility.kind() {
                self.roots
                    .entry(rule.root.clone())
                    .or_default()
                    .push(name.clone());
            }
        }

        for names in self.roots.values_mut() {
            names.sort_by_key(|name| self.utilities.get(name).map_or(usize::MAX, |u| u.order));
        }
    }

    /// look a utility up by name
    pub fn utility(&self, name: &str) -> Option<&RegisteredUtility> {
        self.utilities.get(name)
    }

    /// look a static utility up by its class
    pub fn static_utility(&self, class: &str) -> Option<&RegisteredUtility> {
        self.utilities
            .get(class)
            .filter(|u| matches!(u.utility.kind(), UtilityKind::Static(_)))
    }

    /// the functional utilities sharing a root, in registration order
    pub fn candidates<'a>(&'a self, root: &str) -> impl Iterator<Item = &'a RegisteredUtility> + 'a {
        self.roots
            .get(root)
            .into_iter()
            .flatten()
            .filter_map(|name| self.utilities.get(name))
    }

    /// look a variant up by name
    pub fn variant(&self, name: &str) -> Option<&RegisteredVariant> {
        self.variants.get(name)
    }

    /// the base rules, in registration order
    pub fn base_rules(&self) -> impl Iterator<Item = &UtilityRule> {
        self.base.iter().map(|(_, rule)| rule)
    }

    /// the number of utilities
    pub fn utility_count(&self) -> usize {
        self.utilities.len()
    }

    /// the number of variants
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            rule::{Layer, decls},
            theme::{Category, ThemeTable},
        },
    };

    fn theme() -> ResolvedTheme {
        ResolvedTheme::from(ThemeTable::new())
    }

    fn compose(plugins: &[Plugin]) -> Result<(PluginRegistry, Vec<Warning>)> {
        PluginRegistry::compose(plugins, &theme(), &VariantOptions::default(), ':')
    }

    #[test]
    fn test_last_registration_wins() {
        let first = Plugin::new("first")
            .utilities(|_| vec![Utility::fixed("flex", decls([("display", "flex")]))]);
        let second = Plugin::new("second")
            .utilities(|_| vec![Utility::fixed("flex", decls([("display", "inline-flex")]))]);

        let (registry, warnings) = compose(&[first, second]).unwrap();
        let flex = registry.static_utility("flex").unwrap();

        assert_eq!(flex.plugin, "second");
        assert!(matches!(
            flex.utility.kind(),
            UtilityKind::Static(d) if d[0].value == "inline-flex"
        ));
        assert_eq!(
            warnings,
            vec![Warning::PluginShadow {
                kind: ShadowKind::Utility,
                name: "flex".to_string(),
                shadowed: "first".to_string(),
                by: "second".to_string(),
            }]
        );
    }

    #[test]
    fn test_variant_shadowing() {
        let first = Plugin::new("a").variants(|_, _| vec![Variant::suffix("hover", ":hover")]);
        let second =
            Plugin::new("b").variants(|_, _| vec![Variant::suffix("hover", ":focus-visible")]);

        let (registry, warnings) = compose(&[first, second]).unwrap();
        assert_eq!(registry.variant("hover").unwrap().plugin, "b");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].is_shadow());
    }

    #[test]
    fn test_roots_in_registration_order() {
        let plugin = Plugin::new("text").utilities(|_| {
            vec![
                Utility::scaled_as("font-size", "text", [Category::FontSize], |_| Vec::new()),
                Utility::scaled_as("text-color", "text", [Category::Colors], |_| Vec::new()),
            ]
        });

        let (registry, _) = compose(&[plugin]).unwrap();
        let names: Vec<&str> = registry.candidates("text").map(|u| u.utility.name()).collect();

        assert_eq!(names, vec!["font-size", "text-color"]);
        assert_eq!(registry.candidates("txt").count(), 0);
        assert!(registry.static_utility("text-color").is_none());
    }

    #[test]
    fn test_malformed_plugin_is_fatal() {
        let bad = Plugin::new("bad").variants(|_, _| vec![Variant::at_rule("md", "min-width")]);
        let err = compose(&[bad]).unwrap_err();
        assert!(err.is_configuration());

        let empty_base = Plugin::new("empty")
            .base(|_| vec![UtilityRule::new("body", Vec::new(), Layer::Base)]);
        assert!(compose(&[empty_base]).unwrap_err().is_configuration());
    }

    #[test]
    fn test_fold_is_deterministic() {
        let plugins = || {
            vec![
                Plugin::new("a").utilities(|_| {
                    vec![
                        Utility::fixed("block", decls([("display", "block")])),
                        Utility::fixed("flex", decls([("display", "flex")])),
                    ]
                }),
                Plugin::new("b").utilities(|_| {
                    vec![Utility::fixed("flex", decls([("display", "grid")]))]
                }),
            ]
        };

        let (first, first_warnings) = compose(&plugins()).unwrap();
        let (second, second_warnings) = compose(&plugins()).unwrap();

        assert_eq!(first_warnings, second_warnings);
        assert_eq!(
            first.utility("flex").unwrap().order,
            second.utility("flex").unwrap().order
        );
        assert_eq!(first.utility_count(), 2);
    }
}
