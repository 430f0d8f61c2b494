//! pseudo-class, group, dark mode and responsive variants
use crate::{
    plugin::{Plugin, Variant, VariantKind, VariantOptions},
    theme::ResolvedTheme,
};

/// pseudo-class and pseudo-element variants, in cascade order
const PSEUDO: &[(&str, &str)] = &[
    ("placeholder", "::placeholder"),
    ("before", "::before"),
    ("after", "::after"),
    ("first", ":first-child"),
    ("last", ":last-child"),
    ("odd", ":nth-child(odd)"),
    ("even", ":nth-child(even)"),
    ("visited", ":visited"),
    ("checked", ":checked"),
    ("focus-within", ":focus-within"),
    ("hover", ":hover"),
    ("focus", ":focus"),
    ("focus-visible", ":focus-visible"),
    ("active", ":active"),
    ("disabled", ":disabled"),
];

/// states usable on `group` and `peer` markers
const MARKER_STATES: &[&str] = &["hover", "focus", "active", "checked", "disabled"];

/// the variants for a theme and options
fn variants(theme: &ResolvedTheme, options: &VariantOptions) -> Vec<Variant> {
    let mut variants: Vec<Variant> = PSEUDO
        .iter()
        .map(|(name, suffix)| Variant::suffix(*name, *suffix))
        .collect();

    for state in MARKER_STATES {
        variants.push(Variant::template(
            format!("group-{}", state),
            format!(".group:{} &", state),
        ));
    }
    for state in MARKER_STATES {
        variants.push(Variant::template(
            format!("peer-{}", state),
            format!(".peer:{} ~ &", state),
        ));
    }

    variants.extend([
        Variant::template("ltr", "[dir=\"ltr\"] &"),
        Variant::template("rtl", "[dir=\"rtl\"] &"),
        Variant::at_rule("motion-safe", "@media (prefers-reduced-motion: no-preference)"),
        Variant::at_rule("motion-reduce", "@media (prefers-reduced-motion: reduce)"),
        Variant::new("dark", options.dark_mode.variant_kind()),
    ]);

    variants.extend(theme.screens().into_iter().map(|(name, width)| {
        Variant::new(name, VariantKind::AtRule(format!("@media (min-width: {})", width)))
    }));

    variants.push(Variant::at_rule("print", "@media print"));

    variants
}

/// the `variants` plugin
pub fn plugin() -> Plugin {
    Plugin::new("variants").variants(variants)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            plugin::{DarkMode, PluginRegistry},
            theme::ThemeTable,
        },
    };

    fn registry(options: &VariantOptions) -> PluginRegistry {
        let theme: ResolvedTheme = ThemeTable::base().unwrap().into();
        PluginRegistry::compose(&[plugin()], &theme, options, ':').unwrap().0
    }

    #[test]
    fn test_screens_ranked_by_width() {
        let registry = registry(&VariantOptions::default());
        let rank = |name| registry.variant(name).unwrap().rank;

        assert!(rank("hover") < rank("dark"));
        assert!(rank("sm") < rank("md"));
        assert!(rank("md") < rank("lg"));
        assert!(rank("xl") < rank("2xl"));
        assert_eq!(
            registry.variant("md").unwrap().variant.kind(),
            &VariantKind::AtRule("@media (min-width: 768px)".to_string())
        );
    }

    #[test]
    fn test_dark_follows_options() {
        let registry = registry(&VariantOptions {
            dark_mode: DarkMode::Class,
        });

        assert_eq!(
            registry.variant("dark").unwrap().variant.kind(),
            &VariantKind::Ancestor(".dark".to_string())
        );
    }

    #[test]
    fn test_group_and_peer() {
        let registry = registry(&VariantOptions::default());

        assert_eq!(
            registry.variant("group-hover").unwrap().variant.kind(),
            &VariantKind::Template(".group:hover &".to_string())
        );
        assert!(registry.variant("peer-checked").is_some());
    }
}
