//! padding, margin, gap and space-between utilities
use {
    super::{BoxedGen, boxed, prop, props},
    crate::{
        plugin::{Plugin, Utility, ValueHint},
        theme::Category,
    },
};

/// the selector suffix that targets every child but the first
const SPACE_BETWEEN: &str = " > :not([hidden]) ~ :not([hidden])";

/// the `spacing` plugin
pub fn plugin() -> Plugin {
    Plugin::new("spacing").utilities(|_| {
        let padding = |root: &str, generate: BoxedGen| {
            Utility::scaled(root, [Category::Spacing], generate).hint(ValueHint::Length)
        };
        let margin = |root: &str, generate: BoxedGen| {
            Utility::scaled(root, [Category::Spacing], generate)
                .hint(ValueHint::Length)
                .extras([("auto", "auto")])
                .negative()
        };

        vec![
            padding("p", boxed(prop("padding"))),
            padding("px", boxed(props(["padding-left", "padding-right"]))),
            padding("py", boxed(props(["padding-top", "padding-bottom"]))),
            padding("pt", boxed(prop("padding-top"))),
            padding("pr", boxed(prop("padding-right"))),
            padding("pb", boxed(prop("padding-bottom"))),
            padding("pl", boxed(prop("padding-left"))),
            margin("m", boxed(prop("margin"))),
            margin("mx", boxed(props(["margin-left", "margin-right"]))),
            margin("my", boxed(props(["margin-top", "margin-bottom"]))),
            margin("mt", boxed(prop("margin-top"))),
            margin("mr", boxed(prop("margin-right"))),
            margin("mb", boxed(prop("margin-bottom"))),
            margin("ml", boxed(prop("margin-left"))),
            Utility::scaled("gap", [Category::Spacing], prop("gap")).hint(ValueHint::Length),
            Utility::scaled("gap-x", [Category::Spacing], prop("column-gap"))
                .hint(ValueHint::Length),
            Utility::scaled("gap-y", [Category::Spacing], prop("row-gap")).hint(ValueHint::Length),
            Utility::scaled("space-x", [Category::Spacing], prop("margin-left"))
                .hint(ValueHint::Length)
                .suffix(SPACE_BETWEEN)
                .negative(),
            Utility::scaled("space-y", [Category::Spacing], prop("margin-top"))
                .hint(ValueHint::Length)
                .suffix(SPACE_BETWEEN)
                .negative(),
        ]
    })
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            plugin::{PluginRegistry, VariantOptions},
            theme::{ResolvedTheme, ThemeTable},
        },
    };

    #[test]
    fn test_margins_allow_negatives() {
        let theme: ResolvedTheme = ThemeTable::base().unwrap().into();
        let (registry, _) =
            PluginRegistry::compose(&[plugin()], &theme, &VariantOptions::default(), ':').unwrap();

        let m = registry.candidates("m").next().unwrap();
        assert!(m.utility.value_rule().unwrap().negative);

        let p = registry.candidates("p").next().unwrap();
        assert!(!p.utility.value_rule().unwrap().negative);

        let space = registry.candidates("space-x").next().unwrap();
        assert_eq!(space.utility.selector_suffix(), Some(SPACE_BETWEEN));
    }
}
