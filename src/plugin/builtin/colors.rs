//! color utilities
use {
    super::prop,
    crate::{
        plugin::{Plugin, Utility, ValueHint},
        theme::Category,
    },
};

/// the `colors` plugin
pub fn plugin() -> Plugin {
    Plugin::new("colors").utilities(|_| {
        [
            ("text-color", "text", "color"),
            ("bg-color", "bg", "background-color"),
            ("border-color", "border", "border-color"),
            ("decoration-color", "decoration", "text-decoration-color"),
            ("outline-color", "outline", "outline-color"),
            ("fill", "fill", "fill"),
            ("stroke", "stroke", "stroke"),
            ("accent", "accent", "accent-color"),
            ("caret", "caret", "caret-color"),
        ]
        .into_iter()
        .map(|(name, root, property)| {
            Utility::scaled_as(name, root, [Category::Colors], prop(property)).hint(ValueHint::Color)
        })
        .collect()
    })
}
