//! width, height and max-width utilities
use {
    super::{prop, props},
    crate::{
        plugin::{Plugin, Utility, ValueHint},
        theme::Category,
    },
};

/// the `sizing` plugin
pub fn plugin() -> Plugin {
    Plugin::new("sizing").utilities(|_| {
        let scales = [Category::Spacing, Category::Sizing];

        vec![
            Utility::scaled("w", scales, prop("width"))
                .hint(ValueHint::Length)
                .extras([("screen", "100vw"), ("svw", "100svw")]),
            Utility::scaled("h", scales, prop("height"))
                .hint(ValueHint::Length)
                .extras([("screen", "100vh"), ("svh", "100svh"), ("dvh", "100dvh")]),
            Utility::scaled("size", scales, props(["width", "height"])).hint(ValueHint::Length),
            Utility::scaled("min-w", [Category::Sizing], prop("min-width"))
                .hint(ValueHint::Length)
                .extras([("0", "0px")]),
            Utility::scaled("min-h", [Category::Sizing], prop("min-height"))
                .hint(ValueHint::Length)
                .extras([("0", "0px"), ("screen", "100vh")]),
            Utility::scaled("max-w", [Category::MaxWidth], prop("max-width"))
                .hint(ValueHint::Length)
                .extras([("none", "none"), ("full", "100%")]),
            Utility::scaled("max-h", scales, prop("max-height"))
                .hint(ValueHint::Length)
                .extras([("none", "none"), ("screen", "100vh")]),
        ]
    })
}
