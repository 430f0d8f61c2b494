//! opacity, shadow, cursor, interaction and transition utilities
use {
    super::{prop, statics},
    crate::{
        plugin::{Plugin, Utility, ValueHint},
        rule::decls,
        theme::Category,
    },
};

/// the default timing function of transitions
const EASE: &str = "cubic-bezier(0.4, 0, 0.2, 1)";

/// the `effects` plugin
pub fn plugin() -> Plugin {
    Plugin::new("effects").utilities(|_| {
        let mut utilities = vec![
            Utility::scaled("opacity", [Category::Opacity], prop("opacity")).hint(ValueHint::Number),
            Utility::scaled("shadow", [Category::BoxShadow], prop("box-shadow")),
            Utility::scaled("duration", [], prop("transition-duration"))
                .hint(ValueHint::Length)
                .extras(
                    [75, 100, 150, 200, 300, 500, 700, 1000]
                        .map(|ms| (ms.to_string(), format!("{}ms", ms))),
                ),
        ];

        utilities.extend(statics(
            "cursor",
            [
                ("cursor-auto", "auto"),
                ("cursor-default", "default"),
                ("cursor-pointer", "pointer"),
                ("cursor-wait", "wait"),
                ("cursor-text", "text"),
                ("cursor-move", "move"),
                ("cursor-not-allowed", "not-allowed"),
            ],
        ));
        utilities.extend(statics(
            "pointer-events",
            [("pointer-events-none", "none"), ("pointer-events-auto", "auto")],
        ));
        utilities.extend(statics(
            "user-select",
            [
                ("select-none", "none"),
                ("select-text", "text"),
                ("select-all", "all"),
                ("select-auto", "auto"),
            ],
        ));
        utilities.extend(statics(
            "transition-timing-function",
            [
                ("ease-linear", "linear"),
                ("ease-in", "cubic-bezier(0.4, 0, 1, 1)"),
                ("ease-out", "cubic-bezier(0, 0, 0.2, 1)"),
                ("ease-in-out", EASE),
            ],
        ));

        for (class, properties) in [
            (
                "transition",
                "color, background-color, border-color, text-decoration-color, fill, stroke, opacity, box-shadow, transform",
            ),
            (
                "transition-colors",
                "color, background-color, border-color, text-decoration-color, fill, stroke",
            ),
            ("transition-opacity", "opacity"),
            ("transition-shadow", "box-shadow"),
            ("transition-transform", "transform"),
        ] {
            utilities.push(Utility::fixed(
                class,
                decls([
                    ("transition-property", properties),
                    ("transition-timing-function", EASE),
                    ("transition-duration", "150ms"),
                ]),
            ));
        }
        utilities.push(Utility::fixed(
            "transition-none",
            decls([("transition-property", "none")]),
        ));

        utilities
    })
}
