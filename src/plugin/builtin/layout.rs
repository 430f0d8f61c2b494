//! display, position, flexbox, grid and overflow utilities
use {
    super::{prop, props, statics},
    crate::{
        plugin::{Plugin, Utility, ValueHint},
        theme::Category,
    },
};

/// the `layout` plugin
pub fn plugin() -> Plugin {
    Plugin::new("layout").utilities(|_| {
        let mut utilities = Vec::new();

        utilities.extend(statics(
            "display",
            [
                ("block", "block"),
                ("inline-block", "inline-block"),
                ("inline", "inline"),
                ("flex", "flex"),
                ("inline-flex", "inline-flex"),
                ("grid", "grid"),
                ("inline-grid", "inline-grid"),
                ("table", "table"),
                ("contents", "contents"),
                ("hidden", "none"),
            ],
        ));
        utilities.extend(statics(
            "position",
            [
                ("static", "static"),
                ("fixed", "fixed"),
                ("absolute", "absolute"),
                ("relative", "relative"),
                ("sticky", "sticky"),
            ],
        ));
        utilities.extend(statics(
            "flex-direction",
            [
                ("flex-row", "row"),
                ("flex-row-reverse", "row-reverse"),
                ("flex-col", "column"),
                ("flex-col-reverse", "column-reverse"),
            ],
        ));
        utilities.extend(statics(
            "flex-wrap",
            [
                ("flex-wrap", "wrap"),
                ("flex-wrap-reverse", "wrap-reverse"),
                ("flex-nowrap", "nowrap"),
            ],
        ));
        utilities.extend(statics(
            "flex",
            [
                ("flex-1", "1 1 0%"),
                ("flex-auto", "1 1 auto"),
                ("flex-initial", "0 1 auto"),
                ("flex-none", "none"),
            ],
        ));
        utilities.extend(statics("flex-grow", [("grow", "1"), ("grow-0", "0")]));
        utilities.extend(statics("flex-shrink", [("shrink", "1"), ("shrink-0", "0")]));
        utilities.extend(statics(
            "align-items",
            [
                ("items-start", "flex-start"),
                ("items-end", "flex-end"),
                ("items-center", "center"),
                ("items-baseline", "baseline"),
                ("items-stretch", "stretch"),
            ],
        ));
        utilities.extend(statics(
            "justify-content",
            [
                ("justify-start", "flex-start"),
                ("justify-end", "flex-end"),
                ("justify-center", "center"),
                ("justify-between", "space-between"),
                ("justify-around", "space-around"),
                ("justify-evenly", "space-evenly"),
            ],
        ));
        utilities.extend(statics(
            "align-self",
            [
                ("self-auto", "auto"),
                ("self-start", "flex-start"),
                ("self-end", "flex-end"),
                ("self-center", "center"),
                ("self-stretch", "stretch"),
            ],
        ));
        utilities.extend(statics(
            "overflow",
            [
                ("overflow-auto", "auto"),
                ("overflow-hidden", "hidden"),
                ("overflow-visible", "visible"),
                ("overflow-scroll", "scroll"),
            ],
        ));
        utilities.extend(statics(
            "overflow-x",
            [("overflow-x-auto", "auto"), ("overflow-x-hidden", "hidden")],
        ));
        utilities.extend(statics(
            "overflow-y",
            [("overflow-y-auto", "auto"), ("overflow-y-hidden", "hidden")],
        ));
        utilities.extend(statics(
            "visibility",
            [("visible", "visible"), ("invisible", "hidden")],
        ));

        let inset_extras = [("auto", "auto"), ("full", "100%"), ("1/2", "50%")];
        utilities.extend([
            Utility::scaled("inset", [Category::Spacing], prop("inset"))
                .extras(inset_extras)
                .negative(),
            Utility::scaled("inset-x", [Category::Spacing], props(["left", "right"]))
                .extras(inset_extras)
                .negative(),
            Utility::scaled("inset-y", [Category::Spacing], props(["top", "bottom"]))
                .extras(inset_extras)
                .negative(),
            Utility::scaled("top", [Category::Spacing], prop("top"))
                .extras(inset_extras)
                .negative(),
            Utility::scaled("right", [Category::Spacing], prop("right"))
                .extras(inset_extras)
                .negative(),
            Utility::scaled("bottom", [Category::Spacing], prop("bottom"))
                .extras(inset_extras)
                .negative(),
            Utility::scaled("left", [Category::Spacing], prop("left"))
                .extras(inset_extras)
                .negative(),
            Utility::scaled("z", [Category::ZIndex], prop("z-index"))
                .hint(ValueHint::Number)
                .negative(),
        ]);

        let columns: Vec<(String, String)> = (1..=12)
            .map(|n| (n.to_string(), format!("repeat({}, minmax(0, 1fr))", n)))
            .chain([("none".to_string(), "none".to_string())])
            .collect();
        let spans: Vec<(String, String)> = (1..=12)
            .map(|n| (n.to_string(), format!("span {} / span {}", n, n)))
            .chain([("full".to_string(), "1 / -1".to_string())])
            .collect();

        utilities.extend([
            Utility::scaled("grid-cols", [], prop("grid-template-columns")).extras(columns.clone()),
            Utility::scaled("grid-rows", [], prop("grid-template-rows")).extras(columns),
            Utility::scaled("col-span", [], prop("grid-column")).extras(spans.clone()),
            Utility::scaled("row-span", [], prop("grid-row")).extras(spans),
        ]);

        utilities
    })
}
