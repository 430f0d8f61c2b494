//! element resets
use crate::{
    plugin::Plugin,
    rule::{Declaration, Layer, UtilityRule, decls},
    theme::{Category, ResolvedTheme},
};

/// the font stack used when the theme has no `sans` family
const FALLBACK_SANS: &str = "ui-sans-serif, system-ui, sans-serif";

/// the reset rules
fn rules(theme: &ResolvedTheme) -> Vec<UtilityRule> {
    let sans = theme
        .get(Category::FontFamily, "sans")
        .map(|value| value.css())
        .unwrap_or_else(|| FALLBACK_SANS.to_string());

    let base = |selector: &str, declarations: Vec<Declaration>| {
        UtilityRule::new(selector, declarations, Layer::Base)
    };

    vec![
        base(
            "*, ::before, ::after",
            decls([
                ("box-sizing", "border-box"),
                ("border-width", "0"),
                ("border-style", "solid"),
                ("border-color", "currentColor"),
            ]),
        ),
        base(
            "html",
            vec![
                Declaration::new("line-height", "1.5"),
                Declaration::new("-webkit-text-size-adjust", "100%"),
                Declaration::new("tab-size", "4"),
                Declaration::new("font-family", sans),
            ],
        ),
        base("body", decls([("margin", "0"), ("line-height", "inherit")])),
        base(
            "h1, h2, h3, h4, h5, h6",
            decls([("font-size", "inherit"), ("font-weight", "inherit")]),
        ),
        base(
            "a",
            decls([("color", "inherit"), ("text-decoration", "inherit")]),
        ),
        base(
            "img, svg, video, canvas",
            decls([("display", "block"), ("vertical-align", "middle")]),
        ),
        base("img, video", decls([("max-width", "100%"), ("height", "auto")])),
        base(
            "button, input, select, textarea",
            decls([
                ("font-family", "inherit"),
                ("font-size", "100%"),
                ("color", "inherit"),
                ("margin", "0"),
                ("padding", "0"),
            ]),
        ),
        base("[hidden]", decls([("display", "none")])),
    ]
}

/// the `preflight` plugin
pub fn plugin() -> Plugin {
    Plugin::new("preflight").base(rules)
}
