//! font and text utilities
use {
    super::{prop, statics},
    crate::{
        plugin::{Plugin, Utility, ValueHint},
        rule::{Declaration, decls},
        theme::{Category, TokenValue},
    },
};

/// a font size and its paired line height
fn font_size(value: &TokenValue) -> Vec<Declaration> {
    let mut declarations = vec![Declaration::new("font-size", value.css())];
    if let Some(line_height) = value.line_height() {
        declarations.push(Declaration::new("line-height", line_height));
    }
    declarations
}

/// the `typography` plugin
pub fn plugin() -> Plugin {
    Plugin::new("typography").utilities(|_| {
        let mut utilities = vec![
            Utility::scaled_as("font-family", "font", [Category::FontFamily], prop("font-family")),
            Utility::scaled_as("font-weight", "font", [Category::FontWeight], prop("font-weight"))
                .hint(ValueHint::Number),
            Utility::scaled_as("font-size", "text", [Category::FontSize], font_size)
                .hint(ValueHint::Length),
            Utility::scaled("leading", [Category::LineHeight], prop("line-height")),
            Utility::scaled("tracking", [Category::LetterSpacing], prop("letter-spacing"))
                .hint(ValueHint::Length)
                .negative(),
        ];

        utilities.extend(statics(
            "text-align",
            [
                ("text-left", "left"),
                ("text-center", "center"),
                ("text-right", "right"),
                ("text-justify", "justify"),
            ],
        ));
        utilities.extend(statics(
            "font-style",
            [("italic", "italic"), ("not-italic", "normal")],
        ));
        utilities.extend(statics(
            "text-decoration-line",
            [
                ("underline", "underline"),
                ("overline", "overline"),
                ("line-through", "line-through"),
                ("no-underline", "none"),
            ],
        ));
        utilities.extend(statics(
            "text-transform",
            [
                ("uppercase", "uppercase"),
                ("lowercase", "lowercase"),
                ("capitalize", "capitalize"),
                ("normal-case", "none"),
            ],
        ));
        utilities.extend(statics(
            "white-space",
            [
                ("whitespace-normal", "normal"),
                ("whitespace-nowrap", "nowrap"),
                ("whitespace-pre", "pre"),
                ("whitespace-pre-line", "pre-line"),
                ("whitespace-pre-wrap", "pre-wrap"),
            ],
        ));
        utilities.push(Utility::fixed(
            "truncate",
            decls([
                ("overflow", "hidden"),
                ("text-overflow", "ellipsis"),
                ("white-space", "nowrap"),
            ]),
        ));
        utilities.push(Utility::fixed(
            "break-words",
            decls([("overflow-wrap", "break-word")]),
        ));
        utilities.push(Utility::fixed(
            "antialiased",
            decls([
                ("-webkit-font-smoothing", "antialiased"),
                ("-moz-osx-font-smoothing", "grayscale"),
            ]),
        ));

        utilities
    })
}
