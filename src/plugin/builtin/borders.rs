//! border radius, width and style utilities
use {
    super::{BoxedGen, boxed, prop, props, statics},
    crate::{
        plugin::{Plugin, Utility, ValueHint},
        rule::decls,
        theme::Category,
    },
};

/// the `borders` plugin
pub fn plugin() -> Plugin {
    Plugin::new("borders").utilities(|_| {
        let radius = |root: &str, generate: BoxedGen| {
            Utility::scaled(root, [Category::BorderRadius], generate).hint(ValueHint::Length)
        };
        let width = |name: &str, root: &str, generate: BoxedGen| {
            Utility::scaled_as(name, root, [Category::BorderWidth], generate).hint(ValueHint::Length)
        };

        let mut utilities = vec![
            radius("rounded", boxed(prop("border-radius"))),
            radius(
                "rounded-t",
                boxed(props(["border-top-left-radius", "border-top-right-radius"])),
            ),
            radius(
                "rounded-r",
                boxed(props([
                    "border-top-right-radius",
                    "border-bottom-right-radius",
                ])),
            ),
            radius(
                "rounded-b",
                boxed(props([
                    "border-bottom-right-radius",
                    "border-bottom-left-radius",
                ])),
            ),
            radius(
                "rounded-l",
                boxed(props(["border-top-left-radius", "border-bottom-left-radius"])),
            ),
            width("border-width", "border", boxed(prop("border-width"))),
            width(
                "border-x-width",
                "border-x",
                boxed(props(["border-left-width", "border-right-width"])),
            ),
            width(
                "border-y-width",
                "border-y",
                boxed(props(["border-top-width", "border-bottom-width"])),
            ),
            width("border-t-width", "border-t", boxed(prop("border-top-width"))),
            width("border-r-width", "border-r", boxed(prop("border-right-width"))),
            width("border-b-width", "border-b", boxed(prop("border-bottom-width"))),
            width("border-l-width", "border-l", boxed(prop("border-left-width"))),
        ];

        utilities.extend(statics(
            "border-style",
            [
                ("border-solid", "solid"),
                ("border-dashed", "dashed"),
                ("border-dotted", "dotted"),
                ("border-double", "double"),
                ("border-none", "none"),
            ],
        ));
        utilities.push(Utility::fixed(
            "outline-none",
            decls([("outline", "2px solid transparent"), ("outline-offset", "2px")]),
        ));

        utilities
    })
}
