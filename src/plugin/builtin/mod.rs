//! the built-in plugins
//!
//! a small catalog covering the common utilities, real projects are expected
//! to register their own plugins next to these
pub mod borders;
pub mod colors;
pub mod effects;
pub mod layout;
pub mod preflight;
pub mod sizing;
pub mod spacing;
pub mod typography;
pub mod variants;

use crate::{plugin::Utility, rule::Declaration, theme::TokenValue};

/// a generator setting one property to the value
pub fn prop(property: &'static str) -> impl Fn(&TokenValue) -> Vec<Declaration> + Send + Sync + 'static {
    move |value| vec![Declaration::new(property, value.css())]
}

/// a generator setting several properties to the same value
pub fn props<const N: usize>(
    properties: [&'static str; N],
) -> impl Fn(&TokenValue) -> Vec<Declaration> + Send + Sync + 'static {
    move |value| {
        let css = value.css();
        properties
            .iter()
            .map(|property| Declaration::new(*property, css.clone()))
            .collect()
    }
}

/// a boxed generator, lets closures of different types share one signature
pub type BoxedGen = Box<dyn Fn(&TokenValue) -> Vec<Declaration> + Send + Sync>;

/// box a generator
pub fn boxed<F>(f: F) -> BoxedGen
where
    F: Fn(&TokenValue) -> Vec<Declaration> + Send + Sync + 'static,
{
    Box::new(f)
}

/// static utilities that each set `property` to a fixed value
pub fn statics<const N: usize>(property: &str, classes: [(&str, &str); N]) -> Vec<Utility> {
    classes
        .into_iter()
        .map(|(class, value)| Utility::fixed(class, vec![Declaration::new(property, value)]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_props_share_value() {
        let generate = props(["margin-left", "margin-right"]);
        let declarations = generate(&TokenValue::literal("1rem"));

        assert_eq!(declarations.len(), 2);
        assert!(declarations.iter().all(|d| d.value == "1rem"));
    }

    #[test]
    fn test_statics() {
        let utilities = statics("display", [("block", "block"), ("hidden", "none")]);
        assert_eq!(utilities.len(), 2);
        assert_eq!(utilities[1].name(), "hidden");
    }
}
