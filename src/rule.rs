//! generated css rules
use std::fmt;

/// the cascade layer a rule is emitted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Layer {
    /// element resets and other unconditional base styles
    Base,
    /// multi-declaration component classes
    Components,
    /// single-purpose utility classes
    #[default]
    Utilities,
}

/// a single `property: value` pair
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Declaration {
    /// the css property
    pub property: String,
    /// the css value
    pub value: String,
    /// whether the declaration carries `!important`
    pub important: bool,
}

impl Declaration {
    /// make a new declaration
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            important: false,
        }
    }

    /// mark the declaration as `!important`
    pub fn important(mut self) -> Self {
        self.important = true;
        self
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.important {
            write!(f, "{}: {} !important", self.property, self.value)
        } else {
            write!(f, "{}: {}", self.property, self.value)
        }
    }
}

/// shorthand for building declaration lists
pub fn decls<const N: usize>(pairs: [(&str, &str); N]) -> Vec<Declaration> {
    pairs
        .into_iter()
        .map(|(property, value)| Declaration::new(property, value))
        .collect()
}

/// a generated css rule
///
/// rules never change after they're made, wrapping a rule consumes it and
/// returns a new one
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtilityRule {
    /// enclosing at-rules, outermost first
    at_rules: Vec<String>,
    /// the full selector
    selector: String,
    /// the declarations of the rule
    declarations: Vec<Declaration>,
    /// the layer the rule belongs to
    layer: Layer,
}

impl UtilityRule {
    /// make a new unwrapped rule
    pub fn new(selector: impl Into<String>, declarations: Vec<Declaration>, layer: Layer) -> Self {
        Self {
            at_rules: Vec::new(),
            selector: selector.into(),
            declarations,
            layer,
        }
    }

    /// the selector
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// the declarations
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// the enclosing at-rules, outermost first
    pub fn at_rules(&self) -> &[String] {
        &self.at_rules
    }

    /// the layer
    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// append a pseudo-class or pseudo-element to the selector
    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.selector.push_str(suffix);
        self
    }

    /// nest the selector under an ancestor selector
    pub fn with_ancestor(mut self, ancestor: &str) -> Self {
        self.selector = format!("{} {}", ancestor, self.selector);
        self
    }

    /// rewrite the selector through a template where `&` is the current selector
    pub fn with_template(mut self, template: &str) -> Self {
        self.selector = template.replace('&', &self.selector);
        self
    }

    /// wrap the rule in an at-rule, outside any existing wrappers
    pub fn with_at_rule(mut self, at_rule: impl Into<String>) -> Self {
        self.at_rules.insert(0, at_rule.into());
        self
    }

    /// nest the selector under a scoping selector, used by the `important` option
    pub fn scoped(mut self, scope: &str) -> Self {
        self.selector = format!("{} {}", scope, self.selector);
        self
    }

    /// mark every declaration `!important`
    pub fn all_important(mut self) -> Self {
        for declaration in &mut self.declarations {
            declaration.important = true;
        }
        self
    }
}

/// escape a class name so it can be used in a class selector
pub fn escape_class(class: &str) -> String {
    let mut escaped = String::with_capacity(class.len() * 2);

    for (idx, ch) in class.chars().enumerate() {
        match ch {
            '0'..='9' if idx == 0 => {
                escaped.push_str(&format!("\\{:x} ", ch as u32));
            }
            '-' if idx == 0 && class.len() == 1 => escaped.push_str("\\-"),
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => escaped.push(ch),
            ch if !ch.is_ascii() => escaped.push(ch),
            ' ' => escaped.push_str("\\ "),
            ch => {
                escaped.push('\\');
                escaped.push(ch);
            }
        }
    }

    escaped
}

/// the class selector for a token
pub fn class_selector(token: &str) -> String {
    format!(".{}", escape_class(token))
}
