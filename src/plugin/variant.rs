//! variant transformations
use {
    crate::rule::UtilityRule,
    schemars::JsonSchema,
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// how a variant wraps a rule
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VariantKind {
    /// append a pseudo-class or pseudo-element, `:hover`
    Suffix(String),
    /// nest under an ancestor selector, `.dark`
    Ancestor(String),
    /// wrap in an at-rule, `@media (min-width: 640px)`
    AtRule(String),
    /// rewrite the selector, `&` is the current selector, `.group:hover &`
    Template(String),
}

/// a named wrapping transformation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variant {
    /// the prefix name, `hover` in `hover:underline`
    name: String,
    /// what it does to a rule
    kind: VariantKind,
}

impl Variant {
    /// make a variant
    pub fn new(name: impl Into<String>, kind: VariantKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// a pseudo-class variant
    pub fn suffix(name: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self::new(name, VariantKind::Suffix(suffix.into()))
    }

    /// an at-rule variant
    pub fn at_rule(name: impl Into<String>, at_rule: impl Into<String>) -> Self {
        Self::new(name, VariantKind::AtRule(at_rule.into()))
    }

    /// an ancestor variant
    pub fn ancestor(name: impl Into<String>, ancestor: impl Into<String>) -> Self {
        Self::new(name, VariantKind::Ancestor(ancestor.into()))
    }

    /// a selector template variant
    pub fn template(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self::new(name, VariantKind::Template(template.into()))
    }

    /// the prefix name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// what it does
    pub fn kind(&self) -> &VariantKind {
        &self.kind
    }

    /// wrap a rule
    pub fn apply(&self, rule: UtilityRule) -> UtilityRule {
        self.kind.apply(rule)
    }

    /// check the variant is well formed
    pub fn check(&self, separator: char) -> Result<(), String> {
        if self.name.is_empty()
            || self
                .name
                .contains(|c: char| c.is_whitespace() || c == separator || c == '[' || c == ']')
        {
            return Err(format!("invalid variant name `{}`", self.name));
        }

        match &self.kind {
            VariantKind::AtRule(at_rule) if !at_rule.starts_with('@') => Err(format!(
                "variant `{}` has an at-rule that doesn't start with `@`: {}",
                self.name, at_rule
            )),
            VariantKind::Template(template) if !template.contains('&') => Err(format!(
                "variant `{}` has a selector template without `&`: {}",
                self.name, template
            )),
            VariantKind::Suffix(s) | VariantKind::Ancestor(s) if s.trim().is_empty() => {
                Err(format!("variant `{}` has an empty selector", self.name))
            }
            _ => Ok(()),
        }
    }
}

impl VariantKind {
    /// wrap a rule
    pub fn apply(&self, rule: UtilityRule) -> UtilityRule {
        match self {
            Self::Suffix(suffix) => rule.with_suffix(suffix),
            Self::Ancestor(ancestor) => rule.with_ancestor(ancestor),
            Self::AtRule(at_rule) => rule.with_at_rule(at_rule.as_str()),
            Self::Template(template) => rule.with_template(template),
        }
    }

    /// parse an arbitrary variant body, `&>*` or `@supports(display:grid)`
    ///
    /// underscores become spaces
    pub fn arbitrary(body: &str) -> Option<Self> {
        let body = body.replace('_', " ");
        let body = body.trim();

        if body.starts_with('@') {
            Some(Self::AtRule(body.to_string()))
        } else if body.contains('&') {
            Some(Self::Template(body.to_string()))
        } else {
            None
        }
    }
}

/// how the `dark` variant is expressed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DarkMode {
    /// `@media (prefers-color-scheme: dark)`
    #[default]
    Media,
    /// a `.dark` ancestor
    Class,
    /// a custom ancestor selector
    Selector(String),
}

impl DarkMode {
    /// the variant kind implementing this mode
    pub fn variant_kind(&self) -> VariantKind {
        match self {
            Self::Media => VariantKind::AtRule("@media (prefers-color-scheme: dark)".to_string()),
            Self::Class => VariantKind::Ancestor(".dark".to_string()),
            Self::Selector(selector) => VariantKind::Ancestor(selector.clone()),
        }
    }
}

impl fmt::Display for DarkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Media => f.write_str("media"),
            Self::Class => f.write_str("class"),
            Self::Selector(selector) => write!(f, "selector ({})", selector),
        }
    }
}

/// build-level options variant plugins read
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VariantOptions {
    /// how `dark` is expressed
    pub dark_mode: DarkMode,
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::rule::{Layer, decls},
    };

    fn rule() -> UtilityRule {
        UtilityRule::new(".x", decls([("color", "red")]), Layer::Utilities)
    }

    #[test]
    fn test_apply_kinds() {
        assert_eq!(Variant::suffix("hover", ":hover").apply(rule()).selector(), ".x:hover");
        assert_eq!(
            Variant::template("group-hover", ".group:hover &")
                .apply(rule())
                .selector(),
            ".group:hover .x"
        );
        assert_eq!(
            Variant::at_rule("print", "@media print").apply(rule()).at_rules(),
            &["@media print".to_string()]
        );
    }

    #[test]
    fn test_dark_mode_kinds() {
        assert_eq!(
            DarkMode::Class.variant_kind(),
            VariantKind::Ancestor(".dark".to_string())
        );
        assert!(matches!(DarkMode::Media.variant_kind(), VariantKind::AtRule(_)));
        assert_eq!(
            DarkMode::Selector("[data-theme=dark]".to_string())
                .variant_kind()
                .apply(rule())
                .selector(),
            "[data-theme=dark] .x"
        );
    }

    #[test]
    fn test_arbitrary_variants() {
        assert_eq!(
            VariantKind::arbitrary("&>*"),
            Some(VariantKind::Template("&>*".to_string()))
        );
        assert_eq!(
            VariantKind::arbitrary("@supports_(display:grid)"),
            Some(VariantKind::AtRule("@supports (display:grid)".to_string()))
        );
        assert_eq!(VariantKind::arbitrary("hover"), None);
    }

    #[test]
    fn test_check() {
        assert!(Variant::suffix("hover", ":hover").check(':').is_ok());
        assert!(Variant::suffix("a:b", ":hover").check(':').is_err());
        assert!(Variant::at_rule("md", "(min-width: 1px)").check(':').is_err());
        assert!(Variant::template("peer", ".peer ~").check(':').is_err());
    }
}
