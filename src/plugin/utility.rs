//! utility generators
use {
    crate::{
        rule::{Declaration, Layer},
        theme::{Category, TokenValue},
    },
    std::{collections::BTreeMap, fmt, sync::Arc},
};

/// turns a resolved value into declarations
pub type ValueFn = Arc<dyn Fn(&TokenValue) -> Vec<Declaration> + Send + Sync>;

/// the kind of arbitrary value a functional utility accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueHint {
    /// anything
    #[default]
    Any,
    /// colors
    Color,
    /// lengths and other sizes
    Length,
    /// unitless numbers
    Number,
}

impl ValueHint {
    /// parse an explicit type hint, as in `text-[color:var(--x)]`
    pub fn from_hint(hint: &str) -> Option<Self> {
        match hint {
            "color" => Some(Self::Color),
            "length" | "size" | "percentage" => Some(Self::Length),
            "number" => Some(Self::Number),
            "any" => Some(Self::Any),
            _ => None,
        }
    }

    /// guess what an arbitrary value is, `None` when it could be anything
    pub fn infer(value: &str) -> Option<Self> {
        let lower = value.trim().to_ascii_lowercase();

        if lower.starts_with('#')
            || ["rgb(", "rgba(", "hsl(", "hsla(", "oklch(", "oklab(", "color-mix("]
                .iter()
                .any(|f| lower.starts_with(f))
        {
            return Some(Self::Color);
        }

        if lower.parse::<f64>().is_ok() {
            return Some(Self::Number);
        }

        if lower.starts_with(|c: char| c.is_ascii_digit() || c == '.' || c == '-')
            || ["calc(", "clamp(", "min(", "max("]
                .iter()
                .any(|f| lower.starts_with(f))
        {
            return Some(Self::Length);
        }

        None
    }

    /// whether a utility with this hint takes a value of kind `value`
    pub fn accepts(&self, value: Option<ValueHint>) -> bool {
        match (self, value) {
            (Self::Any, _) | (_, None) => true,
            (Self::Length, Some(Self::Number)) => true,
            (hint, Some(kind)) => *hint == kind,
        }
    }
}

/// how a functional utility finds its values
#[derive(Clone)]
pub struct ValueRule {
    /// the class root, `bg` in `bg-blue-500`
    pub root: String,
    /// theme categories searched in order
    pub scales: Vec<Category>,
    /// values that only this utility knows, searched after the scales
    pub extras: BTreeMap<String, String>,
    /// what kind of arbitrary value the utility takes
    pub hint: ValueHint,
    /// whether a leading `-` negates the value
    pub negative: bool,
    /// the declaration generator
    pub generate: ValueFn,
}

impl fmt::Debug for ValueRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueRule")
            .field("root", &self.root)
            .field("scales", &self.scales)
            .field("extras", &self.extras)
            .field("hint", &self.hint)
            .field("negative", &self.negative)
            .finish_non_exhaustive()
    }
}

impl ValueRule {
    /// look a named value up in the scales, then in the extras
    pub fn lookup(&self, theme: &crate::theme::ThemeTable, name: &str) -> Option<TokenValue> {
        self.scales
            .iter()
            .find_map(|category| theme.get(*category, name).cloned())
            .or_else(|| {
                self.extras.get(name).map(|literal| match self.hint {
                    ValueHint::Color => TokenValue::color(literal.as_str()),
                    _ => TokenValue::literal(literal.as_str()),
                })
            })
    }

    /// whether values come from a color scale
    pub fn is_color(&self) -> bool {
        self.hint == ValueHint::Color
            || self
                .scales
                .iter()
                .any(|c| c.kind() == crate::theme::ValueKind::Color)
    }
}

/// what a utility generates
#[derive(Debug, Clone)]
pub enum UtilityKind {
    /// a fixed class name with fixed declarations
    Static(Vec<Declaration>),
    /// a class root followed by a theme or arbitrary value
    Functional(ValueRule),
}

/// a named utility generator
#[derive(Debug, Clone)]
pub struct Utility {
    /// the registry name, the full class for static utilities
    name: String,
    /// what it generates
    kind: UtilityKind,
    /// the layer its rules land in
    layer: Layer,
    /// appended to the class selector, e.g. `> :not([hidden]) ~ :not([hidden])`
    selector_suffix: Option<String>,
}

impl Utility {
    /// a static utility
    pub fn fixed(name: impl Into<String>, declarations: Vec<Declaration>) -> Self {
        Self {
            name: name.into(),
            kind: UtilityKind::Static(declarations),
            layer: Layer::Utilities,
            selector_suffix: None,
        }
    }

    /// a functional utility named after its root
    pub fn scaled<F>(root: &str, scales: impl IntoIterator<Item = Category>, generate: F) -> Self
    where
        F: Fn(&TokenValue) -> Vec<Declaration> + Send + Sync + 'static,
    {
        Self::scaled_as(root, root, scales, generate)
    }

    /// a functional utility with a registry name distinct from its root
    ///
    /// several utilities can share a root (`text-lg` and `text-red-500`), the
    /// name tells them apart in the registry
    pub fn scaled_as<F>(
        name: &str,
        root: &str,
        scales: impl IntoIterator<Item = Category>,
        generate: F,
    ) -> Self
    where
        F: Fn(&TokenValue) -> Vec<Declaration> + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            kind: UtilityKind::Functional(ValueRule {
                root: root.to_string(),
                scales: scales.into_iter().collect(),
                extras: BTreeMap::new(),
                hint: ValueHint::Any,
                negative: false,
                generate: Arc::new(generate),
            }),
            layer: Layer::Utilities,
            selector_suffix: None,
        }
    }

    /// allow negative values
    pub fn negative(mut self) -> Self {
        if let UtilityKind::Functional(rule) = &mut self.kind {
            rule.negative = true;
        }
        self
    }

    /// set the arbitrary value hint
    pub fn hint(mut self, hint: ValueHint) -> Self {
        if let UtilityKind::Functional(rule) = &mut self.kind {
            rule.hint = hint;
        }
        self
    }

    /// add utility-local values
    pub fn extras<K, V>(mut self, values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        if let UtilityKind::Functional(rule) = &mut self.kind {
            rule.extras
                .extend(values.into_iter().map(|(k, v)| (k.into(), v.into())));
        }
        self
    }

    /// set the layer
    pub fn layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    /// set the selector suffix
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.selector_suffix = Some(suffix.into());
        self
    }

    /// the registry name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// what it generates
    pub fn kind(&self) -> &UtilityKind {
        &self.kind
    }

    /// the value rule of a functional utility
    pub fn value_rule(&self) -> Option<&ValueRule> {
        match &self.kind {
            UtilityKind::Functional(rule) => Some(rule),
            UtilityKind::Static(_) => None,
        }
    }

    /// the layer
    pub fn rule_layer(&self) -> Layer {
        self.layer
    }

    /// the selector suffix
    pub fn selector_suffix(&self) -> Option<&str> {
        self.selector_suffix.as_deref()
    }

    /// check the utility is well formed
    pub fn check(&self) -> Result<(), String> {
        if self.name.is_empty() || self.name.contains(char::is_whitespace) {
            return Err(format!("utility name `{}` must be non-empty without whitespace", self.name));
        }

        match &self.kind {
            UtilityKind::Static(declarations) => {
                if declarations.is_empty() {
                    return Err(format!("static utility `{}` has no declarations", self.name));
                }
                if let Some(d) = declarations.iter().find(|d| d.property.trim().is_empty()) {
                    return Err(format!(
                        "static utility `{}` has a declaration without a property (value `{}`)",
                        self.name, d.value
                    ));
                }
            }
            UtilityKind::Functional(rule) => {
                if rule.root.is_empty()
                    || rule.root.contains(|c: char| c.is_whitespace() || matches!(c, '[' | ']' | ':' | '/'))
                {
                    return Err(format!(
                        "utility `{}` has an invalid root `{}`",
                        self.name, rule.root
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{rule::decls, theme::ThemeTable},
    };

    #[test]
    fn test_infer_hint() {
        assert_eq!(ValueHint::infer("#fff"), Some(ValueHint::Color));
        assert_eq!(ValueHint::infer("rgb(0 0 0)"), Some(ValueHint::Color));
        assert_eq!(ValueHint::infer("2rem"), Some(ValueHint::Length));
        assert_eq!(ValueHint::infer("calc(100% - 1rem)"), Some(ValueHint::Length));
        assert_eq!(ValueHint::infer("0.5"), Some(ValueHint::Number));
        assert_eq!(ValueHint::infer("var(--x)"), None);
    }

    #[test]
    fn test_hint_acceptance() {
        assert!(ValueHint::Color.accepts(Some(ValueHint::Color)));
        assert!(!ValueHint::Color.accepts(Some(ValueHint::Length)));
        assert!(ValueHint::Length.accepts(Some(ValueHint::Number)));
        assert!(ValueHint::Color.accepts(None));
        assert!(ValueHint::Any.accepts(Some(ValueHint::Length)));
    }

    #[test]
    fn test_lookup_scales_then_extras() {
        let mut theme = ThemeTable::new();
        theme.insert(Category::Spacing, "4", TokenValue::literal("1rem"));

        let utility = Utility::scaled("w", [Category::Spacing], |v| decls([("width", v.css().as_str())]))
            .extras([("screen", "100vw"), ("4", "ignored")]);
        let rule = utility.value_rule().unwrap();

        assert_eq!(rule.lookup(&theme, "4"), Some(TokenValue::literal("1rem")));
        assert_eq!(rule.lookup(&theme, "screen"), Some(TokenValue::literal("100vw")));
        assert_eq!(rule.lookup(&theme, "nope"), None);
    }

    #[test]
    fn test_check_shapes() {
        assert!(Utility::fixed("flex", decls([("display", "flex")])).check().is_ok());
        assert!(Utility::fixed("flex", Vec::new()).check().is_err());
        assert!(Utility::fixed("", decls([("display", "flex")])).check().is_err());
        assert!(
            Utility::scaled("bg:x", [Category::Colors], |_| Vec::new())
                .check()
                .is_err()
        );
    }
}
