//! turning class tokens into rules
pub mod candidate;

use {
    crate::{
        plugin::{PluginRegistry, UtilityKind, ValueHint, ValueRule, VariantKind},
        rule::{Declaration, Layer, UtilityRule, class_selector},
        scan::{ClassToken, TokenSet},
        theme::{Category, ResolvedTheme, TokenValue, table::DEFAULT_NAME, value::format_number},
    },
    candidate::{
        Candidate, bracketed, decode_arbitrary, is_safe_arbitrary, root_splits, split_modifier,
    },
    schemars::JsonSchema,
    serde::{Deserialize, Serialize},
    std::fmt,
    tracing::{debug, trace},
};

/// the rank given to arbitrary variants, after every registered variant
pub const ARBITRARY_RANK: usize = usize::MAX;

/// the order given to arbitrary properties, after every registered utility
pub const ARBITRARY_ORDER: usize = usize::MAX;

/// how `!important` is applied to every generated rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Important {
    /// `true` marks every declaration, `false` leaves them alone
    Flag(bool),
    /// nest every utility under a scoping selector such as `#app`
    Scope(String),
}

impl Default for Important {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl Important {
    /// whether every declaration is marked
    pub fn is_all(&self) -> bool {
        matches!(self, Self::Flag(true))
    }

    /// the scoping selector, if any
    pub fn scope(&self) -> Option<&str> {
        match self {
            Self::Scope(scope) if !scope.trim().is_empty() => Some(scope.trim()),
            _ => None,
        }
    }
}

/// options that change how tokens are read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// the variant separator
    pub separator: char,
    /// a prefix every utility must carry
    pub prefix: Option<String>,
    /// global `!important` handling
    pub important: Important,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            separator: ':',
            prefix: None,
            important: Important::default(),
        }
    }
}

/// a rule generated from a token, with what the output needs to order it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedRule {
    /// the rule
    pub rule: UtilityRule,
    /// the ranks of the applied variants, highest first
    pub variant_ranks: Vec<usize>,
    /// the registration order of the matched utility
    pub order: usize,
    /// the token the rule came from
    pub token: String,
}

/// what a base expression matched
struct Matched<'r> {
    /// the declarations
    declarations: Vec<Declaration>,
    /// the layer to emit in
    layer: Layer,
    /// a selector suffix from the utility
    suffix: Option<&'r str>,
    /// the registration order
    order: usize,
}

/// generates rules from tokens, borrowing the build's theme and registry
pub struct Generator<'a> {
    /// the resolved theme
    theme: &'a ResolvedTheme,
    /// the composed plugins
    registry: &'a PluginRegistry,
    /// the options
    options: &'a GeneratorOptions,
}

impl fmt::Debug for Generator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("utilities", &self.registry.utility_count())
            .field("variants", &self.registry.variant_count())
            .field("options", &self.options)
            .finish()
    }
}

impl<'a> Generator<'a> {
    /// make a generator
    pub fn new(
        theme: &'a ResolvedTheme,
        registry: &'a PluginRegistry,
        options: &'a GeneratorOptions,
    ) -> Self {
        Self {
            theme,
            registry,
            options,
        }
    }

    /// generate the rules for every token, skipping the ones that match nothing
    pub fn generate_all(&self, tokens: &TokenSet) -> Vec<GeneratedRule> {
        let rules: Vec<GeneratedRule> = tokens.iter().filter_map(|t| self.generate(t)).collect();

        debug!(
            "Generated {} rules from {} tokens",
            rules.len(),
            tokens.len()
        );

        rules
    }

    /// generate the rule for one token
    pub fn generate(&self, token: &ClassToken) -> Option<GeneratedRule> {
        let generated = self.try_generate(token.as_str());
        if generated.is_none() {
            trace!("Skipped token {}", token);
        }
        generated
    }

    /// the actual matching
    fn try_generate(&self, token: &str) -> Option<GeneratedRule> {
        let candidate =
            candidate::parse(token, self.options.separator, self.options.prefix.as_deref())?;

        let variants = candidate
            .variants
            .iter()
            .map(|name| self.variant(name))
            .collect::<Option<Vec<(VariantKind, usize)>>>()?;

        let matched = self.match_base(&candidate)?;

        let mut rule = UtilityRule::new(class_selector(token), matched.declarations, matched.layer);

        for (kind, _) in variants.iter().rev() {
            rule = kind.apply(rule);
        }

        if let Some(suffix) = matched.suffix {
            rule = rule.with_suffix(suffix);
        }

        if candidate.important || self.options.important.is_all() {
            rule = rule.all_important();
        }

        if let Some(scope) = self.options.important.scope() {
            rule = rule.scoped(scope);
        }

        let mut variant_ranks: Vec<usize> = variants.iter().map(|(_, rank)| *rank).collect();
        variant_ranks.sort_unstable_by(|a, b| b.cmp(a));

        Some(GeneratedRule {
            rule,
            variant_ranks,
            order: matched.order,
            token: token.to_string(),
        })
    }

    /// resolve a variant prefix, registered or arbitrary
    fn variant(&self, name: &str) -> Option<(VariantKind, usize)> {
        if let Some(body) = bracketed(name) {
            if !is_safe_arbitrary(body) {
                return None;
            }
            return VariantKind::arbitrary(body).map(|kind| (kind, ARBITRARY_RANK));
        }

        self.registry
            .variant(name)
            .map(|registered| (registered.variant.kind().clone(), registered.rank))
    }

    /// match a base expression: static, then theme values, then arbitrary values
    fn match_base(&self, candidate: &Candidate<'_>) -> Option<Matched<'a>> {
        let base = candidate.base;
        let negative = candidate.negative;

        if !negative && let Some(registered) = self.registry.static_utility(base) {
            let UtilityKind::Static(declarations) = registered.utility.kind() else {
                return None;
            };

            return Some(Matched {
                declarations: declarations.clone(),
                layer: registered.utility.rule_layer(),
                suffix: registered.utility.selector_suffix(),
                order: registered.order,
            });
        }

        let bare = std::iter::once((base, DEFAULT_NAME));

        for (root, value) in bare.chain(root_splits(base)) {
            if value.starts_with('[') {
                continue;
            }

            for registered in self.registry.candidates(root) {
                let Some(rule) = registered.utility.value_rule() else {
                    continue;
                };
                if negative && !rule.negative {
                    continue;
                }

                if let Some(resolved) = self.named_value(rule, value, negative) {
                    return Some(Matched {
                        declarations: (rule.generate)(&resolved),
                        layer: registered.utility.rule_layer(),
                        suffix: registered.utility.selector_suffix(),
                        order: registered.order,
                    });
                }
            }
        }

        if !negative && let Some(matched) = self.arbitrary_property(base) {
            return Some(matched);
        }

        for (root, value) in root_splits(base) {
            let (raw, modifier) = split_modifier(value);
            let Some(inner) = bracketed(raw) else {
                continue;
            };

            for registered in self.registry.candidates(root) {
                let Some(rule) = registered.utility.value_rule() else {
                    continue;
                };
                if negative && !rule.negative {
                    continue;
                }

                if let Some(resolved) = self.arbitrary_value(rule, inner, modifier, negative) {
                    return Some(Matched {
                        declarations: (rule.generate)(&resolved),
                        layer: registered.utility.rule_layer(),
                        suffix: registered.utility.selector_suffix(),
                        order: registered.order,
                    });
                }
            }
        }

        None
    }

    /// look a named value up, applying an opacity modifier and negation
    fn named_value(&self, rule: &ValueRule, value: &str, negative: bool) -> Option<TokenValue> {
        let resolved = match rule.lookup(self.theme, value) {
            Some(resolved) => resolved,
            None => {
                let (name, modifier) = split_modifier(value);
                let modifier = modifier?;
                if !rule.is_color() {
                    return None;
                }
                let color = rule.lookup(self.theme, name)?;
                color.with_alpha(&self.alpha(modifier)?)?
            }
        };

        if negative { resolved.negated() } else { Some(resolved) }
    }

    /// build a value from `[...]`, honoring type hints
    fn arbitrary_value(
        &self,
        rule: &ValueRule,
        inner: &str,
        modifier: Option<&str>,
        negative: bool,
    ) -> Option<TokenValue> {
        let (explicit, literal) = match inner.split_once(':') {
            Some((hint, rest)) if hint.chars().all(|c| c.is_ascii_lowercase() || c == '-') => {
                (Some(ValueHint::from_hint(hint)?), rest)
            }
            _ => (None, inner),
        };

        let literal = decode_arbitrary(literal);
        if !is_safe_arbitrary(&literal) {
            return None;
        }
        let kind = explicit.or_else(|| ValueHint::infer(&literal));

        if !rule.hint.accepts(kind) {
            return None;
        }

        let value = if rule.is_color() || kind == Some(ValueHint::Color) {
            TokenValue::color(literal)
        } else {
            TokenValue::literal(literal)
        };

        let value = match modifier {
            Some(modifier) => value.with_alpha(&self.alpha(modifier)?)?,
            None => value,
        };

        if negative { value.negated() } else { Some(value) }
    }

    /// `[mask-type:luminance]`
    fn arbitrary_property(&self, base: &str) -> Option<Matched<'a>> {
        let inner = bracketed(base)?;
        let (property, value) = inner.split_once(':')?;

        let property_ok = !property.is_empty()
            && property
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        let value = decode_arbitrary(value);
        if !property_ok || value.trim().is_empty() || !is_safe_arbitrary(&value) {
            return None;
        }

        Some(Matched {
            declarations: vec![Declaration::new(property, value)],
            layer: Layer::Utilities,
            suffix: None,
            order: ARBITRARY_ORDER,
        })
    }

    /// turn an opacity modifier into a number between 0 and 1
    fn alpha(&self, modifier: &str) -> Option<String> {
        if let Some(inner) = bracketed(modifier) {
            let alpha: f64 = inner.trim().parse().ok()?;
            return (0.0..=1.0).contains(&alpha).then(|| format_number(alpha));
        }

        if let Some(value) = self.theme.get(Category::Opacity, modifier) {
            return Some(value.css());
        }

        let percent: f64 = modifier.parse().ok()?;
        (0.0..=100.0)
            .contains(&percent)
            .then(|| format_number(percent / 100.0))
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            plugin::{PluginCatalog, VariantOptions},
            theme::ThemeTable,
        },
    };

    struct Fixture {
        theme: ResolvedTheme,
        registry: PluginRegistry,
    }

    fn fixture(options: &VariantOptions) -> Fixture {
        let theme: ResolvedTheme = ThemeTable::base().unwrap().into();
        let plugins = PluginCatalog::new().core();
        let (registry, _) = PluginRegistry::compose(&plugins, &theme, options, ':').unwrap();
        Fixture { theme, registry }
    }

    fn render(options: &GeneratorOptions, token: &str) -> Option<GeneratedRule> {
        let fixture = fixture(&VariantOptions::default());
        Generator::new(&fixture.theme, &fixture.registry, options).generate(&ClassToken::new(token))
    }

    fn one(token: &str) -> GeneratedRule {
        render(&GeneratorOptions::default(), token).unwrap()
    }

    fn declarations(generated: &GeneratedRule) -> Vec<String> {
        generated
            .rule
            .declarations()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_static_utility() {
        let flex = one("flex");
        assert_eq!(flex.rule.selector(), ".flex");
        assert_eq!(declarations(&flex), vec!["display: flex"]);
        assert!(flex.variant_ranks.is_empty());
    }

    #[test]
    fn test_theme_lookup() {
        assert_eq!(declarations(&one("p-4")), vec!["padding: 1rem"]);
        assert_eq!(declarations(&one("bg-blue-500")), vec!["background-color: #3b82f6"]);
        assert_eq!(
            declarations(&one("text-lg")),
            vec!["font-size: 1.125rem", "line-height: 1.75rem"]
        );
        assert_eq!(declarations(&one("text-red-500")).len(), 1);
        assert_eq!(declarations(&one("w-1/2")), vec!["width: 50%"]);
        assert_eq!(one("w-1/2").rule.selector(), ".w-1\\/2");
    }

    #[test]
    fn test_bare_root_uses_default() {
        assert_eq!(declarations(&one("rounded")), vec!["border-radius: 0.25rem"]);
        assert_eq!(declarations(&one("border")), vec!["border-width: 1px"]);
        assert_eq!(declarations(&one("border-t-2")), vec!["border-top-width: 2px"]);
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(declarations(&one("-m-4")), vec!["margin: -1rem"]);
        assert_eq!(one("-m-4").rule.selector(), ".-m-4");
        assert!(render(&GeneratorOptions::default(), "-p-4").is_none());
        assert!(render(&GeneratorOptions::default(), "-flex").is_none());
    }

    #[test]
    fn test_opacity_modifier() {
        assert_eq!(
            declarations(&one("bg-blue-500/50")),
            vec!["background-color: rgb(59 130 246 / 0.5)"]
        );
        assert_eq!(
            declarations(&one("text-white/[0.37]")),
            vec!["color: rgb(255 255 255 / 0.37)"]
        );
        assert!(render(&GeneratorOptions::default(), "p-4/50").is_none());
    }

    #[test]
    fn test_arbitrary_values() {
        assert_eq!(
            declarations(&one("w-[calc(100%_-_1rem)]")),
            vec!["width: calc(100% - 1rem)"]
        );
        assert_eq!(declarations(&one("bg-[#123456]")), vec!["background-color: #123456"]);
        assert_eq!(declarations(&one("text-[2rem]")), vec!["font-size: 2rem"]);
        assert_eq!(declarations(&one("text-[#fff]")), vec!["color: #fff"]);
        assert_eq!(
            declarations(&one("text-[color:var(--brand)]")),
            vec!["color: var(--brand)"]
        );
        assert_eq!(declarations(&one("-mt-[3px]")), vec!["margin-top: -3px"]);
        assert_eq!(
            declarations(&one("grid-cols-[200px_1fr]")),
            vec!["grid-template-columns: 200px 1fr"]
        );
    }

    #[test]
    fn test_arbitrary_property() {
        let rule = one("[mask-type:luminance]");
        assert_eq!(declarations(&rule), vec!["mask-type: luminance"]);
        assert_eq!(rule.order, ARBITRARY_ORDER);
        assert!(render(&GeneratorOptions::default(), "[Mask:x]").is_none());
    }

    #[test]
    fn test_arbitrary_text_cannot_leave_its_rule() {
        let options = GeneratorOptions::default();

        assert!(render(&options, "w-[1px}body{color:red]").is_none());
        assert!(render(&options, "p-[1px;color:blue]").is_none());
        assert!(render(&options, "[color:red;background:blue]").is_none());
        assert!(render(&options, "[&{}]:flex").is_none());
        assert!(render(&options, "[@media_print{a{color:red}}]:flex").is_none());
        assert_eq!(
            declarations(&one("bg-[url('a;b.png')]")),
            vec!["background-color: url('a;b.png')"]
        );
    }

    #[test]
    fn test_static_beats_parametric() {
        // `flex-1` is a static utility even though `flex` could be read as a root
        assert_eq!(declarations(&one("flex-1")), vec!["flex: 1 1 0%"]);
    }

    #[test]
    fn test_variant_nesting_order() {
        let rule = one("hover:focus:underline");
        assert_eq!(rule.rule.selector(), ".hover\\:focus\\:underline:focus:hover");

        let responsive = one("md:dark:bg-black");
        assert_eq!(
            responsive.rule.at_rules(),
            &[
                "@media (min-width: 768px)".to_string(),
                "@media (prefers-color-scheme: dark)".to_string()
            ]
        );
        assert_eq!(responsive.variant_ranks.len(), 2);
        assert!(responsive.variant_ranks[0] > responsive.variant_ranks[1]);
    }

    #[test]
    fn test_unknown_variant_skips_token() {
        assert!(render(&GeneratorOptions::default(), "wobble:flex").is_none());
        assert!(render(&GeneratorOptions::default(), "not-a-utility").is_none());
    }

    #[test]
    fn test_arbitrary_variants() {
        let child = one("[&>*]:p-4");
        assert_eq!(child.rule.selector(), ".\\[\\&\\>\\*\\]\\:p-4>*");
        assert_eq!(child.variant_ranks, vec![ARBITRARY_RANK]);

        let supports = one("[@supports_(display:grid)]:grid");
        assert_eq!(supports.rule.at_rules(), &["@supports (display:grid)".to_string()]);
    }

    #[test]
    fn test_space_between_suffix_after_variants() {
        let rule = one("hover:space-x-4");
        assert_eq!(
            rule.rule.selector(),
            ".hover\\:space-x-4:hover > :not([hidden]) ~ :not([hidden])"
        );
    }

    #[test]
    fn test_important() {
        let marked = one("!p-4");
        assert_eq!(declarations(&marked), vec!["padding: 1rem !important"]);

        let global = GeneratorOptions {
            important: Important::Flag(true),
            ..GeneratorOptions::default()
        };
        assert!(render(&global, "p-4").unwrap().rule.declarations()[0].important);

        let scoped = GeneratorOptions {
            important: Important::Scope("#app".to_string()),
            ..GeneratorOptions::default()
        };
        let rule = render(&scoped, "hover:p-4").unwrap();
        assert_eq!(rule.rule.selector(), "#app .hover\\:p-4:hover");
        assert!(!rule.rule.declarations()[0].important);
    }

    #[test]
    fn test_prefix() {
        let options = GeneratorOptions {
            prefix: Some("tw-".to_string()),
            ..GeneratorOptions::default()
        };

        let rule = render(&options, "hover:tw-p-4").unwrap();
        assert_eq!(rule.rule.selector(), ".hover\\:tw-p-4:hover");
        assert!(render(&options, "p-4").is_none());
        assert_eq!(declarations(&render(&options, "-tw-m-2").unwrap()), vec!["margin: -0.5rem"]);
    }

    #[test]
    fn test_dark_class_mode() {
        let fixture = fixture(&VariantOptions {
            dark_mode: crate::plugin::DarkMode::Class,
        });
        let options = GeneratorOptions::default();
        let generator = Generator::new(&fixture.theme, &fixture.registry, &options);

        let rule = generator.generate(&ClassToken::new("dark:bg-black")).unwrap();
        assert_eq!(rule.rule.selector(), ".dark .dark\\:bg-black");
        assert!(rule.rule.at_rules().is_empty());
    }

    #[test]
    fn test_generate_all_drops_unmatched() {
        let fixture = fixture(&VariantOptions::default());
        let options = GeneratorOptions::default();
        let generator = Generator::new(&fixture.theme, &fixture.registry, &options);

        let tokens: TokenSet = ["flex", "div", "class", "p-4", "hover:nope"]
            .into_iter()
            .map(ClassToken::from)
            .collect();

        let tokens: Vec<String> = generator
            .generate_all(&tokens)
            .into_iter()
            .map(|g| g.token)
            .collect();
        assert_eq!(tokens, vec!["flex", "p-4"]);
    }
}
