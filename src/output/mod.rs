//! ordering, deduplicating and serializing rules
use {
    crate::{
        generate::GeneratedRule,
        rule::{Declaration, Layer, UtilityRule},
    },
    hashbrown::HashSet,
    schemars::JsonSchema,
    serde::{Deserialize, Serialize},
    std::fmt,
    tracing::debug,
};

/// how the stylesheet is written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// indented, one declaration per line
    #[default]
    Pretty,
    /// no optional whitespace
    Minified,
}

/// the final stylesheet of a build
///
/// only ever handed out whole, a failed build produces none
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GeneratedStylesheet {
    /// the css text
    css: String,
    /// the number of rules in it
    rules: usize,
}

impl GeneratedStylesheet {
    /// the css text
    pub fn css(&self) -> &str {
        &self.css
    }

    /// take the css text
    pub fn into_css(self) -> String {
        self.css
    }

    /// the number of rules
    pub fn rule_count(&self) -> usize {
        self.rules
    }

    /// whether no rule was emitted
    pub fn is_empty(&self) -> bool {
        self.rules == 0
    }
}

impl fmt::Display for GeneratedStylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css)
    }
}

/// where a rule sorts
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct SortKey {
    /// base, components, utilities, then anything behind a variant
    bucket: u8,
    /// variant ranks, highest first
    ranks: Vec<usize>,
    /// utility registration order
    order: usize,
    /// the source token
    token: String,
}

impl SortKey {
    /// the bucket of a layer
    fn layer_bucket(layer: Layer) -> u8 {
        match layer {
            Layer::Base => 0,
            Layer::Components => 1,
            Layer::Utilities => 2,
        }
    }

    /// the bucket for rules behind a variant
    const VARIANT_BUCKET: u8 = 3;
}

/// orders and serializes rules
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputAssembler {
    /// the serialization style
    style: OutputStyle,
}

impl OutputAssembler {
    /// make an assembler
    pub fn new(style: OutputStyle) -> Self {
        Self { style }
    }

    /// order, deduplicate and serialize
    ///
    /// the output only depends on the set of inputs, never on their order
    pub fn assemble<'r>(
        &self,
        base: impl IntoIterator<Item = &'r UtilityRule>,
        generated: Vec<GeneratedRule>,
    ) -> GeneratedStylesheet {
        let mut keyed: Vec<(SortKey, UtilityRule)> = base
            .into_iter()
            .enumerate()
            .map(|(idx, rule)| {
                (
                    SortKey {
                        bucket: SortKey::layer_bucket(rule.layer()),
                        ranks: Vec::new(),
                        order: idx,
                        token: String::new(),
                    },
                    rule.clone(),
                )
            })
            .collect();

        keyed.extend(generated.into_iter().map(|g| {
            let bucket = if g.variant_ranks.is_empty() {
                SortKey::layer_bucket(g.rule.layer())
            } else {
                SortKey::VARIANT_BUCKET
            };

            (
                SortKey {
                    bucket,
                    ranks: g.variant_ranks,
                    order: g.order,
                    token: g.token,
                },
                g.rule,
            )
        }));

        keyed.sort();

        let mut seen = HashSet::new();
        let rules: Vec<UtilityRule> = keyed
            .into_iter()
            .map(|(_, rule)| rule)
            .filter(|rule| {
                seen.insert((
                    rule.at_rules().to_vec(),
                    rule.selector().to_string(),
                    rule.declarations().to_vec(),
                ))
            })
            .collect();

        debug!("Assembled {} rules", rules.len());

        GeneratedStylesheet {
            css: self.serialize(&rules),
            rules: rules.len(),
        }
    }

    /// serialize ordered rules, adjacent rules with the same at-rules share a block
    pub fn serialize(&self, rules: &[UtilityRule]) -> String {
        let mut out = String::new();
        let mut groups: Vec<(&[String], Vec<&UtilityRule>)> = Vec::new();

        for rule in rules {
            match groups.last_mut() {
                Some((at_rules, members)) if *at_rules == rule.at_rules() => members.push(rule),
                _ => groups.push((rule.at_rules(), vec![rule])),
            }
        }

        for (idx, (at_rules, members)) in groups.iter().enumerate() {
            match self.style {
                OutputStyle::Pretty => {
                    if idx > 0 {
                        out.push('\n');
                    }
                    write_pretty_group(&mut out, at_rules, members);
                }
                OutputStyle::Minified => write_minified_group(&mut out, at_rules, members),
            }
        }

        out
    }
}

/// `property: value` with the important flag
fn pretty_declaration(declaration: &Declaration) -> String {
    format!("{};", declaration)
}

/// `property:value` with the important flag
fn minified_declaration(declaration: &Declaration) -> String {
    if declaration.important {
        format!("{}:{}!important", declaration.property, declaration.value)
    } else {
        format!("{}:{}", declaration.property, declaration.value)
    }
}

/// write one group of rules sharing their at-rules, indented
fn write_pretty_group(out: &mut String, at_rules: &[String], rules: &[&UtilityRule]) {
    for (depth, at_rule) in at_rules.iter().enumerate() {
        out.push_str(&"  ".repeat(depth));
        out.push_str(at_rule);
        out.push_str(" {\n");
    }

    let indent = "  ".repeat(at_rules.len());
    for (idx, rule) in rules.iter().enumerate() {
        if idx > 0 && at_rules.is_empty() {
            out.push('\n');
        }

        out.push_str(&indent);
        out.push_str(rule.selector());
        out.push_str(" {\n");
        for declaration in rule.declarations() {
            out.push_str(&indent);
            out.push_str("  ");
            out.push_str(&pretty_declaration(declaration));
            out.push('\n');
        }
        out.push_str(&indent);
        out.push_str("}\n");
    }

    for depth in (0..at_rules.len()).rev() {
        out.push_str(&"  ".repeat(depth));
        out.push_str("}\n");
    }
}

/// write one group of rules sharing their at-rules, without whitespace
fn write_minified_group(out: &mut String, at_rules: &[String], rules: &[&UtilityRule]) {
    for at_rule in at_rules {
        out.push_str(at_rule);
        out.push('{');
    }

    for rule in rules {
        out.push_str(rule.selector());
        out.push('{');
        let body: Vec<String> = rule.declarations().iter().map(minified_declaration).collect();
        out.push_str(&body.join(";"));
        out.push('}');
    }

    for _ in at_rules {
        out.push('}');
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::rule::decls};

    fn generated(token: &str, at_rules: &[&str], ranks: Vec<usize>, order: usize) -> GeneratedRule {
        let mut rule = UtilityRule::new(
            format!(".{}", token),
            decls([("display", "flex")]),
            Layer::Utilities,
        );
        for at_rule in at_rules.iter().rev() {
            rule = rule.with_at_rule(*at_rule);
        }

        GeneratedRule {
            rule,
            variant_ranks: ranks,
            order,
            token: token.to_string(),
        }
    }

    #[test]
    fn test_pretty_output() {
        let sheet = OutputAssembler::new(OutputStyle::Pretty).assemble(
            [],
            vec![
                generated("b", &["@media (min-width: 768px)"], vec![5], 1),
                generated("a", &[], Vec::new(), 1),
                generated("c", &["@media (min-width: 768px)"], vec![5], 2),
            ],
        );

        assert_eq!(
            sheet.css(),
            ".a {\n  display: flex;\n}\n\n@media (min-width: 768px) {\n  .b {\n    display: flex;\n  }\n  .c {\n    display: flex;\n  }\n}\n"
        );
        assert_eq!(sheet.rule_count(), 3);
    }

    #[test]
    fn test_minified_output() {
        let mut rule = generated("x", &["@media print"], vec![1], 1);
        rule.rule = rule.rule.all_important();

        let sheet = OutputAssembler::new(OutputStyle::Minified).assemble([], vec![rule]);
        assert_eq!(sheet.css(), "@media print{.x{display:flex!important}}");
    }

    #[test]
    fn test_buckets_and_ranks() {
        let base = UtilityRule::new("body", decls([("margin", "0")]), Layer::Base);
        let component = GeneratedRule {
            rule: UtilityRule::new(".btn", decls([("padding", "1rem")]), Layer::Components),
            variant_ranks: Vec::new(),
            order: 99,
            token: "btn".to_string(),
        };

        let sheet = OutputAssembler::new(OutputStyle::Minified).assemble(
            [&base],
            vec![
                generated("lg", &[], vec![9], 1),
                generated("md", &[], vec![8], 1),
                generated("md-hover", &[], vec![8, 2], 1),
                generated("plain", &[], Vec::new(), 1),
                component,
            ],
        );

        let order: Vec<&str> = sheet
            .css()
            .split('}')
            .filter(|s| !s.is_empty())
            .map(|s| s.split('{').next().unwrap())
            .collect();
        assert_eq!(order, vec!["body", ".btn", ".plain", ".md", ".md-hover", ".lg"]);
    }

    #[test]
    fn test_duplicates_collapse() {
        let base = UtilityRule::new("body", decls([("margin", "0")]), Layer::Base);
        let sheet = OutputAssembler::new(OutputStyle::Pretty).assemble([&base, &base], Vec::new());
        assert_eq!(sheet.rule_count(), 1);
    }

    #[test]
    fn test_input_order_is_irrelevant() {
        let rules = || {
            vec![
                generated("a", &[], Vec::new(), 3),
                generated("b", &["@media print"], vec![4], 1),
                generated("c", &[], Vec::new(), 1),
            ]
        };
        let mut reversed = rules();
        reversed.reverse();

        let assembler = OutputAssembler::default();
        assert_eq!(assembler.assemble([], rules()), assembler.assemble([], reversed));
    }

    #[test]
    fn test_empty() {
        let sheet = OutputAssembler::default().assemble([], Vec::new());
        assert!(sheet.is_empty());
        assert_eq!(sheet.css(), "");
    }
}
