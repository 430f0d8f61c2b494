//! flattened theme token tables
use {
    crate::{
        diagnostics::Warning,
        error::{ConfigurationError, Result},
        theme::{Category, ThemeNode, ThemeSpec, ThemeValue, TokenValue, ValueKind},
    },
    std::collections::BTreeMap,
};

/// the name a nested `DEFAULT` key collapses into at the top of a category
pub const DEFAULT_NAME: &str = "DEFAULT";

/// the embedded base theme
const BASE_THEME: &str = include_str!("../../resources/base_theme.toml");

/// a flattened token table: category -> name -> value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeTable {
    /// the tokens, ordered for deterministic iteration
    categories: BTreeMap<Category, BTreeMap<String, TokenValue>>,
}

impl ThemeTable {
    /// make an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// load the embedded base theme
    pub fn base() -> Result<Self> {
        let spec: ThemeSpec = toml::from_str(BASE_THEME)?;
        let mut warnings = Vec::new();
        let table = Self::from_categories(&spec, &mut warnings)?;

        if let Some(warning) = warnings.first() {
            return Err(ConfigurationError::MalformedTheme(format!(
                "embedded base theme is invalid, this is a bug: {}",
                warning
            ))
            .into());
        }

        Ok(table)
    }

    /// build a table from a spec whose top-level keys are all categories
    pub fn from_categories(spec: &ThemeSpec, warnings: &mut Vec<Warning>) -> Result<Self> {
        let mut table = Self::new();

        for (key, node) in &spec.0 {
            let Some(category) = Category::from_key(key) else {
                warnings.push(Warning::UnknownThemeCategory { key: key.clone() });
                continue;
            };

            table.replace(category, flatten_category(category, key, node, warnings)?);
        }

        Ok(table)
    }

    /// replace a whole category
    pub fn replace(&mut self, category: Category, values: BTreeMap<String, TokenValue>) {
        self.categories.insert(category, values);
    }

    /// merge values into a category, overriding names that already exist
    pub fn merge(&mut self, category: Category, values: BTreeMap<String, TokenValue>) {
        self.categories.entry(category).or_default().extend(values);
    }

    /// insert a single value
    pub fn insert(&mut self, category: Category, name: impl Into<String>, value: TokenValue) {
        self.categories
            .entry(category)
            .or_default()
            .insert(name.into(), value);
    }

    /// look a value up
    pub fn get(&self, category: Category, name: &str) -> Option<&TokenValue> {
        self.categories.get(&category)?.get(name)
    }

    /// iterate over the values of a category, ordered by name
    pub fn scale(&self, category: Category) -> impl Iterator<Item = ThemeValue<'_>> {
        self.categories
            .get(&category)
            .into_iter()
            .flat_map(move |values| {
                values.iter().map(move |(name, value)| ThemeValue {
                    category,
                    name,
                    value,
                })
            })
    }

    /// the number of values in a category
    pub fn len(&self, category: Category) -> usize {
        self.categories.get(&category).map_or(0, BTreeMap::len)
    }

    /// whether the table holds no values at all
    pub fn is_empty(&self) -> bool {
        self.categories.values().all(BTreeMap::is_empty)
    }

    /// the breakpoints, ordered by their min-width
    ///
    /// values without a parseable width sort last, ties are broken by name
    pub fn screens(&self) -> Vec<(String, String)> {
        let mut screens: Vec<(String, String)> = self
            .scale(Category::Screens)
            .map(|v| (v.name.to_string(), v.value.css()))
            .collect();

        screens.sort_by(|(a_name, a_value), (b_name, b_value)| {
            let a_px = min_width_px(a_value).unwrap_or(f64::INFINITY);
            let b_px = min_width_px(b_value).unwrap_or(f64::INFINITY);
            a_px.total_cmp(&b_px).then_with(|| a_name.cmp(b_name))
        });

        screens
    }
}

/// convert a breakpoint width to pixels
fn min_width_px(value: &str) -> Option<f64> {
    let value = value.trim();
    let split = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(value.len());
    let number: f64 = value[..split].parse().ok()?;

    match &value[split..] {
        "px" | "" => Some(number),
        "rem" | "em" => Some(number * 16.0),
        _ => None,
    }
}

/// flatten a category node into `name -> value` entries
///
/// nested tables join their keys with `-`, a `DEFAULT` key names its parent
pub fn flatten_category(
    category: Category,
    key: &str,
    node: &ThemeNode,
    warnings: &mut Vec<Warning>,
) -> Result<BTreeMap<String, TokenValue>> {
    let Some(table) = node.as_table() else {
        return Err(ConfigurationError::MalformedTheme(format!(
            "`{}` must be a table, found {}",
            key,
            node.shape()
        ))
        .into());
    };

    let mut out = BTreeMap::new();
    for (name, child) in table {
        flatten_into(category, key, &normalize_name(None, name), child, &mut out, warnings);
    }

    Ok(out)
}

/// join a nested name onto its parent
fn normalize_name(parent: Option<&str>, name: &str) -> String {
    let is_default = name.eq_ignore_ascii_case(DEFAULT_NAME);

    match (parent, is_default) {
        (None, true) => DEFAULT_NAME.to_string(),
        (None, false) => name.to_string(),
        (Some(parent), true) => parent.to_string(),
        (Some(parent), false) => format!("{}-{}", parent, name),
    }
}

/// recursive half of [`flatten_category`]
fn flatten_into(
    category: Category,
    key: &str,
    name: &str,
    node: &ThemeNode,
    out: &mut BTreeMap<String, TokenValue>,
    warnings: &mut Vec<Warning>,
) {
    let ignored = |reason: &str| Warning::IgnoredThemeValue {
        category: key.to_string(),
        name: name.to_string(),
        reason: reason.to_string(),
    };

    match node {
        ThemeNode::Table(children) => {
            for (child_name, child) in children {
                let joined = normalize_name(Some(name), child_name);
                flatten_into(category, key, &joined, child, out, warnings);
            }
        }
        ThemeNode::List(items) => match list_value(category, items) {
            Some(value) => {
                out.insert(name.to_string(), value);
            }
            None => warnings.push(ignored("lists may only hold strings and numbers")),
        },
        ThemeNode::Flag(_) => warnings.push(ignored("booleans are not valid theme values")),
        scalar => {
            if let Some(literal) = scalar.as_scalar() {
                out.insert(name.to_string(), scalar_value(category, literal));
            }
        }
    }
}

/// interpret a scalar for a category
fn scalar_value(category: Category, literal: String) -> TokenValue {
    match category.kind() {
        ValueKind::Color => TokenValue::color(literal),
        ValueKind::Font => TokenValue::FontStack(
            literal
                .split(',')
                .map(|family| family.trim().to_string())
                .filter(|family| !family.is_empty())
                .collect(),
        ),
        _ if category == Category::FontSize => TokenValue::FontSize {
            size: literal,
            line_height: None,
        },
        _ => TokenValue::Literal(literal),
    }
}

/// interpret a list for a category
fn list_value(category: Category, items: &[ThemeNode]) -> Option<TokenValue> {
    match category {
        Category::FontSize => {
            let size = items.first()?.as_scalar()?;
            let line_height = match items.get(1) {
                None => None,
                Some(ThemeNode::Table(options)) => options
                    .iter()
                    .find(|(k, _)| Category::from_key(k) == Some(Category::LineHeight))
                    .and_then(|(_, v)| v.as_scalar()),
                Some(other) => Some(other.as_scalar()?),
            };
            Some(TokenValue::FontSize { size, line_height })
        }
        _ => {
            let parts: Option<Vec<String>> = items.iter().map(ThemeNode::as_scalar).collect();
            let parts = parts?;

            match category.kind() {
                ValueKind::Font => Some(TokenValue::FontStack(parts)),
                ValueKind::Color => Some(TokenValue::color(parts.join(", "))),
                _ => Some(TokenValue::Literal(parts.join(", "))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_theme_loads() {
        let base = ThemeTable::base().unwrap();

        assert_eq!(
            base.get(Category::Spacing, "4"),
            Some(&TokenValue::literal("1rem"))
        );
        assert_eq!(base.get(Category::Colors, "blue-500").unwrap().css(), "#3b82f6");
        assert_eq!(
            base.get(Category::FontSize, "lg").unwrap().line_height(),
            Some("1.75rem")
        );
        assert!(matches!(
            base.get(Category::FontFamily, "sans"),
            Some(TokenValue::FontStack(_))
        ));
        assert_eq!(base.get(Category::BorderRadius, DEFAULT_NAME).unwrap().css(), "0.25rem");
    }

    #[test]
    fn test_screens_sorted_by_width() {
        let base = ThemeTable::base().unwrap();
        let names: Vec<String> = base.screens().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["sm", "md", "lg", "xl", "2xl"]);
    }

    #[test]
    fn test_nested_default_flattens_to_parent() {
        let spec: ThemeSpec = toml::from_str(
            r##"
            [colors.blue]
            DEFAULT = "#00e"
            500 = "#00f"
            "##,
        )
        .unwrap();

        let mut warnings = Vec::new();
        let table = ThemeTable::from_categories(&spec, &mut warnings).unwrap();

        assert!(warnings.is_empty());
        assert_eq!(table.get(Category::Colors, "blue").unwrap().css(), "#00e");
        assert_eq!(table.get(Category::Colors, "blue-500").unwrap().css(), "#00f");
    }

    #[test]
    fn test_non_table_category_is_malformed() {
        let spec = ThemeSpec::new().replace("colors", "red");
        let mut warnings = Vec::new();
        let err = ThemeTable::from_categories(&spec, &mut warnings).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_boolean_value_is_ignored_with_warning() {
        let spec: ThemeSpec = toml::from_str("[opacity]\nhalf = true\nquarter = 0.25").unwrap();
        let mut warnings = Vec::new();
        let table = ThemeTable::from_categories(&spec, &mut warnings).unwrap();

        assert_eq!(warnings.len(), 1);
        assert_eq!(table.len(Category::Opacity), 1);
        assert_eq!(table.get(Category::Opacity, "quarter").unwrap().css(), "0.25");
    }

    #[test]
    fn test_min_width_px() {
        assert_eq!(min_width_px("640px"), Some(640.0));
        assert_eq!(min_width_px("48rem"), Some(768.0));
        assert_eq!(min_width_px("wide"), None);
    }
}
