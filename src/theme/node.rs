//! the raw, user-facing theme structure
use {
    schemars::JsonSchema,
    serde::{Deserialize, Serialize},
    std::collections::BTreeMap,
};

/// a raw theme node, as written in a config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ThemeNode {
    /// a string value
    Text(String),
    /// a number value
    Number(f64),
    /// a boolean, never a valid token but accepted so it can be reported
    Flag(bool),
    /// a list (font stacks, `[size, lineHeight]` pairs)
    List(Vec<ThemeNode>),
    /// a nested table
    Table(BTreeMap<String, ThemeNode>),
}

impl ThemeNode {
    /// the node as a scalar string, if it is one
    pub fn as_scalar(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.clone()),
            Self::Number(number) if number.fract() == 0.0 && number.abs() < 1e15 => {
                Some(format!("{}", *number as i64))
            }
            Self::Number(number) => Some(number.to_string()),
            _ => None,
        }
    }

    /// the node as a table, if it is one
    pub fn as_table(&self) -> Option<&BTreeMap<String, ThemeNode>> {
        match self {
            Self::Table(table) => Some(table),
            _ => None,
        }
    }

    /// a short description of the node's shape, for error messages
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Text(_) => "a string",
            Self::Number(_) => "a number",
            Self::Flag(_) => "a boolean",
            Self::List(_) => "a list",
            Self::Table(_) => "a table",
        }
    }
}

impl From<&str> for ThemeNode {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ThemeNode {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for ThemeNode {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Vec<&str>> for ThemeNode {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(ThemeNode::from).collect())
    }
}

impl<const N: usize> From<[(&str, &str); N]> for ThemeNode {
    fn from(entries: [(&str, &str); N]) -> Self {
        Self::Table(
            entries
                .into_iter()
                .map(|(name, value)| (name.to_string(), ThemeNode::from(value)))
                .collect(),
        )
    }
}

/// the `theme` section of a configuration
///
/// top-level keys name categories that replace the base category wholesale,
/// the `extend` key holds categories merged into the base one name by name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ThemeSpec(pub BTreeMap<String, ThemeNode>);

impl ThemeSpec {
    /// the key holding additive extensions
    pub const EXTEND: &'static str = "extend";

    /// make an empty spec
    pub fn new() -> Self {
        Self::default()
    }

    /// add an extension value, `category.name = value`
    pub fn extend(mut self, category: &str, name: &str, value: impl Into<ThemeNode>) -> Self {
        let extend = self
            .0
            .entry(Self::EXTEND.to_string())
            .or_insert_with(|| ThemeNode::Table(BTreeMap::new()));

        if let ThemeNode::Table(categories) = extend {
            let entry = categories
                .entry(category.to_string())
                .or_insert_with(|| ThemeNode::Table(BTreeMap::new()));

            if let ThemeNode::Table(values) = entry {
                values.insert(name.to_string(), value.into());
            }
        }

        self
    }

    /// replace a whole category
    pub fn replace(mut self, category: &str, values: impl Into<ThemeNode>) -> Self {
        self.0.insert(category.to_string(), values.into());
        self
    }

    /// the `extend` node, if any
    pub fn extension(&self) -> Option<&ThemeNode> {
        self.0
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(Self::EXTEND))
            .map(|(_, node)| node)
    }

    /// the category overrides, everything but `extend`
    pub fn overrides(&self) -> impl Iterator<Item = (&String, &ThemeNode)> {
        self.0
            .iter()
            .filter(|(key, _)| !key.eq_ignore_ascii_case(Self::EXTEND))
    }

    /// whether the spec changes nothing
    pub fn is_empty(&self) -> bool {
        self.overrides().next().is_none()
            && self
                .extension()
                .and_then(ThemeNode::as_table)
                .is_none_or(|table| table.is_empty())
    }
}
