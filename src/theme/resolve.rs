//! merging user themes into the base theme
use {
    crate::{
        diagnostics::Warning,
        error::{ConfigurationError, Result},
        theme::{Category, ThemeSpec, ThemeTable, table::flatten_category},
    },
    std::ops::Deref,
    tracing::{debug, warn},
};

/// the theme a build generates against
///
/// produced once per build by [`ThemeResolver::resolve`] and only ever
/// borrowed afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTheme(ThemeTable);

impl ResolvedTheme {
    /// the underlying table
    pub fn table(&self) -> &ThemeTable {
        &self.0
    }
}

impl Deref for ResolvedTheme {
    type Target = ThemeTable;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<ThemeTable> for ResolvedTheme {
    fn from(value: ThemeTable) -> Self {
        Self(value)
    }
}

/// resolves theme specs against a base table
#[derive(Debug, Clone)]
pub struct ThemeResolver {
    /// the base table every resolution starts from
    base: ThemeTable,
}

impl ThemeResolver {
    /// make a resolver over a custom base table
    pub fn new(base: ThemeTable) -> Self {
        Self { base }
    }

    /// make a resolver over the embedded base theme
    pub fn with_base_theme() -> Result<Self> {
        Ok(Self::new(ThemeTable::base()?))
    }

    /// the base table
    pub fn base(&self) -> &ThemeTable {
        &self.base
    }

    /// resolve a spec
    ///
    /// top-level categories replace the base category, then every category
    /// under `extend` is merged in name by name with the extension winning.
    /// categories that aren't mentioned pass through untouched
    pub fn resolve(&self, spec: &ThemeSpec) -> Result<(ResolvedTheme, Vec<Warning>)> {
        let mut table = self.base.clone();
        let mut warnings = Vec::new();

        for (key, node) in spec.overrides() {
            let Some(category) = Category::from_key(key) else {
                warnings.push(Warning::UnknownThemeCategory { key: key.clone() });
                continue;
            };

            let values = flatten_category(category, key, node, &mut warnings)?;
            debug!("Theme category {} replaced with {} values", category, values.len());
            table.replace(category, values);
        }

        if let Some(extension) = spec.extension() {
            let Some(categories) = extension.as_table() else {
                return Err(ConfigurationError::MalformedTheme(format!(
                    "`extend` must be a table, found {}",
                    extension.shape()
                ))
                .into());
            };

            for (key, node) in categories {
                let Some(category) = Category::from_key(key) else {
                    warnings.push(Warning::UnknownThemeCategory { key: key.clone() });
                    continue;
                };

                let values = flatten_category(category, key, node, &mut warnings)?;
                debug!("Theme category {} extended with {} values", category, values.len());
                table.merge(category, values);
            }
        }

        for warning in &warnings {
            warn!("{}", warning);
        }

        Ok((ResolvedTheme(table), warnings))
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::theme::TokenValue};

    fn red_base() -> ThemeResolver {
        let mut base = ThemeTable::new();
        base.insert(Category::Colors, "red", TokenValue::color("#f00"));
        base.insert(Category::Spacing, "1", TokenValue::literal("0.25rem"));
        ThemeResolver::new(base)
    }

    #[test]
    fn test_extension_overrides_and_adds() {
        let spec = ThemeSpec::new()
            .extend("colors", "red", "#e00")
            .extend("colors", "blue", "#00e");

        let (resolved, warnings) = red_base().resolve(&spec).unwrap();
        let colors: Vec<(String, String)> = resolved
            .scale(Category::Colors)
            .map(|v| (v.name.to_string(), v.value.css()))
            .collect();

        assert!(warnings.is_empty());
        assert_eq!(
            colors,
            vec![
                ("blue".to_string(), "#00e".to_string()),
                ("red".to_string(), "#e00".to_string())
            ]
        );
    }

    #[test]
    fn test_singular_color_key_merges() {
        let spec = ThemeSpec::new()
            .extend("color", "red", "#e00")
            .extend("color", "blue", "#00e");

        let (resolved, warnings) = red_base().resolve(&spec).unwrap();

        assert!(warnings.is_empty());
        assert_eq!(
            resolved.get(Category::Colors, "red").map(TokenValue::css),
            Some("#e00".to_string())
        );
        assert_eq!(
            resolved.get(Category::Colors, "blue").map(TokenValue::css),
            Some("#00e".to_string())
        );
        assert_eq!(resolved.len(Category::Colors), 2);
    }

    #[test]
    fn test_untouched_categories_pass_through() {
        let spec = ThemeSpec::new().extend("colors", "blue", "#00e");
        let (resolved, _) = red_base().resolve(&spec).unwrap();

        assert_eq!(
            resolved.get(Category::Spacing, "1"),
            Some(&TokenValue::literal("0.25rem"))
        );
    }

    #[test]
    fn test_empty_spec_is_identity() {
        let resolver = red_base();
        let (resolved, warnings) = resolver.resolve(&ThemeSpec::new()).unwrap();

        assert!(warnings.is_empty());
        assert_eq!(resolved.table(), resolver.base());
    }

    #[test]
    fn test_top_level_category_replaces() {
        let spec = ThemeSpec::new()
            .replace("colors", [("green", "#0f0")])
            .extend("colors", "blue", "#00e");
        let (resolved, _) = red_base().resolve(&spec).unwrap();

        assert!(resolved.get(Category::Colors, "red").is_none());
        assert!(resolved.get(Category::Colors, "green").is_some());
        assert!(resolved.get(Category::Colors, "blue").is_some());
    }

    #[test]
    fn test_unknown_extension_category_warns() {
        let spec = ThemeSpec::new()
            .extend("gradients", "sunset", "linear-gradient(red, blue)")
            .extend("colors", "blue", "#00e");
        let (resolved, warnings) = red_base().resolve(&spec).unwrap();

        assert_eq!(
            warnings,
            vec![Warning::UnknownThemeCategory {
                key: "gradients".to_string()
            }]
        );
        assert!(resolved.get(Category::Colors, "blue").is_some());
    }

    #[test]
    fn test_malformed_extend_is_fatal() {
        let spec = ThemeSpec::new().replace("extend", "nope");
        let err = red_base().resolve(&spec).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let spec = ThemeSpec::new()
            .extend("colors", "brand", "#123456")
            .extend("spacing", "18", "4.5rem");
        let resolver = ThemeResolver::with_base_theme().unwrap();

        let (first, _) = resolver.resolve(&spec).unwrap();
        let (second, _) = resolver.resolve(&spec).unwrap();
        assert_eq!(first, second);
    }
}
