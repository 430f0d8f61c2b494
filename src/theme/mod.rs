//! design tokens and theme resolution
pub mod node;
pub mod resolve;
pub mod table;
pub mod value;

pub use {
    node::{ThemeNode, ThemeSpec},
    resolve::{ResolvedTheme, ThemeResolver},
    table::ThemeTable,
    value::{Rgb, TokenValue},
};

/// the semantic kind of a theme category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// a color
    Color,
    /// a length or other size
    Size,
    /// a font family stack
    Font,
    /// a breakpoint
    Screen,
    /// anything else (weights, shadows, z-indices, ...)
    Other,
}

/// a theme category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// `colors`
    Colors,
    /// `spacing`
    Spacing,
    /// `sizing`, extra width/height values on top of spacing
    Sizing,
    /// `screens`
    Screens,
    /// `fontFamily`
    FontFamily,
    /// `fontSize`
    FontSize,
    /// `fontWeight`
    FontWeight,
    /// `lineHeight`
    LineHeight,
    /// `letterSpacing`
    LetterSpacing,
    /// `borderRadius`
    BorderRadius,
    /// `borderWidth`
    BorderWidth,
    /// `opacity`
    Opacity,
    /// `zIndex`
    ZIndex,
    /// `boxShadow`
    BoxShadow,
    /// `maxWidth`
    MaxWidth,
}

impl Category {
    /// every category, in declaration order
    pub const ALL: [Category; 15] = [
        Self::Colors,
        Self::Spacing,
        Self::Sizing,
        Self::Screens,
        Self::FontFamily,
        Self::FontSize,
        Self::FontWeight,
        Self::LineHeight,
        Self::LetterSpacing,
        Self::BorderRadius,
        Self::BorderWidth,
        Self::Opacity,
        Self::ZIndex,
        Self::BoxShadow,
        Self::MaxWidth,
    ];

    /// the canonical config key
    pub fn key(&self) -> &'static str {
        match self {
            Self::Colors => "colors",
            Self::Spacing => "spacing",
            Self::Sizing => "sizing",
            Self::Screens => "screens",
            Self::FontFamily => "fontFamily",
            Self::FontSize => "fontSize",
            Self::FontWeight => "fontWeight",
            Self::LineHeight => "lineHeight",
            Self::LetterSpacing => "letterSpacing",
            Self::BorderRadius => "borderRadius",
            Self::BorderWidth => "borderWidth",
            Self::Opacity => "opacity",
            Self::ZIndex => "zIndex",
            Self::BoxShadow => "boxShadow",
            Self::MaxWidth => "maxWidth",
        }
    }

    /// look a category up by key
    ///
    /// case, `_` and `-` are ignored so `fontFamily`, `font_family` and
    /// `fontfamily` all name the same category. singular and plural forms
    /// are the same key too, `color` is `colors`
    pub fn from_key(key: &str) -> Option<Self> {
        let normalized: String = key
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let singular = |word: &str| word.strip_suffix('s').unwrap_or(word).to_string();

        Self::ALL.into_iter().find(|category| {
            let canonical = category.key().to_ascii_lowercase();
            canonical == normalized || singular(&canonical) == singular(&normalized)
        })
    }

    /// the semantic kind of values in this category
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Colors => ValueKind::Color,
            Self::Spacing
            | Self::Sizing
            | Self::FontSize
            | Self::LineHeight
            | Self::LetterSpacing
            | Self::BorderRadius
            | Self::BorderWidth
            | Self::MaxWidth => ValueKind::Size,
            Self::FontFamily => ValueKind::Font,
            Self::Screens => ValueKind::Screen,
            Self::FontWeight | Self::Opacity | Self::ZIndex | Self::BoxShadow => ValueKind::Other,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// a named design token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeValue<'a> {
    /// the category it lives in
    pub category: Category,
    /// its name within the category
    pub name: &'a str,
    /// its value
    pub value: &'a TokenValue,
}
