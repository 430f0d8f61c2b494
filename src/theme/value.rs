//! theme token values

/// an rgb triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// red
    pub r: u8,
    /// green
    pub g: u8,
    /// blue
    pub b: u8,
}

impl Rgb {
    /// parse a `#rgb` or `#rrggbb` hex color
    pub fn parse_hex(input: &str) -> Option<Self> {
        let hex = input.trim().strip_prefix('#')?;

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self { r, g, b })
            }
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
                Some(Self {
                    r: r * 17,
                    g: g * 17,
                    b: b * 17,
                })
            }
            _ => None,
        }
    }
}

/// the value of a theme token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValue {
    /// a color, with its rgb triple when the literal is a hex color
    Color {
        /// the literal as written
        literal: String,
        /// the parsed triple
        rgb: Option<Rgb>,
    },
    /// any other literal value
    Literal(String),
    /// a font family stack
    FontStack(Vec<String>),
    /// a font size with an optional paired line height
    FontSize {
        /// the font size
        size: String,
        /// the line height
        line_height: Option<String>,
    },
}

impl TokenValue {
    /// make a color value, parsing the rgb triple when possible
    pub fn color(literal: impl Into<String>) -> Self {
        let literal = literal.into();
        let rgb = Rgb::parse_hex(&literal);
        Self::Color { literal, rgb }
    }

    /// make a literal value
    pub fn literal(literal: impl Into<String>) -> Self {
        Self::Literal(literal.into())
    }

    /// render the value as css
    pub fn css(&self) -> String {
        match self {
            Self::Color { literal, .. } => literal.clone(),
            Self::Literal(literal) => literal.clone(),
            Self::FontStack(families) => families.join(", "),
            Self::FontSize { size, .. } => size.clone(),
        }
    }

    /// apply an opacity modifier to a color
    ///
    /// `alpha` is a number between 0 and 1, returns `None` for non-colors or
    /// when `alpha` isn't a number
    pub fn with_alpha(&self, alpha: &str) -> Option<Self> {
        let Self::Color { literal, rgb } = self else {
            return None;
        };

        let alpha: f64 = alpha.trim().parse().ok()?;
        if !(0.0..=1.0).contains(&alpha) {
            return None;
        }

        let literal = match rgb {
            Some(Rgb { r, g, b }) => format!("rgb({} {} {} / {})", r, g, b, format_number(alpha)),
            None => format!(
                "color-mix(in srgb, {} {}%, transparent)",
                literal,
                format_number(alpha * 100.0)
            ),
        };

        Some(Self::Color { literal, rgb: *rgb })
    }

    /// negate a length, returns `None` for values that can't be negated
    pub fn negated(&self) -> Option<Self> {
        let Self::Literal(literal) = self else {
            return None;
        };

        let trimmed = literal.trim();
        if trimmed.is_empty() {
            return None;
        }

        if trimmed.trim_end_matches(|c: char| c.is_ascii_alphabetic()) == "0" {
            return Some(Self::Literal(trimmed.to_string()));
        }

        if let Some(positive) = trimmed.strip_prefix('-') {
            return Some(Self::Literal(positive.to_string()));
        }

        if trimmed.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
            return Some(Self::Literal(format!("-{}", trimmed)));
        }

        Some(Self::Literal(format!("calc({} * -1)", trimmed)))
    }

    /// the paired line height of a font size
    pub fn line_height(&self) -> Option<&str> {
        match self {
            Self::FontSize { line_height, .. } => line_height.as_deref(),
            _ => None,
        }
    }
}

/// format a float without trailing zeroes, rounded to four decimals
pub fn format_number(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    format!("{}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(
            Rgb::parse_hex("#FF0000"),
            Some(Rgb { r: 255, g: 0, b: 0 })
        );
        assert_eq!(Rgb::parse_hex("#0e0"), Some(Rgb { r: 0, g: 238, b: 0 }));
        assert_eq!(Rgb::parse_hex("#GG0000"), None);
        assert_eq!(Rgb::parse_hex("red"), None);
    }

    #[test]
    fn test_alpha_on_hex_color() {
        let value = TokenValue::color("#3b82f6").with_alpha("0.5").unwrap();
        assert_eq!(value.css(), "rgb(59 130 246 / 0.5)");
    }

    #[test]
    fn test_alpha_on_named_color() {
        let value = TokenValue::color("currentColor").with_alpha("0.25").unwrap();
        assert_eq!(
            value.css(),
            "color-mix(in srgb, currentColor 25%, transparent)"
        );
    }

    #[test]
    fn test_alpha_rejects_non_colors() {
        assert!(TokenValue::literal("1rem").with_alpha("0.5").is_none());
        assert!(TokenValue::color("#fff").with_alpha("2").is_none());
    }

    #[test]
    fn test_negation() {
        assert_eq!(
            TokenValue::literal("1rem").negated(),
            Some(TokenValue::literal("-1rem"))
        );
        assert_eq!(
            TokenValue::literal("0px").negated(),
            Some(TokenValue::literal("0px"))
        );
        assert_eq!(
            TokenValue::literal("var(--gap)").negated(),
            Some(TokenValue::literal("calc(var(--gap) * -1)"))
        );
        assert_eq!(TokenValue::color("#fff").negated(), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(50.0), "50");
        assert_eq!(format_number(0.1 * 100.0), "10");
        assert_eq!(format_number(0.375), "0.375");
    }
}
