//! content source patterns
use {
    crate::error::{ConfigurationError, Result},
    globset::{Glob, GlobMatcher},
    std::{collections::BTreeSet, fmt, path::PathBuf},
};

/// characters that make a path component a glob
const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// whether a path component contains glob syntax
pub fn has_glob_meta(part: &str) -> bool {
    part.contains(GLOB_META)
}

/// where the scanner looks for class tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// files matching a glob, relative to the build root unless absolute
    Glob {
        /// the pattern as written, minus `!` and `./`
        pattern: String,
        /// whether matching files are excluded instead of included
        negated: bool,
        /// the longest leading part of the pattern without glob syntax
        base: PathBuf,
        /// the file extensions the pattern is limited to, empty if any
        extensions: BTreeSet<String>,
    },
    /// inline content that never touches the filesystem
    Raw {
        /// the content
        content: String,
        /// the extension it should be treated as
        extension: String,
    },
}

impl ContentSource {
    /// parse a glob pattern, a leading `!` negates it
    pub fn glob(pattern: impl AsRef<str>) -> Self {
        let trimmed = pattern.as_ref().trim();
        let (negated, rest) = match trimmed.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let mut pattern = rest;
        while let Some(stripped) = pattern.strip_prefix("./") {
            pattern = stripped;
        }
        let pattern = pattern.to_string();

        Self::Glob {
            base: literal_base(&pattern),
            extensions: pattern_extensions(&pattern),
            pattern,
            negated,
        }
    }

    /// inline content
    pub fn raw(content: impl Into<String>, extension: impl Into<String>) -> Self {
        Self::Raw {
            content: content.into(),
            extension: extension.into(),
        }
    }

    /// whether this is a negated glob
    pub fn is_negated(&self) -> bool {
        matches!(self, Self::Glob { negated: true, .. })
    }

    /// whether this is inline content
    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw { .. })
    }

    /// the extensions this source applies to
    pub fn extensions(&self) -> BTreeSet<String> {
        match self {
            Self::Glob { extensions, .. } => extensions.clone(),
            Self::Raw { extension, .. } => BTreeSet::from([extension.clone()]),
        }
    }

    /// whether the glob is a plain path with no glob syntax
    pub fn is_literal(&self) -> bool {
        match self {
            Self::Glob { pattern, .. } => !has_glob_meta(pattern),
            Self::Raw { .. } => false,
        }
    }

    /// compile the glob
    ///
    /// `*` never crosses a `/`, `**` does
    pub fn matcher(&self) -> Result<Option<GlobMatcher>> {
        let Self::Glob { pattern, .. } = self else {
            return Ok(None);
        };

        let glob = globset::GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|source| ConfigurationError::InvalidGlob {
                pattern: pattern.clone(),
                source,
            })?;

        Ok(Some(glob.compile_matcher()))
    }

    /// the same source with its pattern widened to everything under a directory
    pub fn into_directory(self) -> Self {
        match self {
            Self::Glob {
                pattern, negated, ..
            } => {
                let dir = pattern.trim_end_matches('/');
                Self::Glob {
                    base: PathBuf::from(dir),
                    pattern: format!("{}/**/*", dir),
                    extensions: BTreeSet::new(),
                    negated,
                }
            }
            raw => raw,
        }
    }
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Glob {
                pattern, negated, ..
            } => {
                if *negated {
                    f.write_str("!")?;
                }
                f.write_str(pattern)
            }
            Self::Raw { extension, .. } => write!(f, "<raw .{}>", extension),
        }
    }
}

impl From<&str> for ContentSource {
    fn from(value: &str) -> Self {
        Self::glob(value)
    }
}

/// check a glob compiles without keeping the matcher
pub fn validate_glob(pattern: &str) -> Result<()> {
    Glob::new(pattern.trim().trim_start_matches('!')).map_err(|source| {
        ConfigurationError::InvalidGlob {
            pattern: pattern.to_string(),
            source,
        }
    })?;
    Ok(())
}

/// the leading directories of a pattern that contain no glob syntax
///
/// a literal path's base is its parent
fn literal_base(pattern: &str) -> PathBuf {
    let parts: Vec<&str> = pattern.split('/').collect();
    let literal_len = parts
        .iter()
        .position(|part| has_glob_meta(part))
        .unwrap_or(parts.len().saturating_sub(1));

    let mut base = parts[..literal_len].join("/");
    if base.is_empty() && pattern.starts_with('/') {
        base.push('/');
    }

    PathBuf::from(base)
}

/// the extensions named by the last component, `*.{html,js}` gives both
fn pattern_extensions(pattern: &str) -> BTreeSet<String> {
    let last = pattern.rsplit('/').next().unwrap_or(pattern);

    if let Some(start) = last.rfind(".{")
        && last.ends_with('}')
    {
        return last[start + 2..last.len() - 1]
            .split(',')
            .map(|ext| ext.trim().to_string())
            .filter(|ext| !ext.is_empty() && !has_glob_meta(ext))
            .collect();
    }

    match last.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() && !has_glob_meta(ext) => BTreeSet::from([ext.to_string()]),
        _ => BTreeSet::new(),
    }
}
