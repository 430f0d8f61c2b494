//! non-fatal build diagnostics
use {
    std::{fmt, path::PathBuf},
    thiserror::Error,
};

/// which kind of name a plugin shadowed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShadowKind {
    /// a utility name
    Utility,
    /// a variant name
    Variant,
}

impl fmt::Display for ShadowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utility => f.write_str("utility"),
            Self::Variant => f.write_str("variant"),
        }
    }
}

/// a recoverable problem found during a build
///
/// warnings never end up in the generated css, they're returned next to it
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Error)]
pub enum Warning {
    /// a resolved file couldn't be read
    #[error("could not read {}: {reason}", .path.display())]
    UnreadableSource {
        /// the file path
        path: PathBuf,
        /// why it couldn't be read
        reason: String,
    },

    /// a file was larger than the configured limit
    #[error("skipped {} ({size} bytes is over the {limit} byte limit)", .path.display())]
    OversizedSource {
        /// the file path
        path: PathBuf,
        /// the file size in bytes
        size: u64,
        /// the limit in bytes
        limit: u64,
    },

    /// a content glob matched nothing
    #[error("content pattern `{pattern}` matched no files")]
    UnmatchedGlob {
        /// the pattern
        pattern: String,
    },

    /// a theme key that isn't a known category
    #[error("unknown theme category `{key}` ignored")]
    UnknownThemeCategory {
        /// the key as written
        key: String,
    },

    /// a theme value that couldn't be interpreted
    #[error("ignored theme value `{category}.{name}`: {reason}")]
    IgnoredThemeValue {
        /// the category key
        category: String,
        /// the value name
        name: String,
        /// why it was ignored
        reason: String,
    },

    /// a later plugin replaced a name registered by an earlier one
    #[error("{kind} `{name}` from plugin `{shadowed}` is shadowed by plugin `{by}`")]
    PluginShadow {
        /// utility or variant
        kind: ShadowKind,
        /// the shadowed name
        name: String,
        /// the plugin that registered it first
        shadowed: String,
        /// the plugin that replaced it
        by: String,
    },
}

impl Warning {
    /// whether the warning concerns a content source
    pub fn is_source_warning(&self) -> bool {
        matches!(
            self,
            Self::UnreadableSource { .. } | Self::OversizedSource { .. } | Self::UnmatchedGlob { .. }
        )
    }

    /// whether the warning is a plugin shadow event
    pub fn is_shadow(&self) -> bool {
        matches!(self, Self::PluginShadow { .. })
    }
}

/// the warnings collected over one build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// the collected warnings, in the order they were reported
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// make an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// record a warning
    pub fn push(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    /// record several warnings
    pub fn extend(&mut self, warnings: impl IntoIterator<Item = Warning>) {
        self.warnings.extend(warnings);
    }

    /// the recorded warnings
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// the number of warnings
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// iterate over the plugin shadow events
    pub fn shadows(&self) -> impl Iterator<Item = &Warning> {
        self.warnings.iter().filter(|w| w.is_shadow())
    }
}

impl IntoIterator for Diagnostics {
    type Item = Warning;
    type IntoIter = std::vec::IntoIter<Warning>;

    fn into_iter(self) -> Self::IntoIter {
        self.warnings.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_display() {
        let warning = Warning::PluginShadow {
            kind: ShadowKind::Utility,
            name: "flex".to_string(),
            shadowed: "layout".to_string(),
            by: "custom".to_string(),
        };

        assert_eq!(
            warning.to_string(),
            "utility `flex` from plugin `layout` is shadowed by plugin `custom`"
        );
        assert!(warning.is_shadow());
        assert!(!warning.is_source_warning());
    }

    #[test]
    fn test_shadow_filter() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Warning::UnmatchedGlob {
            pattern: "*.nope".to_string(),
        });
        diagnostics.push(Warning::PluginShadow {
            kind: ShadowKind::Variant,
            name: "hover".to_string(),
            shadowed: "a".to_string(),
            by: "b".to_string(),
        });

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.shadows().count(), 1);
        assert!(diagnostics.warnings()[0].is_source_warning());
    }
}
