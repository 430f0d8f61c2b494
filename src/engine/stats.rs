//! build statistics
use std::{fmt, time::Duration};

/// numbers about a finished build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// files read
    pub files: usize,
    /// bytes read
    pub bytes: u64,
    /// distinct candidate tokens
    pub tokens: usize,
    /// rules in the stylesheet
    pub rules: usize,
    /// time spent resolving the theme and composing plugins
    pub prepare: Duration,
    /// time spent scanning
    pub scan: Duration,
    /// time spent generating and assembling
    pub generate: Duration,
}

impl BuildStats {
    /// the total time
    pub fn total(&self) -> Duration {
        self.prepare + self.scan + self.generate
    }
}

impl fmt::Display for BuildStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rules from {} tokens in {} files ({} bytes), took {:.2?} (scan {:.2?}, generate {:.2?})",
            self.rules,
            self.tokens,
            self.files,
            self.bytes,
            self.total(),
            self.scan,
            self.generate
        )
    }
}
