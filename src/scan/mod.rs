//! content scanning and class token extraction
pub mod extract;
pub mod scanner;
pub mod source;

use std::{borrow::Borrow, collections::BTreeSet, fmt};

pub use {
    extract::extract_tokens,
    scanner::{ContentScanner, FsScanner, ScanOutcome},
    source::ContentSource,
};

/// a candidate class name, extracted verbatim and opaque until matched
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassToken(String);

impl ClassToken {
    /// make a token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// the token text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ClassToken {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClassToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// the distinct tokens seen in a build
///
/// a set, so the order files were read in never matters
pub type TokenSet = BTreeSet<ClassToken>;
