//! lexical class token extraction
use crate::scan::{ClassToken, TokenSet};

/// tokens longer than this are never class names (minified blobs, data urls)
pub const MAX_TOKEN_LEN: usize = 256;

/// characters that always end a token outside of brackets
fn is_boundary(c: char) -> bool {
    c.is_whitespace() || matches!(c, '"' | '\'' | '`' | '<' | '>' | '=' | '{' | '}')
}

/// punctuation trimmed off the ends of a candidate
fn is_trailing_punct(c: char) -> bool {
    matches!(c, ',' | ';')
}

/// extract every candidate token from a piece of text into `out`
///
/// two passes run over the text, a strict one where every boundary
/// character splits, and a bracket-aware one where quotes and `=` inside
/// `[...]` don't, so arbitrary values like `content-['x']` survive. the
/// content never has to be valid markup
pub fn extract_tokens(text: &str, out: &mut TokenSet) {
    for candidate in text.split(is_boundary) {
        push_candidate(candidate, out);
    }

    let mut depth = 0usize;
    let mut start = None;

    for (idx, c) in text.char_indices() {
        let splits = c.is_whitespace() || (depth == 0 && is_boundary(c));

        if splits {
            if let Some(from) = start.take() {
                push_candidate(&text[from..idx], out);
            }
            depth = 0;
            continue;
        }

        if start.is_none() {
            start = Some(idx);
        }

        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    if let Some(from) = start {
        push_candidate(&text[from..], out);
    }
}

/// extract tokens from text into a fresh set
pub fn tokens_of(text: &str) -> TokenSet {
    let mut out = TokenSet::new();
    extract_tokens(text, &mut out);
    out
}

/// filter and record one candidate, plus its trimmed form
fn push_candidate(candidate: &str, out: &mut TokenSet) {
    if candidate.is_empty()
        || candidate.len() > MAX_TOKEN_LEN
        || !candidate.chars().any(|c| c.is_ascii_alphanumeric())
    {
        return;
    }

    if !out.contains(candidate) {
        out.insert(ClassToken::new(candidate));
    }

    let trimmed = candidate.trim_matches(is_trailing_punct);
    if trimmed.len() != candidate.len() && !trimmed.is_empty() && !out.contains(trimmed) {
        out.insert(ClassToken::new(trimmed));
    }
}
