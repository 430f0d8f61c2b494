//! splitting class tokens into variants, modifiers and a base expression

/// a token split into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<'t> {
    /// variant prefixes, outermost first as written
    pub variants: Vec<&'t str>,
    /// whether the base was marked `!`
    pub important: bool,
    /// whether the base was marked `-`
    pub negative: bool,
    /// the base expression with markers and prefix removed
    pub base: &'t str,
}

/// split `text` on `separator` wherever it isn't nested in brackets or parentheses
pub fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;

    for (idx, c) in text.char_indices() {
        match c {
            '[' | '(' => depth += 1,
            ']' | ')' => depth -= 1,
            c if c == separator && depth == 0 => {
                parts.push(&text[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }

    parts.push(&text[start..]);
    parts
}

/// the byte offsets of every `c` outside brackets
pub fn top_level_positions(text: &str, target: char) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut depth = 0i32;

    for (idx, c) in text.char_indices() {
        match c {
            '[' | '(' => depth += 1,
            ']' | ')' => depth -= 1,
            c if c == target && depth == 0 => positions.push(idx),
            _ => {}
        }
    }

    positions
}

/// parse a token, `None` when it can't be a utility at all
///
/// the markers come in the order `!`, `-`, prefix, so with a `tw-` prefix a
/// negative important margin is `!-tw-m-4`. a trailing `!` also marks the
/// base important
pub fn parse<'t>(token: &'t str, separator: char, prefix: Option<&str>) -> Option<Candidate<'t>> {
    let mut parts = split_top_level(token, separator);
    let base = parts.pop()?;

    if parts.iter().any(|variant| variant.is_empty()) {
        return None;
    }

    let (important, base) = match (base.strip_prefix('!'), base.strip_suffix('!')) {
        (Some(rest), _) => (true, rest),
        (None, Some(rest)) => (true, rest),
        (None, None) => (false, base),
    };

    let (negative, base) = match base.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, base),
    };

    let base = match prefix.filter(|p| !p.is_empty()) {
        Some(prefix) => base.strip_prefix(prefix)?,
        None => base,
    };

    if base.is_empty() || base.starts_with('-') {
        return None;
    }

    Some(Candidate {
        variants: parts,
        important,
        negative,
        base,
    })
}

/// the `(root, value)` splits of a base expression, longest root first
///
/// only dashes outside brackets split, so `w-[calc(100%-1rem)]` only splits
/// after `w`
pub fn root_splits(base: &str) -> impl Iterator<Item = (&str, &str)> {
    top_level_positions(base, '-')
        .into_iter()
        .rev()
        .map(move |idx| (&base[..idx], &base[idx + 1..]))
        .filter(|(root, value)| !root.is_empty() && !value.is_empty())
}

/// split an opacity modifier off a value, `blue-500/50` or `[#123]/[0.3]`
pub fn split_modifier(value: &str) -> (&str, Option<&str>) {
    match top_level_positions(value, '/').last() {
        Some(&idx) if idx + 1 < value.len() => (&value[..idx], Some(&value[idx + 1..])),
        _ => (value, None),
    }
}

/// the inside of a `[...]` value
pub fn bracketed(value: &str) -> Option<&str> {
    value
        .strip_prefix('[')?
        .strip_suffix(']')
        .filter(|inner| !inner.trim().is_empty())
}

/// whether arbitrary text can go into a rule without ending it
///
/// braces are never allowed, a `;` only inside quotes, brackets or parentheses
pub fn is_safe_arbitrary(text: &str) -> bool {
    let mut depth = 0i32;
    let mut quote = None;

    for c in text.chars() {
        match (quote, c) {
            (_, '{' | '}') => return false,
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '[' | '(') => depth += 1,
            (None, ']' | ')') => depth -= 1,
            (None, ';') if depth <= 0 => return false,
            _ => {}
        }

        if depth < 0 {
            return false;
        }
    }

    quote.is_none() && depth == 0
}

/// decode an arbitrary value, `_` becomes a space and `\_` a literal underscore
pub fn decode_arbitrary(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'_') => {
                out.push('_');
                chars.next();
            }
            '_' => out.push(' '),
            c => out.push(c),
        }
    }

    out
}
