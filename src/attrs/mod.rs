//! Attribute normalization.
//!
//! Converts raw attribute text like `.opacity 60 .gray 80 .mark .border`
//! (the contents of a `{ ... }` group, braces stripped) into an ordered,
//! deduplicated class list: `opacity-60 gray-80 mark border`.
//!
//! Normalization is a total function: malformed input degrades to dropped
//! tokens or fallback values, never an error.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// Explicit hyphenated form, e.g. `opacity-60`.
static EXPLICIT_VALUE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_-]+)-(\d+)$").unwrap());

/// A valid class-name candidate. Rejects stray tokens like `-20`.
static CLASS_CANDIDATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$").unwrap());

/// One normalized class, optionally carrying a numeric parameter in 0..=100.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassToken {
    pub name: String,
    pub value: Option<u8>,
}

impl ClassToken {
    pub fn plain(name: impl Into<String>) -> Self {
        ClassToken {
            name: name.into(),
            value: None,
        }
    }

    pub fn with_value(name: impl Into<String>, value: u8) -> Self {
        ClassToken {
            name: name.into(),
            value: Some(value),
        }
    }

    /// The rendered class-attribute key, e.g. `mark` or `opacity-60`.
    /// Deduplication works on this key.
    pub fn render(&self) -> String {
        match self.value {
            Some(value) => format!("{}-{}", self.name, value),
            None => self.name.clone(),
        }
    }
}

/// Which class names take a numeric parameter, and the value used when the
/// parameter is missing or unusable. Injectable so new numeric classes can
/// be added without touching the normalizer.
#[derive(Debug, Clone)]
pub struct ClassConfig {
    numeric: BTreeSet<String>,
    pub fallback: u8,
}

impl ClassConfig {
    pub fn new(numeric: impl IntoIterator<Item = impl Into<String>>, fallback: u8) -> Self {
        ClassConfig {
            numeric: numeric.into_iter().map(Into::into).collect(),
            fallback,
        }
    }

    pub fn accepts_numeric(&self, name: &str) -> bool {
        self.numeric.contains(name)
    }
}

impl Default for ClassConfig {
    fn default() -> Self {
        ClassConfig::new(["opacity", "gray"], 50)
    }
}

/// Normalize attribute text into an ordered class-token sequence.
///
/// Rules:
/// - tokens split on whitespace; leading dot runs are stripped
/// - a pure-digit token with no preceding class is dropped
/// - names in the numeric set pair with a following digit token (clamped to
///   0..=100) or fall back to `config.fallback`
/// - the explicit `name-<digits>` form is accepted regardless of the set
/// - a digit token after a non-numeric class is consumed and dropped, so it
///   cannot leak to a later class
/// - invalid candidates (e.g. `-20`, `!!bad` once sanitized) are dropped,
///   also consuming a following digit token
/// - duplicates (by rendered key) keep the first occurrence
pub fn normalize(attrs: &str, config: &ClassConfig) -> Vec<ClassToken> {
    let parts: Vec<&str> = attrs.split_whitespace().collect();
    let mut out: Vec<ClassToken> = Vec::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();

    let mut i = 0;
    while i < parts.len() {
        let token = parts[i].trim_start_matches('.');
        i += 1;
        if token.is_empty() {
            continue;
        }

        // Stray number with no preceding class.
        if is_integer_token(token) {
            continue;
        }

        // Explicit hyphenated value, e.g. `opacity-60`. Accepted directly,
        // whether or not the name is in the numeric set.
        if let Some(caps) = EXPLICIT_VALUE_REGEX.captures(token) {
            let name = sanitize_name(&caps[1]);
            if name.is_empty() {
                continue;
            }
            let value = clamp_percent(&caps[2]);
            push_unique(&mut out, &mut seen, ClassToken::with_value(name, value));
            continue;
        }

        let candidate = sanitize_name(token);
        if candidate.is_empty() {
            continue;
        }
        if !CLASS_CANDIDATE_REGEX.is_match(&candidate) {
            // Noise followed by a digit token: consume the digit so it is
            // not picked up by a later numeric class.
            if next_is_integer(&parts, i) {
                i += 1;
            }
            continue;
        }

        if config.accepts_numeric(&candidate) {
            let mut value = config.fallback;
            if next_is_integer(&parts, i) {
                value = clamp_percent(parts[i]);
                i += 1;
            }
            push_unique(&mut out, &mut seen, ClassToken::with_value(candidate, value));
            continue;
        }

        // Non-numeric class: a trailing digit token is consumed and dropped.
        if next_is_integer(&parts, i) {
            i += 1;
        }
        push_unique(&mut out, &mut seen, ClassToken::plain(candidate));
    }

    out
}

/// Normalize and join into a space-separated class string using the default
/// numeric-class configuration.
pub fn attrs_to_class(attrs: &str) -> String {
    attrs_to_class_with(attrs, &ClassConfig::default())
}

/// Normalize and join with an explicit configuration.
pub fn attrs_to_class_with(attrs: &str, config: &ClassConfig) -> String {
    normalize(attrs, config)
        .iter()
        .map(ClassToken::render)
        .collect::<Vec<_>>()
        .join(" ")
}

fn push_unique(out: &mut Vec<ClassToken>, seen: &mut BTreeSet<String>, token: ClassToken) {
    if seen.insert(token.render()) {
        out.push(token);
    }
}

fn is_integer_token(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

fn next_is_integer(parts: &[&str], i: usize) -> bool {
    parts.get(i).is_some_and(|t| is_integer_token(t))
}

/// Clamp a pure-digit string to 0..=100. Values too large for u64 still
/// clamp to 100.
fn clamp_percent(digits: &str) -> u8 {
    match digits.parse::<u64>() {
        Ok(n) => n.min(100) as u8,
        Err(_) => 100,
    }
}

/// Keep only characters allowed in a CSS class segment.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}
