//! Style token substitution.
//!
//! Registry sources carry canonical style tokens (`STYLE_RADIUS`,
//! `STYLE_FOCUS_RING`, ...) wherever a value varies by visual style. A
//! style map resolves each token to the concrete value of one style, and
//! the transform replaces tokens at identifier boundaries in a single
//! text pass. Tokens absent from the map pass through untouched, so a
//! style that has not defined every token degrades gracefully.
//!
//! The pass is deliberately structure-blind: it looks only at token
//! boundaries, never at surrounding syntax, so it can run before or after
//! the structural transforms without interfering with them. Substituted
//! values never match the canonical pattern, which makes a second
//! application with the same map a no-op.

use crate::error::{KitbagError, Result};
use regex::Regex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Canonical style tokens: `STYLE_` followed by upper-case segments.
static STYLE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bSTYLE_[A-Z0-9][A-Z0-9_]*\b").unwrap());

/// Canonical-token -> concrete-value table for one visual style.
#[derive(Debug, Clone, Default)]
pub struct StyleMap {
    entries: HashMap<String, String>,
}

impl StyleMap {
    /// Parse a style map from its declaration text.
    ///
    /// The format is stylesheet-like: one `TOKEN: value;` declaration per
    /// line, `/* ... */` comments, blank lines ignored. `label` names the
    /// source in parse errors (a file path or an embedded-asset name).
    pub fn parse(label: &str, source: &str) -> Result<Self> {
        let mut entries = HashMap::new();
        let mut in_comment = false;

        for (lineno, raw_line) in source.lines().enumerate() {
            let line = strip_comments(raw_line, &mut in_comment);
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let parse_err = |message: String| KitbagError::ConfigParseError {
                path: PathBuf::from(label),
                message: format!("line {}: {}", lineno + 1, message),
            };

            let body = line
                .strip_suffix(';')
                .ok_or_else(|| parse_err("declaration must end with ';'".to_string()))?;

            let (token, value) = body
                .split_once(':')
                .ok_or_else(|| parse_err("expected 'TOKEN: value;'".to_string()))?;
            let (token, value) = (token.trim(), value.trim());

            if !token_is_canonical(token) {
                return Err(parse_err(format!(
                    "'{}' is not a canonical style token (expected STYLE_UPPER_CASE)",
                    token
                )));
            }

            // A value containing a canonical token would make the pass
            // non-idempotent; refuse the map instead of looping forever.
            if STYLE_TOKEN.is_match(value) {
                return Err(parse_err(format!(
                    "value for {} reintroduces a canonical token",
                    token
                )));
            }

            if entries.insert(token.to_string(), value.to_string()).is_some() {
                return Err(parse_err(format!("duplicate declaration for {}", token)));
            }
        }

        Ok(Self { entries })
    }

    /// Build a map directly from pairs (used by tests).
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up the concrete value for a canonical token.
    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    /// Number of mapped tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map defines no tokens.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace every mapped canonical token in `source`.
    pub fn apply(&self, source: &str) -> String {
        if self.entries.is_empty() {
            return source.to_string();
        }

        STYLE_TOKEN
            .replace_all(source, |caps: &regex::Captures<'_>| {
                let token = &caps[0];
                self.get(token).unwrap_or(token).to_string()
            })
            .into_owned()
    }
}

/// Whether `token` is exactly one canonical style token.
fn token_is_canonical(token: &str) -> bool {
    STYLE_TOKEN
        .find(token)
        .is_some_and(|m| m.as_str() == token)
}

/// Drop `/* ... */` comment spans from one line, tracking multi-line state.
fn strip_comments(line: &str, in_comment: &mut bool) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    loop {
        if *in_comment {
            match rest.find("*/") {
                Some(end) => {
                    *in_comment = false;
                    rest = &rest[end + 2..];
                }
                None => return out,
            }
        } else {
            match rest.find("/*") {
                Some(start) => {
                    out.push_str(&rest[..start]);
                    *in_comment = true;
                    rest = &rest[start + 2..];
                }
                None => {
                    out.push_str(rest);
                    return out;
                }
            }
        }
    }
}
