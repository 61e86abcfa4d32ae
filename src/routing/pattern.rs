//! Route pattern compilation.
//!
//! # Responsibilities
//! - Anchor every top-level alternation branch as `^branch$`
//! - Expand `[:params:]` / `[:named:]` placeholders into numbered named groups
//! - Match a normalized path and collect the captured parameters
//!
//! # Design Decisions
//! - Compiled once when the route is configured, immutable afterwards
//! - Alternation is split only at depth zero, outside character classes, so
//!   `a/(b|c)` keeps its group intact
//! - Placeholders match non-greedily; captured text is not regex-escaped
//!
//! ```text
//! test/[:params:]/named/[:named:]
//!     → ^test/[:params:]/named/[:named:]$
//!     → ^test/(?P<params1>.+?)/named/(?P<named1>.+?)$
//! ```

use regex::Regex;

use crate::error::{RouterError, RouterResult};
use crate::routing::params::RouteParams;

/// Positional placeholder token.
pub const PARAMS_TOKEN: &str = "[:params:]";
/// Key/value placeholder token.
pub const NAMED_TOKEN: &str = "[:named:]";
/// Reserved pattern literal of the catch-all route. Never matched positionally.
pub const NOT_FOUND_PATTERN: &str = "404RouteNotFound";

const PARAMS_GROUP: &str = "params";
const NAMED_GROUP: &str = "named";

/// A route pattern ready for matching.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    anchored: String,
    regex: Regex,
}

impl CompiledPattern {
    /// Anchor, expand and compile a raw route pattern.
    pub fn compile(raw: &str) -> RouterResult<Self> {
        let anchored = anchor(raw);
        let expanded = expand_placeholders(&anchored);
        let regex = Regex::new(&expanded).map_err(|source| RouterError::InvalidPattern {
            pattern: raw.to_string(),
            source,
        })?;
        Ok(Self { anchored, regex })
    }

    /// Anchored pattern before placeholder expansion.
    pub fn anchored(&self) -> &str {
        &self.anchored
    }

    /// Final regular expression source.
    pub fn expanded(&self) -> &str {
        self.regex.as_str()
    }

    /// Match `path` and collect every participating placeholder capture.
    pub fn match_path(&self, path: &str) -> Option<RouteParams> {
        let captures = self.regex.captures(path)?;
        let mut params = RouteParams::default();
        for name in self.regex.capture_names().flatten() {
            let Some(value) = captures.name(name) else {
                continue;
            };
            if name.starts_with(PARAMS_GROUP) {
                params.push_positional(value.as_str());
            } else if name.starts_with(NAMED_GROUP) {
                params.push_named(value.as_str());
            }
        }
        Some(params)
    }
}

/// Wrap each top-level alternation branch in `^...$`.
pub fn anchor(raw: &str) -> String {
    split_alternation(raw)
        .into_iter()
        .map(|branch| format!("^{branch}$"))
        .collect::<Vec<_>>()
        .join("|")
}

/// Replace placeholder tokens with named capture groups.
///
/// Counters are per token type and restart for every pattern, so the second
/// `[:params:]` becomes `params2` regardless of any `[:named:]` in between.
pub fn expand_placeholders(pattern: &str) -> String {
    let mut expanded = pattern.to_string();
    for (token, group) in [(PARAMS_TOKEN, PARAMS_GROUP), (NAMED_TOKEN, NAMED_GROUP)] {
        let mut counter = 0usize;
        while let Some(pos) = expanded.find(token) {
            counter += 1;
            let replacement = format!("(?P<{group}{counter}>.+?)");
            expanded.replace_range(pos..pos + token.len(), &replacement);
        }
    }
    expanded
}

/// Split on `|` that is unescaped, outside groups, and outside classes.
fn split_alternation(raw: &str) -> Vec<&str> {
    let mut branches = Vec::new();
    let mut depth = 0usize;
    let mut in_class = false;
    let mut start = 0;
    let mut chars = raw.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '[' if !in_class => {
                in_class = true;
                // `]` directly after `[` or `[^` is a literal
                if matches!(chars.peek(), Some((_, '^'))) {
                    chars.next();
                }
                if matches!(chars.peek(), Some((_, ']'))) {
                    chars.next();
                }
            }
            // POSIX class such as `[:digit:]` nested in a bracket expression
            '[' if in_class && matches!(chars.peek(), Some((_, ':'))) => {
                chars.next();
                while let Some((_, inner)) = chars.next() {
                    if inner == ':' && matches!(chars.peek(), Some((_, ']'))) {
                        chars.next();
                        break;
                    }
                }
            }
            ']' if in_class => in_class = false,
            '(' if !in_class => depth += 1,
            ')' if !in_class => depth = depth.saturating_sub(1),
            '|' if !in_class && depth == 0 => {
                branches.push(&raw[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    branches.push(&raw[start..]);
    branches
}
