//! Parameters extracted from a matched request path.

use std::collections::BTreeMap;

use serde::Serialize;

/// Positional and named parameters captured by a route pattern.
///
/// Built fresh for every dispatch and merged into the request's query store
/// once a route has been resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteParams {
    /// Non-empty `/`-separated segments of every `[:params:]` capture, in order.
    pub parameters: Vec<String>,
    /// Key/value pairs from every `[:named:]` capture.
    pub named: BTreeMap<String, String>,
}

impl RouteParams {
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty() && self.named.is_empty()
    }

    /// Append the segments of a positional capture.
    pub fn push_positional(&mut self, captured: &str) {
        self.parameters.extend(
            captured
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string),
        );
    }

    /// Read a named capture as alternating `key/value` tokens.
    ///
    /// A trailing key without a value maps to an empty string. Empty tokens in
    /// key position are skipped.
    pub fn push_named(&mut self, captured: &str) {
        let mut pending: Option<&str> = None;
        for token in captured.split('/') {
            match pending.take() {
                Some(key) => {
                    self.named.insert(key.to_string(), token.to_string());
                }
                None if token.is_empty() => {}
                None => {
                    self.named.insert(token.to_string(), String::new());
                    pending = Some(token);
                }
            }
        }
    }
}
