//! Request handling and normalization.
//!
//! # Responsibilities
//! - Generate unique request ID (UUID v4)
//! - Normalize the request path (drop empty and `..` segments)
//! - Parse the query string of a raw request URI
//! - Accept additive merges of route parameters into the query store
//!
//! # Design Decisions
//! - Request ID assigned at construction for tracing
//! - Query values are either a single string or a list (`parameters`)
//! - Merging overwrites matching keys and keeps everything else

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::routing::method::Method;
use crate::routing::params::RouteParams;

/// Query key under which positional route parameters are stored.
pub const PARAMETERS_KEY: &str = "parameters";

/// Unique identifier attached to every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A value in the query store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Single(String),
    List(Vec<String>),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Single(s) => Some(s),
            ParamValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ParamValue::List(l) => Some(l),
            ParamValue::Single(_) => None,
        }
    }
}

/// An incoming request as seen by the dispatcher.
#[derive(Debug, Clone)]
pub struct Request {
    id: RequestId,
    method: Method,
    path: String,
    query: BTreeMap<String, ParamValue>,
}

impl Request {
    /// Create a request for `path`, stored as given.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            id: RequestId::new(),
            method,
            path: path.into(),
            query: BTreeMap::new(),
        }
    }

    /// Build a request from a raw URI such as `/users/42?expand=1`.
    ///
    /// The path is sanitized and the query string decoded into the query store.
    pub fn parse(method: Method, uri: &str) -> Self {
        let (path, query) = match uri.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (uri, None),
        };

        let mut request = Self::new(method, sanitize_path(path));
        if let Some(query) = query {
            for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
                request
                    .query
                    .insert(key.into_owned(), ParamValue::Single(value.into_owned()));
            }
        }
        request
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Look up a query value.
    pub fn query(&self, key: &str) -> Option<&ParamValue> {
        self.query.get(key)
    }

    /// The full query store.
    pub fn query_all(&self) -> &BTreeMap<String, ParamValue> {
        &self.query
    }

    /// Set a single query value.
    pub fn insert_query(&mut self, key: impl Into<String>, value: ParamValue) {
        self.query.insert(key.into(), value);
    }

    /// Merge route parameters into the query store.
    ///
    /// Positional parameters land under [`PARAMETERS_KEY`]; named parameters
    /// are inserted afterwards, one key each.
    pub fn add_query(&mut self, params: &RouteParams) {
        if !params.parameters.is_empty() {
            self.query.insert(
                PARAMETERS_KEY.to_string(),
                ParamValue::List(params.parameters.clone()),
            );
        }
        for (key, value) in &params.named {
            self.query
                .insert(key.clone(), ParamValue::Single(value.clone()));
        }
    }
}

/// Drop empty and `..` segments and rejoin with `/`.
pub fn sanitize_path(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty() && *segment != "..")
        .collect::<Vec<_>>()
        .join("/")
}
