//! Response handling.
//!
//! # Responsibilities
//! - Carry status code, headers and body written by route actions
//! - Allow actions to append content incrementally
//! - Redirects (`Location` header plus status, 303 by default)
//!
//! # Design Decisions
//! - Opaque to the dispatcher except for the 404 status set on the
//!   catch-all fallback
//! - Defaults to 200 with an empty body

use std::collections::BTreeMap;

use serde::Serialize;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const LOCATION: &str = "Location";
/// Status used by [`Response::redirect_default`] (See Other).
pub const DEFAULT_REDIRECT_STATUS: u16 = 303;

/// Response populated by route actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    status: u16,
    headers: BTreeMap<String, String>,
    body: String,
}

impl Default for Response {
    fn default() -> Self {
        Self {
            status: 200,
            headers: BTreeMap::new(),
            body: String::new(),
        }
    }
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn set_status(&mut self, status: u16) -> &mut Self {
        self.status = status;
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Replace the body.
    pub fn set_content(&mut self, content: impl Into<String>) -> &mut Self {
        self.body = content.into();
        self
    }

    /// Append to the existing body.
    pub fn add_content(&mut self, content: &str) -> &mut Self {
        self.body.push_str(content);
        self
    }

    /// Point the client at `location` with the given status.
    pub fn redirect(&mut self, location: impl Into<String>, status: u16) -> &mut Self {
        self.set_header(LOCATION, location).set_status(status)
    }

    /// Redirect with 303 See Other.
    pub fn redirect_default(&mut self, location: impl Into<String>) -> &mut Self {
        self.redirect(location, DEFAULT_REDIRECT_STATUS)
    }
}
