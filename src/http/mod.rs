//! Request/response collaborators.
//!
//! # Data Flow
//! ```text
//! raw (method, uri)
//!     → request.rs (request ID, path normalization, query parsing)
//!     → dispatcher (route lookup, parameter merge)
//!     → route action writes response.rs (status, headers, body)
//! ```

pub mod request;
pub mod response;

pub use request::{ParamValue, Request, RequestId, PARAMETERS_KEY};
pub use response::Response;
