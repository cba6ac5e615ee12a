//! Error taxonomy for the API harness.
//!
//! # Design
//! Each variant maps to one way a test case can fail: the network call never
//! completed (`Transport`), the response broke a response specification
//! (`SpecMismatch`), a decoded model failed a field check (`Assertion`), or
//! the caller asked for something the harness cannot do (`UnsupportedMethod`,
//! `Config`, `AlreadyInstalled`). Every variant carries the method, URL or
//! expression needed to diagnose the failure without re-running it.

use thiserror::Error;

use crate::http::HttpMethod;

/// Which response-specification expectation was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    Status,
    ContentType,
}

impl std::fmt::Display for Expectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expectation::Status => write!(f, "status code"),
            Expectation::ContentType => write!(f, "content type"),
        }
    }
}

#[derive(Debug, Error)]
pub enum HarnessError {
    /// Connection, DNS, TLS, timeout or body-read failure.
    #[error("{method} {url}: transport failure: {source}")]
    Transport {
        method: HttpMethod,
        url: String,
        #[source]
        source: ureq::Error,
    },

    /// The response violated an expectation of the named response specification.
    #[error("{method} {url}: `{spec}` spec expected {expectation} {expected}, got {actual}")]
    SpecMismatch {
        spec: &'static str,
        method: HttpMethod,
        url: String,
        expectation: Expectation,
        expected: String,
        actual: String,
    },

    /// A field-level check on a decoded model failed.
    #[error("check failed: {expression}{}", with_parens(.detail))]
    Assertion {
        expression: String,
        detail: Option<String>,
    },

    /// The verb name is not one of GET, POST, PUT, PATCH or DELETE.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("response specifications are already installed")]
    AlreadyInstalled,
}

fn with_parens(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(" ({d})")).unwrap_or_default()
}
