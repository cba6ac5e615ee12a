//! HTTP verbs and the raw response handed back to test cases.
//!
//! # Design
//! `ApiResponse` is plain owned data captured once the body has been read, so
//! it can be asserted on, logged, and decoded any number of times without
//! holding a connection open.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;

use crate::config::LogDetail;
use crate::error::HarnessError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether the verb carries a request body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = HarnessError;

    /// Case-insensitive: `"patch"`, `"Patch"` and `"PATCH"` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(HarnessError::UnsupportedMethod(s.to_string())),
        }
    }
}

/// A completed HTTP exchange: the request line plus status, headers and body.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub method: HttpMethod,
    pub url: String,
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl ApiResponse {
    /// First header value matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Status line, then headers and body as `detail` allows.
    pub fn render(&self, detail: LogDetail) -> String {
        let mut out = format!("{} {} -> {}", self.method, self.url, self.status);
        if detail.headers() {
            for (name, value) in &self.headers {
                out.push_str(&format!("\n{name}: {value}"));
            }
        }
        if detail.body() && !self.body.is_empty() {
            out.push_str("\n\n");
            out.push_str(&self.body);
        }
        out
    }

    /// Decode the body into `T`. Unknown fields are ignored by the models.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HarnessError> {
        serde_json::from_str(&self.body).map_err(|source| HarnessError::Decode {
            url: self.url.clone(),
            source,
        })
    }
}

/// Media type without parameters, lower-cased: `"Application/JSON; charset=utf-8"` → `"application/json"`.
pub fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
