//! Request and response specifications shared by every test case.
//!
//! # Design
//! A `RequestSpec` holds the defaults merged into every outgoing call: base
//! URL, headers, timeout and request log detail. A `ResponseSpec` is a named
//! set of expectations checked against an incoming response. `Specs` bundles
//! the request spec with the three response specs (success, created, error).
//! It is built once per process, installed into a `OnceLock`, and after that
//! only shared references are handed out, so nothing can change it.

use std::sync::OnceLock;
use std::time::Duration;

use crate::config::{HarnessConfig, LogDetail};
use crate::error::{Expectation, HarnessError};
use crate::http::{media_type, ApiResponse};
use crate::report;

pub const JSON: &str = "application/json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub base_url: String,
    pub content_type: String,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
    pub log_detail: LogDetail,
}

impl RequestSpec {
    pub fn new(config: &HarnessConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            content_type: JSON.to_string(),
            headers: vec![("accept".to_string(), JSON.to_string())],
            timeout: config.timeout,
            log_detail: config.log_detail,
        }
    }

    /// Resolve an endpoint path against the base URL. Absolute URLs pass
    /// through unchanged.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Default headers plus the content type, in send order.
    pub fn all_headers(&self) -> impl Iterator<Item = (&str, &str)> {
        std::iter::once(("content-type", self.content_type.as_str()))
            .chain(self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}

/// Named expectations for a response. `None` means "not checked here".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSpec {
    pub name: &'static str,
    pub status: Option<u16>,
    pub content_type: Option<String>,
    pub log_detail: LogDetail,
}

impl ResponseSpec {
    /// 200 with a JSON body.
    pub fn success(log_detail: LogDetail) -> Self {
        Self {
            name: "success",
            status: Some(200),
            content_type: Some(JSON.to_string()),
            log_detail,
        }
    }

    /// 201 with a JSON body.
    pub fn created(log_detail: LogDetail) -> Self {
        Self {
            name: "created",
            status: Some(201),
            content_type: Some(JSON.to_string()),
            log_detail,
        }
    }

    /// Logs only; the caller asserts the status explicitly.
    pub fn error(log_detail: LogDetail) -> Self {
        Self {
            name: "error",
            status: None,
            content_type: None,
            log_detail,
        }
    }

    /// Log the response at this spec's detail, then check every expectation.
    /// Returns the response unchanged on success so calls chain.
    pub fn validate(&self, response: ApiResponse) -> Result<ApiResponse, HarnessError> {
        if self.log_detail.enabled() {
            let rendered = response.render(self.log_detail);
            tracing::info!(spec = self.name, "response\n{rendered}");
            report::attach("Response", rendered);
        }

        if let Some(expected) = self.status {
            if response.status != expected {
                return Err(self.mismatch(
                    &response,
                    Expectation::Status,
                    expected.to_string(),
                    response.status.to_string(),
                ));
            }
        }

        if let Some(expected) = &self.content_type {
            let actual = response.content_type().unwrap_or_default();
            if media_type(actual) != media_type(expected) {
                let actual = if actual.is_empty() { "<none>" } else { actual };
                return Err(self.mismatch(
                    &response,
                    Expectation::ContentType,
                    expected.clone(),
                    actual.to_string(),
                ));
            }
        }

        Ok(response)
    }

    fn mismatch(
        &self,
        response: &ApiResponse,
        expectation: Expectation,
        expected: String,
        actual: String,
    ) -> HarnessError {
        HarnessError::SpecMismatch {
            spec: self.name,
            method: response.method,
            url: response.url.clone(),
            expectation,
            expected,
            actual,
        }
    }
}

/// Everything a test case shares with every other test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specs {
    pub request: RequestSpec,
    pub success: ResponseSpec,
    pub created: ResponseSpec,
    pub error: ResponseSpec,
}

static INSTALLED: OnceLock<Specs> = OnceLock::new();

impl Specs {
    pub fn from_config(config: &HarnessConfig) -> Self {
        Self {
            request: RequestSpec::new(config),
            success: ResponseSpec::success(config.log_detail),
            created: ResponseSpec::created(config.log_detail),
            error: ResponseSpec::error(config.log_detail),
        }
    }

    /// Install as the process-wide specs. Fails if specs were already installed.
    pub fn install(self) -> Result<&'static Specs, HarnessError> {
        let mut fresh = false;
        let specs = INSTALLED.get_or_init(|| {
            fresh = true;
            self
        });
        if !fresh {
            return Err(HarnessError::AlreadyInstalled);
        }
        tracing::debug!(base_url = %specs.request.base_url, "specs installed");
        Ok(specs)
    }

    /// The installed specs, running `init` first if nothing is installed yet.
    /// Concurrent callers block until the one running `init` finishes.
    pub fn get_or_install(init: impl FnOnce() -> Specs) -> &'static Specs {
        INSTALLED.get_or_init(init)
    }

    pub fn installed() -> Option<&'static Specs> {
        INSTALLED.get()
    }
}
