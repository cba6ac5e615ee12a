//! Thin blocking HTTP client over the shared request specification.
//!
//! # Design
//! `ApiClient` borrows the process-wide `RequestSpec` and owns one `ureq`
//! agent configured from it. Each verb method performs exactly one round-trip
//! and returns the raw `ApiResponse`: non-2xx statuses come back as data, not
//! errors, so the caller decides what counts as failure. Only transport
//! problems (connect, DNS, TLS, timeout, body read) surface as `Err`.

use serde::Serialize;
use ureq::typestate::WithBody;
use ureq::RequestBuilder;

use crate::error::HarnessError;
use crate::http::{ApiResponse, HttpMethod};
use crate::report;
use crate::spec::{RequestSpec, ResponseSpec};

type UreqResult = Result<ureq::http::Response<ureq::Body>, ureq::Error>;

#[derive(Clone)]
pub struct ApiClient<'a> {
    spec: &'a RequestSpec,
    agent: ureq::Agent,
}

impl<'a> ApiClient<'a> {
    pub fn new(spec: &'a RequestSpec) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(spec.timeout))
            .build()
            .new_agent();
        Self { spec, agent }
    }

    pub fn spec(&self) -> &RequestSpec {
        self.spec
    }

    pub fn get(&self, path: &str) -> Result<ApiResponse, HarnessError> {
        self.send(HttpMethod::Get, path, None, None)
    }

    /// GET with a single query parameter, e.g. `/posts?userId=1`.
    pub fn get_with_param(
        &self,
        path: &str,
        name: &str,
        value: impl ToString,
    ) -> Result<ApiResponse, HarnessError> {
        let value = value.to_string();
        self.send(HttpMethod::Get, path, Some((name, value.as_str())), None)
    }

    pub fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse, HarnessError> {
        self.send(HttpMethod::Post, path, None, Some(encode(body)?))
    }

    pub fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse, HarnessError> {
        self.send(HttpMethod::Put, path, None, Some(encode(body)?))
    }

    pub fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse, HarnessError> {
        self.send(HttpMethod::Patch, path, None, Some(encode(body)?))
    }

    pub fn delete(&self, path: &str) -> Result<ApiResponse, HarnessError> {
        self.send(HttpMethod::Delete, path, None, None)
    }

    /// Dispatch on a verb name (case-insensitive), then validate the response
    /// against `expect`. An unknown verb fails before any network I/O. The
    /// body is ignored for GET and DELETE; a missing body for POST, PUT or
    /// PATCH sends an empty request body.
    pub fn execute_and_validate<B: Serialize + ?Sized>(
        &self,
        method: &str,
        path: &str,
        body: Option<&B>,
        expect: &ResponseSpec,
    ) -> Result<ApiResponse, HarnessError> {
        let method: HttpMethod = method.parse()?;
        let payload = match body {
            Some(body) if method.has_body() => Some(encode(body)?),
            _ => None,
        };
        let response = self.send(method, path, None, payload)?;
        expect.validate(response)
    }

    fn send(
        &self,
        method: HttpMethod,
        path: &str,
        query: Option<(&str, &str)>,
        body: Option<Vec<u8>>,
    ) -> Result<ApiResponse, HarnessError> {
        let url = match query {
            Some((name, value)) => format!("{}?{name}={value}", self.spec.url(path)),
            None => self.spec.url(path),
        };
        let base = self.spec.url(path);

        if self.spec.log_detail.enabled() {
            let rendered = render_request(self.spec, method, &url, body.as_deref());
            tracing::info!("request\n{rendered}");
            report::attach("Request", rendered);
        }

        let transport = |source: ureq::Error| HarnessError::Transport {
            method,
            url: url.clone(),
            source,
        };

        let result: UreqResult = match method {
            HttpMethod::Get => self.prepare(self.agent.get(&base), query).call(),
            HttpMethod::Delete => self.prepare(self.agent.delete(&base), query).call(),
            HttpMethod::Post => send_body(self.prepare(self.agent.post(&base), query), body),
            HttpMethod::Put => send_body(self.prepare(self.agent.put(&base), query), body),
            HttpMethod::Patch => send_body(self.prepare(self.agent.patch(&base), query), body),
        };
        let mut response = result.map_err(transport)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.body_mut().read_to_string().map_err(transport)?;
        tracing::debug!(%method, %url, status, "response received");

        Ok(ApiResponse {
            method,
            url,
            status,
            headers,
            body,
        })
    }

    /// Merge the request spec's headers and the optional query parameter.
    fn prepare<S>(&self, builder: RequestBuilder<S>, query: Option<(&str, &str)>) -> RequestBuilder<S> {
        let builder = self
            .spec
            .all_headers()
            .fold(builder, |builder, (name, value)| builder.header(name, value));
        match query {
            Some((name, value)) => builder.query(name, value),
            None => builder,
        }
    }
}

fn send_body(builder: RequestBuilder<WithBody>, body: Option<Vec<u8>>) -> UreqResult {
    match body {
        Some(bytes) => builder.send(&bytes[..]),
        None => builder.send_empty(),
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>, HarnessError> {
    serde_json::to_vec(body).map_err(HarnessError::Encode)
}

/// Request line, then headers and body as the spec's log detail allows.
fn render_request(spec: &RequestSpec, method: HttpMethod, url: &str, body: Option<&[u8]>) -> String {
    let mut out = format!("{method} {url}");
    if spec.log_detail.headers() {
        for (name, value) in spec.all_headers() {
            out.push_str(&format!("\n{name}: {value}"));
        }
    }
    if let Some(body) = body.filter(|_| spec.log_detail.body()) {
        out.push_str("\n\n");
        out.push_str(&String::from_utf8_lossy(body));
    }
    out
}
