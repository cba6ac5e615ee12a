//! Blocking API test harness for a posts/users REST service.
//!
//! # Overview
//! Test cases build a `Specs` bundle once per process (base URL, default
//! headers, and the success/created/error response expectations), issue calls
//! through `ApiClient`, validate responses against a `ResponseSpec`, and check
//! decoded `Post`/`User` models with `check!`/`check_eq!`. Each action and
//! each block of checks runs as a named `report::step`, recorded for the
//! reporter alongside the request/response logs.
//!
//! # Design
//! - Shared configuration is immutable after install; only `&'static Specs`
//!   escapes, so concurrent test threads need no locking.
//! - HTTP statuses are data. Only transport failures, spec mismatches,
//!   failed checks and unsupported verbs are errors, each with its own
//!   `HarnessError` variant.
//! - DTOs are defined independently from the mock-server crate; the
//!   integration scenarios catch schema drift.

pub mod check;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod report;
pub mod spec;
pub mod types;

pub use client::ApiClient;
pub use config::{HarnessConfig, LogDetail};
pub use error::{Expectation, HarnessError};
pub use http::{ApiResponse, HttpMethod};
pub use logging::init_logging;
pub use report::{run_case, step, Severity, TestCase};
pub use spec::{RequestSpec, ResponseSpec, Specs};
pub use types::{Address, Company, Geo, Post, User};
