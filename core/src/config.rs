//! Harness configuration read from the environment.
//!
//! | variable           | default                                 |
//! |--------------------|-----------------------------------------|
//! | `API_BASE_URL`     | `https://jsonplaceholder.typicode.com`  |
//! | `API_TIMEOUT_SECS` | `10`                                    |
//! | `API_LOG_DETAIL`   | `all` (`headers`, `body`, `status`, `none`) |

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::HarnessError;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const BASE_URL_VAR: &str = "API_BASE_URL";
pub const TIMEOUT_VAR: &str = "API_TIMEOUT_SECS";
pub const LOG_DETAIL_VAR: &str = "API_LOG_DETAIL";

/// How much of each request and response gets logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogDetail {
    /// Request/status line, headers and body.
    #[default]
    All,
    Headers,
    Body,
    /// Request line and status only.
    Status,
    None,
}

impl LogDetail {
    pub fn headers(&self) -> bool {
        matches!(self, LogDetail::All | LogDetail::Headers)
    }

    pub fn body(&self) -> bool {
        matches!(self, LogDetail::All | LogDetail::Body)
    }

    pub fn enabled(&self) -> bool {
        !matches!(self, LogDetail::None)
    }
}

impl fmt::Display for LogDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogDetail::All => "all",
            LogDetail::Headers => "headers",
            LogDetail::Body => "body",
            LogDetail::Status => "status",
            LogDetail::None => "none",
        };
        f.write_str(name)
    }
}

impl FromStr for LogDetail {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(LogDetail::All),
            "headers" => Ok(LogDetail::Headers),
            "body" => Ok(LogDetail::Body),
            "status" => Ok(LogDetail::Status),
            "none" | "off" => Ok(LogDetail::None),
            other => Err(HarnessError::Config(format!(
                "{LOG_DETAIL_VAR}: unknown log detail `{other}`"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub log_detail: LogDetail,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl HarnessConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            log_detail: LogDetail::default(),
        }
    }

    pub fn from_env() -> Result<Self, HarnessError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Unset and blank values fall back
    /// to defaults; malformed values are rejected.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, HarnessError> {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = match value(BASE_URL_VAR) {
            Some(url) => Self::new(url.trim()),
            None => Self::default(),
        };
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(HarnessError::Config(format!(
                "{BASE_URL_VAR}: `{}` is not an http(s) URL",
                config.base_url
            )));
        }

        if let Some(raw) = value(TIMEOUT_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                HarnessError::Config(format!("{TIMEOUT_VAR}: `{raw}` is not a whole number of seconds"))
            })?;
            if secs == 0 {
                return Err(HarnessError::Config(format!("{TIMEOUT_VAR}: must be positive")));
            }
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = value(LOG_DETAIL_VAR) {
            config.log_detail = raw.parse()?;
        }

        Ok(config)
    }
}
