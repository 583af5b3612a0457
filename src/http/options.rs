//! Transport-level request options and protocol selection

use reqwest::{
    RequestBuilder,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, time::Duration};

/// URI scheme used to reach the cPanel instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    #[default]
    Https,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }

    /// Default cPanel port for this protocol
    pub fn default_port(&self) -> u16 {
        match self {
            Self::Http => 2082,
            Self::Https => 2083,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            other => Err(crate::Error::config(format!("Unsupported protocol: {other}"))),
        }
    }
}

/// Per-request options handed through the authorization layer
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra headers sent with the request
    pub headers: HeaderMap,
    /// Request timeout, overriding the client default
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header, replacing any previous value with the same name
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Apply options to an outgoing request
    pub fn apply(self, mut builder: RequestBuilder) -> RequestBuilder {
        if !self.headers.is_empty() {
            builder = builder.headers(self.headers);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder
    }
}
