//! Configuration from environment variables.
//!
//! # Environment variables
//!
//! - `TARGET_API_URL`: URL the Invoker sends a GET request to. Required.
//! - `DD_SERVICE`: service name attached to spans.
//! - `DD_ENV`: environment name attached to spans.
//! - `DD_TRACE_ENABLED`: `false` or `0` disables spans around outbound calls.
//!
//! Values are read on every invocation and never cached.

use std::env;

use crate::error::Error;

/// Name of the variable holding the Invoker's target URL.
pub const TARGET_API_URL: &str = "TARGET_API_URL";

/// Configuration of the Invoker.
#[derive(Clone, Debug, PartialEq)]
pub struct InvokerConfig {
    /// URL of the downstream endpoint.
    pub target_url: String,
}

impl InvokerConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through a given lookup function.
    ///
    /// An empty value is treated the same as an absent one.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let target_url = lookup(TARGET_API_URL)
            .filter(|url| !url.is_empty())
            .ok_or(Error::ConfigurationMissing(TARGET_API_URL.to_string()))?;
        Ok(Self { target_url })
    }
}

/// Tags and switches of the instrumentation layer.
#[derive(Clone, Debug, PartialEq)]
pub struct InstrumentationConfig {
    /// Service name.
    pub service: Option<String>,
    /// Environment name.
    pub env: Option<String>,
    /// Whether spans are emitted.
    pub enabled: bool,
}

impl Default for InstrumentationConfig {
    fn default() -> Self {
        Self {
            service: None,
            env: None,
            enabled: true,
        }
    }
}

impl InstrumentationConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through a given lookup function.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled = lookup("DD_TRACE_ENABLED")
            .map(|v| {
                let v = v.trim().to_ascii_lowercase();
                v != "false" && v != "0"
            })
            .unwrap_or(true);
        Self {
            service: lookup("DD_SERVICE").filter(|s| !s.is_empty()),
            env: lookup("DD_ENV").filter(|s| !s.is_empty()),
            enabled,
        }
    }
}
