//! # Configuration Module
//!
//! Configuration for an [`Invoker`](crate::Invoker): where function calls are
//! rooted and how the default transport behaves.
//!
//! ## Sources
//!
//! - Builder-style setters on [`InvokerConfig`]
//! - Environment variables via [`InvokerConfig::from_env()`]
//! - A YAML file via [`InvokerConfig::from_yaml_file()`]
//!
//! ## Environment Variables
//!
//! | Variable | Field |
//! |----------|-------|
//! | `FNCALL_BASE_ADDRESS` | `base_address` |
//! | `FNCALL_ORIGIN` | `origin` |
//! | `FNCALL_TIMEOUT_MS` | `timeout_ms` |
//! | `FNCALL_SITE_ID` | read by [`detect_site_id_from_env()`] |
//!
//! ## Default Base Address
//!
//! When no base address is configured, it is computed once at construction:
//!
//! - `/api/v1/{site_id}` if a site identifier is detected
//! - `/api/v1` otherwise
//!
//! A relative base address is resolved against `origin`.
//!
//! ## Example Configuration
//!
//! ```yaml
//! base_address: https://backend.example.com/api/v1/04676357
//! timeout_ms: 5000
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::path::Path;

/// Path prefix under which all function endpoints live.
pub const API_PREFIX: &str = "/api/v1";

/// Configuration for an [`Invoker`](crate::Invoker).
///
/// Immutable once handed to the invoker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InvokerConfig {
    /// Address prefix for `/_functions/{name}`. Absolute (`https://host/api/v1/site`)
    /// or relative (`/api/v1/site`, requires `origin`).
    pub base_address: Option<String>,
    /// Scheme and host a relative base address is resolved against.
    pub origin: Option<String>,
    /// Request timeout for the default transport, in milliseconds.
    pub timeout_ms: Option<u64>,
}

impl InvokerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn base_address(mut self, address: impl Into<String>) -> Self {
        self.base_address = Some(address.into());
        self
    }

    #[must_use]
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    #[must_use]
    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.timeout_ms = Some(ms);
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_address: non_empty_var("FNCALL_BASE_ADDRESS"),
            origin: non_empty_var("FNCALL_ORIGIN"),
            timeout_ms: env::var("FNCALL_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.trim().parse().ok()),
        }
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Layer `other` on top of `self`: any field set in `other` wins.
    #[must_use]
    pub fn merge(self, other: InvokerConfig) -> Self {
        Self {
            base_address: other.base_address.or(self.base_address),
            origin: other.origin.or(self.origin),
            timeout_ms: other.timeout_ms.or(self.timeout_ms),
        }
    }

    /// Base address to use, running `detect` only when none is configured.
    pub fn resolve_base_address<F>(&self, detect: F) -> String
    where
        F: FnOnce() -> Option<String>,
    {
        if let Some(address) = &self.base_address {
            return address.clone();
        }
        match detect().filter(|id| !id.trim().is_empty()) {
            Some(site_id) => format!("{}/{}", API_PREFIX, site_id.trim()),
            None => API_PREFIX.to_string(),
        }
    }
}

/// Site identifier from `FNCALL_SITE_ID`; blank counts as absent.
pub fn detect_site_id_from_env() -> Option<String> {
    non_empty_var("FNCALL_SITE_ID")
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
