//! # Client configuration
//!
//! [`GcpdConfig`] gathers the endpoints and query options used when talking to the
//! GCPD server. Defaults point to the Geneva service; [`GcpdConfig::builder`] offers a
//! validating fluent builder, and [`GcpdConfig::from_json_str`] loads a serialized
//! configuration (missing fields take their default value).
//!
//! ```rust
//! use gcpd::config::GcpdConfig;
//!
//! let config = GcpdConfig::builder()
//!     .timeout_secs(30)
//!     .query_type("mean")
//!     .build()
//!     .unwrap();
//! assert_eq!(config.timeout_secs, 30);
//! ```
use serde::{Deserialize, Serialize};

use crate::{
    constants::{DEFAULT_QUERY_TYPE, DEFAULT_TIMEOUT_SECS, PHOTOMETRY_URL, SYSTEM_LIST_URL},
    gcpd_errors::GcpdError,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcpdConfig {
    /// Endpoint serving the photometry documents.
    pub photometry_url: String,
    /// Endpoint serving the per-star system list.
    pub system_list_url: String,
    /// `type` query parameter (`original` values or averaged ones).
    pub query_type: String,
    /// Ask the server to append the bibliography.
    pub with_references: bool,
    pub timeout_secs: u64,
}

impl Default for GcpdConfig {
    fn default() -> Self {
        GcpdConfig {
            photometry_url: PHOTOMETRY_URL.to_string(),
            system_list_url: SYSTEM_LIST_URL.to_string(),
            query_type: DEFAULT_QUERY_TYPE.to_string(),
            with_references: true,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl GcpdConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> GcpdConfigBuilder {
        GcpdConfigBuilder::new()
    }

    /// Load a configuration from JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, GcpdError> {
        let config: GcpdConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants enforced by [`GcpdConfigBuilder::build`].
    pub fn validate(&self) -> Result<(), GcpdError> {
        for (field, url) in [
            ("photometry_url", &self.photometry_url),
            ("system_list_url", &self.system_list_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(GcpdError::InvalidConfig(format!(
                    "{field} must be an http(s) URL, got {url:?}"
                )));
            }
        }
        if self.query_type.trim().is_empty() {
            return Err(GcpdError::InvalidConfig("query_type is empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(GcpdError::InvalidConfig(
                "timeout_secs must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`GcpdConfig`], with validation.
#[derive(Debug, Clone, Default)]
pub struct GcpdConfigBuilder {
    config: GcpdConfig,
}

impl GcpdConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn photometry_url(mut self, v: impl Into<String>) -> Self {
        self.config.photometry_url = v.into();
        self
    }

    pub fn system_list_url(mut self, v: impl Into<String>) -> Self {
        self.config.system_list_url = v.into();
        self
    }

    pub fn query_type(mut self, v: impl Into<String>) -> Self {
        self.config.query_type = v.into();
        self
    }

    pub fn with_references(mut self, v: bool) -> Self {
        self.config.with_references = v;
        self
    }

    pub fn timeout_secs(mut self, v: u64) -> Self {
        self.config.timeout_secs = v;
        self
    }

    /// Finalize the builder.
    ///
    /// Return
    /// ----------
    /// * The [`GcpdConfig`], or [`GcpdError::InvalidConfig`] if an endpoint is not an
    ///   http(s) URL, the query type is blank, or the timeout is zero.
    pub fn build(self) -> Result<GcpdConfig, GcpdError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
