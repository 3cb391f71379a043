//! # GCPD environment state
//!
//! This module defines [`GcpdEnv`], the **transport object** used by the
//! [`Gcpd`](crate::gcpd::Gcpd) façade to retrieve documents from the GCPD server, and the
//! [`DocumentFetcher`] trait it implements.
//!
//! ## Overview
//!
//! 1. Hold a persistent [`ureq::Agent`] configured with the timeout of the [`GcpdConfig`].
//! 2. Send the photometry query as a GET request, the system list query as a form POST.
//! 3. Return the document body as text; everything past the transport is handled by the
//!    parsers.
//!
//! ## Structure
//!
//! ```text
//! GcpdEnv
//! ├── http_client (ureq::Agent)
//! └── config      (GcpdConfig)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gcpd::{config::GcpdConfig, env_state::{DocumentFetcher, GcpdEnv}, query::SystemListQuery};
//!
//! let env = GcpdEnv::new(GcpdConfig::default());
//! let html = env.fetch_system_list(&SystemListQuery::new("HD174881")).unwrap();
//! println!("{}", &html[..100.min(html.len())]);
//! ```
//!
//! ## Notes
//!
//! - The `rem` parameter is written into the URL as given, before the encoded parameters.
//!   It must therefore already be a valid URI fragment.
//! - Any other source of documents (local cache, test fixtures) can stand in for
//!   [`GcpdEnv`] by implementing [`DocumentFetcher`].
//!
//! ## See also
//!
//! - [`ureq::Agent`] – Minimal HTTP client used internally.
use std::{fmt::Debug, time::Duration};

use log::debug;
use ureq::{http::Uri, Agent};

use crate::{
    config::GcpdConfig,
    gcpd_errors::GcpdError,
    query::{PhotometryQuery, SystemListQuery},
};

/// Source of GCPD documents.
pub trait DocumentFetcher {
    /// Retrieve the photometry document matching `query`.
    fn fetch_photometry(&self, query: &PhotometryQuery) -> Result<String, GcpdError>;

    /// Retrieve the system list document matching `query`.
    fn fetch_system_list(&self, query: &SystemListQuery) -> Result<String, GcpdError>;
}

/// HTTP access to the GCPD server.
///
/// # Fields
///
/// * `http_client` - The agent used for every request, configured with the timeout
/// * `config` - Endpoints and query options
#[derive(Debug, Clone)]
pub struct GcpdEnv {
    pub http_client: Agent,
    pub config: GcpdConfig,
}

impl Default for GcpdEnv {
    fn default() -> Self {
        Self::new(GcpdConfig::default())
    }
}

impl GcpdEnv {
    /// Create a new environment
    ///
    /// Arguments
    /// -----------------
    /// * `config` - Endpoints, query options and HTTP timeout
    ///
    /// Return
    /// ----------
    /// * A new environment whose agent times out after `config.timeout_secs`
    pub fn new(config: GcpdConfig) -> Self {
        let agent_config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build();
        let agent: Agent = agent_config.into();

        GcpdEnv {
            http_client: agent,
            config,
        }
    }

    fn parse_uri(url: &str) -> Result<Uri, GcpdError> {
        url.parse::<Uri>()
            .map_err(|err| GcpdError::InvalidUrl(format!("{url}: {err}")))
    }

    fn photometry_uri(&self, query: &PhotometryQuery) -> Result<Uri, GcpdError> {
        Self::parse_uri(&format!(
            "{}?rem={}",
            self.config.photometry_url, query.remark
        ))
    }
}

impl DocumentFetcher for GcpdEnv {
    fn fetch_photometry(&self, query: &PhotometryQuery) -> Result<String, GcpdError> {
        let uri = self.photometry_uri(query)?;
        debug!("GET {uri} {:?}", query.params());

        let body = self
            .http_client
            .get(uri)
            .query_pairs(query.params())
            .call()?
            .body_mut()
            .read_to_string()?;
        Ok(body)
    }

    fn fetch_system_list(&self, query: &SystemListQuery) -> Result<String, GcpdError> {
        let uri = Self::parse_uri(&self.config.system_list_url)?;
        debug!("POST {uri} ident={}", query.ident);

        let body = self
            .http_client
            .post(uri)
            .send_form(query.form())?
            .body_mut()
            .read_to_string()?;
        Ok(body)
    }
}
