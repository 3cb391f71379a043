//! Parameter sets of the two GCPD queries.
//!
//! These values are what the transport sends; building the actual request is left
//! to a [`DocumentFetcher`](crate::env_state::DocumentFetcher).
use serde::Serialize;

use crate::{
    catalog::normalize_star_name,
    config::GcpdConfig,
    constants::{QUERY_MODE, SYSTEM_LIST_BUTTON},
    photometry::system::PhotometricSystem,
};

/// Query for the photometry of one star in one system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotometryQuery {
    pub system: String,
    pub query_type: String,
    pub with_references: bool,
    /// Normalized catalog identifier.
    pub ident: String,
    /// Free text appended verbatim as the `rem` parameter.
    pub remark: String,
}

impl PhotometryQuery {
    pub fn new(
        config: &GcpdConfig,
        system: &PhotometricSystem,
        star_name: &str,
        remark: &str,
    ) -> Self {
        PhotometryQuery {
            system: system.id.to_string(),
            query_type: config.query_type.clone(),
            with_references: config.with_references,
            ident: normalize_star_name(star_name),
            remark: remark.to_string(),
        }
    }

    /// Encoded parameters, `rem` excluded.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("phot", self.system.clone()),
            ("type", self.query_type.clone()),
            (
                "refer",
                if self.with_references { "with" } else { "without" }.to_string(),
            ),
            ("ident", self.ident.clone()),
            ("mode", QUERY_MODE.to_string()),
        ]
    }
}

/// Query for the systems measured for one star.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemListQuery {
    pub ident: String,
}

impl SystemListQuery {
    pub fn new(star_name: &str) -> Self {
        SystemListQuery {
            ident: normalize_star_name(star_name),
        }
    }

    /// Form fields of the POST request.
    pub fn form(&self) -> [(&'static str, &str); 2] {
        [("ident", self.ident.as_str()), ("button", SYSTEM_LIST_BUTTON)]
    }
}
