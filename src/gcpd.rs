//! # GCPD façade
//!
//! [`Gcpd`] ties the pieces of the crate together:
//!
//! ```text
//! system name ──► registry ──► query ──► DocumentFetcher ──► document parser
//!                                                                  │
//!                     BandTable ◄── transformation engine ◄── raw table
//! ```
//!
//! The fetcher defaults to [`GcpdEnv`] (HTTP). Documents already on hand can be
//! processed with [`Gcpd::photometry_from_document`] and [`Gcpd::photometry_from_file`]
//! without touching the network.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gcpd::{config::GcpdConfig, gcpd::Gcpd, report::render};
//!
//! let gcpd = Gcpd::new(GcpdConfig::default());
//! let result = gcpd.photometry("HD174881", "UBV", "").unwrap();
//! print!("{}", render("HD174881", &result, true));
//! ```
use camino::Utf8Path;
use log::info;
use serde::Serialize;

use crate::{
    config::GcpdConfig,
    document::{parse_document, ParsedDocument},
    env_state::{DocumentFetcher, GcpdEnv},
    gcpd_errors::GcpdError,
    photometry::{
        engine::{transform, BandTable},
        registry::lookup,
        system::PhotometricSystem,
    },
    query::{PhotometryQuery, SystemListQuery},
    raw_table::RawTable,
    system_list::{parse_system_list, SystemList},
};

/// Outcome of a photometry request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotometryResult {
    pub system: &'static PhotometricSystem,
    pub document: ParsedDocument,
    pub bands: BandTable,
}

/// Entry point of the library.
#[derive(Debug, Clone)]
pub struct Gcpd<F: DocumentFetcher = GcpdEnv> {
    fetcher: F,
    config: GcpdConfig,
}

impl Gcpd<GcpdEnv> {
    /// Create a façade talking to the GCPD server over HTTP.
    pub fn new(config: GcpdConfig) -> Self {
        Gcpd {
            fetcher: GcpdEnv::new(config.clone()),
            config,
        }
    }
}

impl<F: DocumentFetcher> Gcpd<F> {
    /// Create a façade over any document source.
    pub fn with_fetcher(fetcher: F, config: GcpdConfig) -> Self {
        Gcpd { fetcher, config }
    }

    pub fn config(&self) -> &GcpdConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch and transform the photometry of one star.
    ///
    /// Arguments
    /// -----------------
    /// * `star_name`: catalog designation such as `HD174881`; normalized before querying.
    /// * `system_name`: identifier or alias of a supported system.
    /// * `remark`: free text sent as the `rem` parameter.
    ///
    /// Return
    /// ----------
    /// * The [`PhotometryResult`], or
    ///   - [`GcpdError::UnknownSystem`] before any request is sent,
    ///   - [`GcpdError::NoData`] when the document holds no measurement,
    ///   - the transport or parsing error otherwise.
    pub fn photometry(
        &self,
        star_name: &str,
        system_name: &str,
        remark: &str,
    ) -> Result<PhotometryResult, GcpdError> {
        let system = lookup(system_name)?;
        let query = PhotometryQuery::new(&self.config, system, star_name, remark);
        info!(
            "fetching {} photometry of {} ({})",
            system.id, star_name, query.ident
        );
        let markup = self.fetcher.fetch_photometry(&query)?;
        process_document(system, &markup)
    }

    /// List the systems in which a star has been measured.
    pub fn system_list(&self, star_name: &str) -> Result<SystemList, GcpdError> {
        let query = SystemListQuery::new(star_name);
        info!("fetching system list of {} ({})", star_name, query.ident);
        let markup = self.fetcher.fetch_system_list(&query)?;
        parse_system_list(&markup)
    }

    /// Process a photometry document already in memory.
    pub fn photometry_from_document(
        &self,
        system_name: &str,
        markup: &str,
    ) -> Result<PhotometryResult, GcpdError> {
        process_document(lookup(system_name)?, markup)
    }

    /// Process a photometry document stored on disk.
    pub fn photometry_from_file(
        &self,
        system_name: &str,
        path: &Utf8Path,
    ) -> Result<PhotometryResult, GcpdError> {
        let system = lookup(system_name)?;
        info!("reading {} photometry from {}", system.id, path);
        let markup = std::fs::read_to_string(path)?;
        process_document(system, &markup)
    }
}

fn process_document(
    system: &'static PhotometricSystem,
    markup: &str,
) -> Result<PhotometryResult, GcpdError> {
    let document = parse_document(markup)?;
    let block = document.data.as_ref().ok_or_else(|| {
        GcpdError::NoData(format!("no data block in {} document", system.id))
    })?;
    let table = RawTable::from_block(block, system.layout)?;
    let bands = transform(system, &table);

    Ok(PhotometryResult {
        system,
        document,
        bands,
    })
}

#[cfg(test)]
mod gcpd_test {
    use std::cell::RefCell;

    use approx::assert_relative_eq;

    use super::*;

    /// Serves a fixed document and records the queries it receives.
    struct Canned {
        markup: &'static str,
        seen: RefCell<Vec<String>>,
    }

    impl DocumentFetcher for Canned {
        fn fetch_photometry(&self, query: &PhotometryQuery) -> Result<String, GcpdError> {
            self.seen.borrow_mut().push(query.ident.clone());
            Ok(self.markup.to_string())
        }

        fn fetch_system_list(&self, query: &SystemListQuery) -> Result<String, GcpdError> {
            self.seen.borrow_mut().push(query.ident.clone());
            Ok(self.markup.to_string())
        }
    }

    fn canned(markup: &'static str) -> Gcpd<Canned> {
        Gcpd::with_fetcher(
            Canned {
                markup,
                seen: RefCell::new(Vec::new()),
            },
            GcpdConfig::default(),
        )
    }

    const UBV_PAGE: &str = "<hr><h3>Selection:</h3><b>Star Name:</b> HD 1\n<hr>\
                            <pre><b>V\tB-V\tU-B</b>\n3.00\t0.50\t0.25\n</pre><hr>";

    #[test]
    fn test_photometry_flow() {
        let gcpd = canned(UBV_PAGE);
        let result = gcpd.photometry("HD1", "UBV", "").unwrap();
        assert_eq!(gcpd.fetcher().seen.borrow().as_slice(), ["0100000001"]);
        assert_eq!(result.system.id, "UBV");
        assert_relative_eq!(result.bands.get("U").unwrap()[0].unwrap(), 3.75);
    }

    #[test]
    fn test_unknown_system_sends_nothing() {
        let gcpd = canned(UBV_PAGE);
        assert_eq!(
            gcpd.photometry("HD1", "XYZ", "").unwrap_err(),
            GcpdError::UnknownSystem("XYZ".into())
        );
        assert!(gcpd.fetcher().seen.borrow().is_empty());
    }

    #[test]
    fn test_missing_data_block() {
        let gcpd = canned("<b>Star Name:</b> HD 1");
        assert!(matches!(
            gcpd.photometry("HD1", "UBV", "").unwrap_err(),
            GcpdError::NoData(_)
        ));
    }
}
