#![allow(dead_code)]

use std::{cell::RefCell, collections::HashMap};

use approx::assert_relative_eq;
use camino::Utf8Path;
use gcpd::{
    config::GcpdConfig,
    env_state::DocumentFetcher,
    gcpd::Gcpd,
    gcpd_errors::GcpdError,
    query::{PhotometryQuery, SystemListQuery},
};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn fixture(name: &str) -> String {
    let path = Utf8Path::new("tests/data").join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("cannot read {path}: {e}"))
}

/// Serves fixture documents instead of talking to the server.
#[derive(Default)]
pub struct FixtureFetcher {
    /// system id -> fixture file
    pub photometry: HashMap<String, String>,
    pub system_list: Option<String>,
    pub photometry_queries: RefCell<Vec<PhotometryQuery>>,
    pub system_list_queries: RefCell<Vec<SystemListQuery>>,
}

impl FixtureFetcher {
    pub fn with_photometry(mut self, system: &str, file: &str) -> Self {
        self.photometry.insert(system.to_string(), file.to_string());
        self
    }

    pub fn with_system_list(mut self, file: &str) -> Self {
        self.system_list = Some(file.to_string());
        self
    }

    pub fn into_gcpd(self) -> Gcpd<FixtureFetcher> {
        Gcpd::with_fetcher(self, GcpdConfig::default())
    }
}

fn not_found(what: &str) -> GcpdError {
    GcpdError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, what.to_string()))
}

impl DocumentFetcher for FixtureFetcher {
    fn fetch_photometry(&self, query: &PhotometryQuery) -> Result<String, GcpdError> {
        self.photometry_queries.borrow_mut().push(query.clone());
        let file = self
            .photometry
            .get(&query.system)
            .ok_or_else(|| not_found(&query.system))?;
        Ok(fixture(file))
    }

    fn fetch_system_list(&self, query: &SystemListQuery) -> Result<String, GcpdError> {
        self.system_list_queries.borrow_mut().push(query.clone());
        let file = self.system_list.as_ref().ok_or_else(|| not_found("system list"))?;
        Ok(fixture(file))
    }
}

pub fn assert_magnitudes(actual: &[Option<f64>], expected: &[Option<f64>]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} != {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        match (a, e) {
            (Some(a), Some(e)) => assert_relative_eq!(*a, *e, epsilon = 1e-9),
            (None, None) => {}
            _ => panic!("{actual:?} != {expected:?}"),
        }
    }
}
