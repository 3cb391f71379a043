//! # Constants and type definitions for GCPD
//!
//! This module centralizes the **marker strings**, **query constants** and **common type
//! definitions** used throughout the `gcpd` library.
//!
//! ## Overview
//!
//! - Text markers recognized inside GCPD documents (section anchor, no-data marker)
//! - Fixed values used to build remote queries
//! - Type aliases shared by the parser and the transformation engine

// -------------------------------------------------------------------------------------------------
// Document markers
// -------------------------------------------------------------------------------------------------

/// Heading text (case-insensitive, trimmed) anchoring the data and reference sections
pub const SECTION_ANCHOR: &str = "Selection:";

/// Text marking a document without usable photometry (case-insensitive)
pub const NO_DATA_MARKER: &str = "No values";

/// Emphasized label preceding the bibcode hyperlink of a reference
pub const BIBCODE_LABEL: &str = "Bibcode";

/// Reference key under which the bibcode hyperlink target is stored
pub const BIBCODE_URL_KEY: &str = "BibcodeURL";

/// Reference fields rendered in reports, in display order
pub const REFERENCE_DISPLAY_KEYS: [&str; 4] = ["Author", "Journal", "Title", BIBCODE_URL_KEY];

/// Column header label holding the system designation in the system list document
pub const DESIGNATION_HEADER: &str = "Designation";

/// Column header label holding the system number in the system list document
pub const SYSTEM_HEADER: &str = "System";

// -------------------------------------------------------------------------------------------------
// Query constants
// -------------------------------------------------------------------------------------------------

/// Default endpoint serving photometry documents
pub const PHOTOMETRY_URL: &str = "http://obswww.unige.ch/gcpd/cgi-bin/photoSys.cgi";

/// Default endpoint serving the list of systems measured for a star
pub const SYSTEM_LIST_URL: &str = "http://obswww.unige.ch/gcpd/cgi-bin/genIndex.cgi";

/// Query type requesting the original (non averaged) values
pub const DEFAULT_QUERY_TYPE: &str = "original";

/// Query mode selecting stars by catalog number
pub const QUERY_MODE: &str = "starno";

/// Form button value of the system list query
pub const SYSTEM_LIST_BUTTON: &str = "Query by Star Number";

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Uncertainty attached to every reported magnitude
pub const NOMINAL_UNCERTAINTY: f64 = 0.05;

/// Photometric system used when the caller does not request one
pub const DEFAULT_SYSTEM: &str = "UBV";

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// A magnitude or colour value; `None` is the missing value
pub type Magnitude = Option<f64>;

/// Name of a column of the raw data table
pub type ColumnName = String;

/// One computed sequence per band, one entry per data row
pub type BandValues = Vec<Magnitude>;
