//! # Photometric transformation
//!
//! GCPD tabulates, for most systems, one magnitude and a set of colour indices.
//! This module turns those columns into one magnitude per band:
//!
//! - [`band`] – derivation steps and the missing-value arithmetic,
//! - [`system`] – a [`PhotometricSystem`](system::PhotometricSystem) as data,
//! - [`registry`] – the fixed table of supported systems,
//! - [`engine`] – the row-wise evaluation producing a [`BandTable`](engine::BandTable).
//!
//! ## Example
//!
//! ```rust
//! use gcpd::photometry::{engine::transform, registry::lookup};
//! use gcpd::raw_table::RawTable;
//!
//! let raw = RawTable::from_columns([("V", vec!["3.14"]), ("B-V", vec!["0.20"]), ("U-B", vec!["0.10"])]);
//! let bands = transform(lookup("UBV").unwrap(), &raw);
//! assert!((bands.get("U").unwrap()[0].unwrap() - 3.44).abs() < 1e-12);
//! ```
pub mod band;
pub mod engine;
pub mod registry;
pub mod system;
