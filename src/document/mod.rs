//! # Photometry documents
//!
//! A GCPD photometry page holds three things, in order:
//!
//! 1. **Metadata**: emphasized labels (`<b>Star Name:</b>`, `<b>Nb Sources:</b>`, …)
//!    each followed by a plain-text value.
//! 2. **Data**: a single preformatted block whose emphasized first line is the
//!    tab-separated column header and whose following text holds the rows.
//! 3. **References**: one preformatted block per bibliographic source, made of
//!    `<b>Label</b> value` pairs and an optional bibcode hyperlink.
//!
//! [`parser::DocumentParser`] reconstructs these parts from the tag event stream
//! and returns a [`ParsedDocument`]. The no-data marker anywhere in the text aborts
//! the extraction with [`GcpdError::NoData`](crate::gcpd_errors::GcpdError::NoData).
//!
//! ## Example
//!
//! ```rust
//! use gcpd::document::{parse_document, MetadataKey};
//!
//! let html = "<hr><h3>Selection:</h3><b>Star Name:</b> HD 1\n<hr>\
//!             <pre><b>V\tB-V</b>\n3.14\t0.20\n</pre><hr>";
//! let doc = parse_document(html).unwrap();
//! assert_eq!(doc.metadata(MetadataKey::StarName), Some("HD 1"));
//! assert_eq!(doc.data.unwrap().column_names(), vec!["V", "B-V"]);
//! ```
pub mod parser;
pub mod section;

use serde::{Serialize, Serializer};

use crate::{constants::REFERENCE_DISPLAY_KEYS, gcpd_errors::GcpdError, markup::TagEvent};

pub use parser::DocumentParser;

/// Metadata labels recognized in the head of a photometry document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MetadataKey {
    StarName,
    StarCode,
    Remark,
    NumberOfSources,
    ReferenceCount,
}

impl MetadataKey {
    pub const ALL: [MetadataKey; 5] = [
        MetadataKey::StarName,
        MetadataKey::StarCode,
        MetadataKey::Remark,
        MetadataKey::NumberOfSources,
        MetadataKey::ReferenceCount,
    ];

    /// Label text as printed by GCPD.
    pub fn label(&self) -> &'static str {
        match self {
            MetadataKey::StarName => "Star Name:",
            MetadataKey::StarCode => "Star Code:",
            MetadataKey::Remark => "Rem:",
            MetadataKey::NumberOfSources => "Nb Sources:",
            MetadataKey::ReferenceCount => "References:",
        }
    }

    /// Key whose label is a prefix of `label`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| label.starts_with(key.label()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataField {
    pub key: MetadataKey,
    pub value: String,
}

/// One bibliographic source, as label → value pairs in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reference {
    fields: Vec<(String, String)>,
}

impl Reference {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing a previous value stored under the same key.
    pub fn insert(&mut self, key: &str, value: &str) {
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.fields.push((key.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Fields of the display vocabulary present in this reference, in display order.
    pub fn display_fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        REFERENCE_DISPLAY_KEYS
            .into_iter()
            .filter_map(|key| self.get(key).map(|value| (key, value)))
    }
}

impl Serialize for Reference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.fields())
    }
}

/// The raw measurement block: column header line plus the text holding the rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataBlock {
    pub header: String,
    pub body: String,
}

impl DataBlock {
    /// Header split on tabs, names trimmed; empty names are kept to preserve positions.
    pub fn column_names(&self) -> Vec<&str> {
        self.header.split('\t').map(str::trim).collect()
    }

    /// Non-blank lines of the body.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.body.lines().filter(|line| !line.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedDocument {
    pub metadata: Vec<MetadataField>,
    pub data: Option<DataBlock>,
    pub references: Vec<Reference>,
}

impl ParsedDocument {
    pub fn metadata(&self, key: MetadataKey) -> Option<&str> {
        self.metadata
            .iter()
            .find(|field| field.key == key)
            .map(|field| field.value.as_str())
    }

    pub(crate) fn set_metadata(&mut self, key: MetadataKey, value: &str) {
        match self.metadata.iter_mut().find(|field| field.key == key) {
            Some(field) => field.value = value.to_string(),
            None => self.metadata.push(MetadataField {
                key,
                value: value.to_string(),
            }),
        }
    }
}

/// Parse a photometry document from its markup.
///
/// Return
/// ----------
/// * The [`ParsedDocument`], or
///   - [`GcpdError::NoData`] if the no-data marker is present,
///   - [`GcpdError::ParseState`] on a close tag without matching open tag,
///   - [`GcpdError::MalformedMarkup`] if the markup cannot be tokenized.
pub fn parse_document(markup: &str) -> Result<ParsedDocument, GcpdError> {
    let mut parser = DocumentParser::new();
    for event in crate::markup::TagEventSource::new(markup) {
        parser.handle(event?)?;
    }
    Ok(parser.finish())
}

/// Parse a photometry document from an already tokenized event stream.
pub fn parse_events<I>(events: I) -> Result<ParsedDocument, GcpdError>
where
    I: IntoIterator<Item = TagEvent>,
{
    let mut parser = DocumentParser::new();
    for event in events {
        parser.handle(event)?;
    }
    Ok(parser.finish())
}
