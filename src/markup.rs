//! # Tag event source
//!
//! Turns the loosely marked-up text served by GCPD into a flat stream of
//! [`TagEvent`]s. The documents are HTML fragments written by hand-made CGI
//! scripts: unclosed `<hr>`/`<br>`, unquoted attributes and stray closing tags
//! are common, so the tokenizer runs [`quick_xml`] in its most lenient
//! configuration and never checks nesting. Nesting invariants that matter
//! are enforced by the consumers ([`crate::document::parser`] and
//! [`crate::system_list`]).
//!
//! ## Event normalization
//! -----------------
//! * Tag names are lower-cased.
//! * `<x/>` yields `Open` then `Close`, except for void elements which only yield `Open`.
//! * Comments, doctype, declarations and processing instructions are dropped.
//! * Text and CDATA are delivered as [`TagEvent::Text`]; known entities are unescaped,
//!   unknown ones are kept verbatim.
use std::borrow::Cow;

use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};

use crate::gcpd_errors::GcpdError;

const VOID_ELEMENTS: [&str; 6] = ["hr", "br", "img", "meta", "link", "input"];

/// One markup event.
#[derive(Debug, Clone, PartialEq)]
pub enum TagEvent {
    Open {
        name: String,
        attributes: Vec<(String, String)>,
    },
    Close {
        name: String,
    },
    Text(String),
}

impl TagEvent {
    /// Convenience constructor for an opening tag without attributes.
    pub fn open(name: &str) -> Self {
        TagEvent::Open {
            name: name.to_string(),
            attributes: Vec::new(),
        }
    }

    pub fn close(name: &str) -> Self {
        TagEvent::Close {
            name: name.to_string(),
        }
    }

    pub fn text(text: &str) -> Self {
        TagEvent::Text(text.to_string())
    }

    /// Opening tag carrying a single attribute.
    pub fn open_with(name: &str, key: &str, value: &str) -> Self {
        TagEvent::Open {
            name: name.to_string(),
            attributes: vec![(key.to_string(), value.to_string())],
        }
    }
}

/// Value of the attribute `key` (case-insensitive) in an attribute list.
pub fn attribute<'a>(attributes: &'a [(String, String)], key: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v.as_str())
}

/// Iterator of [`TagEvent`]s over a markup string.
///
/// The iterator stops after the first tokenizer error, which it yields as
/// [`GcpdError::MalformedMarkup`].
pub struct TagEventSource<'a> {
    reader: Reader<&'a [u8]>,
    pending_close: Option<String>,
    finished: bool,
}

impl<'a> TagEventSource<'a> {
    pub fn new(markup: &'a str) -> Self {
        let mut reader = Reader::from_str(markup);
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        config.expand_empty_elements = false;

        TagEventSource {
            reader,
            pending_close: None,
            finished: false,
        }
    }

    fn lossy(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    fn tag_name(start: &BytesStart) -> String {
        Self::lossy(start.name().as_ref()).to_ascii_lowercase()
    }

    fn attributes(start: &BytesStart) -> Vec<(String, String)> {
        start
            .html_attributes()
            .filter_map(Result::ok)
            .map(|attr| {
                let key = Self::lossy(attr.key.as_ref()).to_ascii_lowercase();
                let value = attr
                    .unescape_value()
                    .map(Cow::into_owned)
                    .unwrap_or_else(|_| Self::lossy(&attr.value));
                (key, value)
            })
            .collect()
    }

    fn open_event(start: &BytesStart) -> TagEvent {
        TagEvent::Open {
            name: Self::tag_name(start),
            attributes: Self::attributes(start),
        }
    }
}

impl Iterator for TagEventSource<'_> {
    type Item = Result<TagEvent, GcpdError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(name) = self.pending_close.take() {
            return Some(Ok(TagEvent::Close { name }));
        }

        while !self.finished {
            let event = match self.reader.read_event() {
                Ok(event) => event,
                Err(err) => {
                    self.finished = true;
                    let position = self.reader.buffer_position();
                    return Some(Err(GcpdError::MalformedMarkup(format!(
                        "{err} at byte {position}"
                    ))));
                }
            };

            match event {
                Event::Start(start) => return Some(Ok(Self::open_event(&start))),
                Event::Empty(start) => {
                    let name = Self::tag_name(&start);
                    if !VOID_ELEMENTS.contains(&name.as_str()) {
                        self.pending_close = Some(name);
                    }
                    return Some(Ok(Self::open_event(&start)));
                }
                Event::End(end) => {
                    let name = Self::lossy(end.name().as_ref()).to_ascii_lowercase();
                    return Some(Ok(TagEvent::Close { name }));
                }
                Event::Text(text) => {
                    let content = text
                        .unescape()
                        .map(Cow::into_owned)
                        .unwrap_or_else(|_| Self::lossy(&text));
                    return Some(Ok(TagEvent::Text(content)));
                }
                Event::CData(cdata) => {
                    return Some(Ok(TagEvent::Text(Self::lossy(&cdata.into_inner()))));
                }
                Event::Eof => self.finished = true,
                _ => {}
            }
        }

        None
    }
}

/// Tokenize a whole document.
pub fn tokenize(markup: &str) -> Result<Vec<TagEvent>, GcpdError> {
    TagEventSource::new(markup).collect()
}
