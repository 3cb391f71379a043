//! Event-driven extraction of metadata, data block and references.
//!
//! [`DocumentParser`] is a single state record fed one [`TagEvent`] at a time.
//! The state is split into orthogonal parts so that impossible combinations
//! cannot be expressed:
//!
//! * [`SectionTracker`] – which section of the page the stream is in,
//! * [`Inline`] – whether text is currently emphasized (a label), inside a heading,
//!   or both,
//! * [`Block`] – whether a preformatted block is open, and the reference it builds,
//! * [`Pending`] – whether a label is waiting for its value.
//!
//! Only the first text payload that follows a label inside a preformatted block of
//! the data section is kept as the measurement blob; wide systems spreading their table over several
//! preformatted blocks are therefore only partially read.
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use super::{
    section::{Section, SectionTracker},
    DataBlock, MetadataKey, ParsedDocument, Reference,
};
use crate::{
    constants::{BIBCODE_LABEL, BIBCODE_URL_KEY, NO_DATA_MARKER, SECTION_ANCHOR},
    gcpd_errors::GcpdError,
    markup::{attribute, TagEvent},
};

static NO_DATA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("(?i){}", regex::escape(NO_DATA_MARKER)))
        .expect("no-data pattern is valid")
});

/// Inline spans currently open. Emphasis may nest inside a heading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Inline {
    emphasis: bool,
    heading: bool,
}

#[derive(Debug, Clone, PartialEq)]
enum Block {
    Outside,
    /// An open `<pre>`; carries the reference under construction when opened in the
    /// reference section.
    Preformatted { reference: Option<Reference> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Idle,
    AwaitingValue,
}

#[derive(Debug, Clone)]
pub struct DocumentParser {
    sections: SectionTracker,
    inline: Inline,
    block: Block,
    pending: Pending,
    /// Most recent emphasized text, kept verbatim.
    label: Option<String>,
    /// First text payload following a label in a data section `<pre>`.
    blob: Option<String>,
    document: ParsedDocument,
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentParser {
    pub fn new() -> Self {
        DocumentParser {
            sections: SectionTracker::new(),
            inline: Inline::default(),
            block: Block::Outside,
            pending: Pending::Idle,
            label: None,
            blob: None,
            document: ParsedDocument::default(),
        }
    }

    /// Current section of the stream.
    pub fn section(&self) -> Section {
        self.sections.section()
    }

    /// Feed one event.
    ///
    /// Return
    /// ----------
    /// * `Ok(())` when the event was consumed,
    /// * [`GcpdError::NoData`] when the text carries the no-data marker,
    /// * [`GcpdError::ParseState`] when a close tag has no matching open tag.
    pub fn handle(&mut self, event: TagEvent) -> Result<(), GcpdError> {
        match event {
            TagEvent::Open { name, attributes } => {
                self.open(&name, &attributes);
                Ok(())
            }
            TagEvent::Close { name } => self.close(&name),
            TagEvent::Text(text) => self.text(&text),
        }
    }

    /// Consume the parser and return what was extracted.
    pub fn finish(self) -> ParsedDocument {
        if self.document.data.is_none() {
            debug!(
                "no data block captured ({} separators, anchor {:?})",
                self.sections.separators(),
                self.sections.anchor()
            );
        }
        self.document
    }

    fn open(&mut self, name: &str, attributes: &[(String, String)]) {
        match name {
            "hr" => {
                self.sections.separator();
                // labels never carry over a section boundary
                self.pending = Pending::Idle;
                debug!(
                    "separator {} -> {:?}",
                    self.sections.separators(),
                    self.section()
                );
            }
            "b" => {
                self.inline.emphasis = true;
                self.pending = Pending::AwaitingValue;
            }
            "h3" => self.inline.heading = true,
            "pre" => {
                let reference = (self.section() == Section::References).then(Reference::new);
                self.block = Block::Preformatted { reference };
            }
            "a" => self.link(attributes),
            _ => {}
        }
    }

    fn link(&mut self, attributes: &[(String, String)]) {
        let waiting_for_bibcode = self.pending == Pending::AwaitingValue
            && self
                .label
                .as_deref()
                .is_some_and(|label| label.eq_ignore_ascii_case(BIBCODE_LABEL));
        if !waiting_for_bibcode {
            return;
        }

        let Block::Preformatted {
            reference: Some(reference),
        } = &mut self.block
        else {
            return;
        };

        // a target ending with a bare '?' is a query without parameters
        match attribute(attributes, "href") {
            Some(url) if !url.is_empty() && !url.ends_with('?') => {
                reference.insert(BIBCODE_URL_KEY, url)
            }
            _ => {}
        }
    }

    fn close(&mut self, name: &str) -> Result<(), GcpdError> {
        match name {
            "b" => {
                if !self.inline.emphasis {
                    return Err(GcpdError::ParseState(
                        "end of emphasized text without start".into(),
                    ));
                }
                self.inline.emphasis = false;
            }
            "h3" => {
                if !self.inline.heading {
                    return Err(GcpdError::ParseState("end of heading without start".into()));
                }
                self.inline.heading = false;
            }
            "pre" => {
                let Block::Preformatted { reference } =
                    std::mem::replace(&mut self.block, Block::Outside)
                else {
                    return Err(GcpdError::ParseState(
                        "end of preformatted block without start".into(),
                    ));
                };
                self.end_preformatted(reference);
            }
            _ => {}
        }
        Ok(())
    }

    fn end_preformatted(&mut self, reference: Option<Reference>) {
        match self.section() {
            Section::Data => {
                if self.document.data.is_some() {
                    return;
                }
                if let Some(body) = self.blob.clone() {
                    let header = self.label.clone().unwrap_or_default();
                    debug!("data block captured with header {header:?}");
                    self.document.data = Some(DataBlock { header, body });
                }
            }
            Section::References => {
                if let Some(reference) = reference {
                    self.document.references.push(reference);
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) -> Result<(), GcpdError> {
        if NO_DATA.is_match(text) {
            return Err(GcpdError::NoData(text.trim().to_string()));
        }

        if self.inline.emphasis {
            self.label = Some(text.to_string());
        }
        if self.inline.heading && text.trim().eq_ignore_ascii_case(SECTION_ANCHOR) {
            self.sections.anchor_here();
            debug!("section anchor at separator {}", self.sections.separators());
        }

        if self.pending == Pending::AwaitingValue && !self.inline.emphasis {
            self.value(text);
        }
        Ok(())
    }

    fn value(&mut self, text: &str) {
        let value = text.trim();
        let Some(label) = self.label.clone() else {
            return;
        };

        let metadata_key = MetadataKey::from_label(&label);
        if let Some(key) = metadata_key.filter(|_| !value.is_empty()) {
            self.document.set_metadata(key, value);
        }

        match self.section() {
            Section::Metadata => {
                if metadata_key.is_some() && !value.is_empty() {
                    self.pending = Pending::Idle;
                }
            }
            Section::Data => {
                if self.block == Block::Outside {
                    return;
                }
                self.pending = Pending::Idle;
                if self.blob.is_none() {
                    self.blob = Some(text.to_string());
                }
            }
            Section::References => {
                if value.is_empty() {
                    return;
                }
                self.pending = Pending::Idle;
                match &mut self.block {
                    Block::Preformatted {
                        reference: Some(reference),
                    } => reference.insert(&label, value),
                    _ => debug!("reference field {label:?} outside of a reference block"),
                }
            }
            Section::Trailing => {}
        }
    }
}

#[cfg(test)]
mod parser_test {
    use super::*;
    use crate::document::parse_events;

    fn e(events: &[TagEvent]) -> Vec<TagEvent> {
        events.to_vec()
    }

    fn labelled(label: &str, value: &str) -> Vec<TagEvent> {
        vec![
            TagEvent::open("b"),
            TagEvent::text(label),
            TagEvent::close("b"),
            TagEvent::text(value),
        ]
    }

    /// hr, anchor heading, metadata, hr, data block, hr, one reference, hr.
    fn sample_events() -> Vec<TagEvent> {
        let mut events = e(&[
            TagEvent::open("hr"),
            TagEvent::open("h3"),
            TagEvent::text(" Selection: "),
            TagEvent::close("h3"),
        ]);
        events.extend(labelled("Star Name:", " HD 184313\n"));
        events.extend(labelled("Nb Sources:", " 2 "));
        events.push(TagEvent::open("hr"));
        events.push(TagEvent::open("pre"));
        events.extend(labelled("V\tB-V\tU-B", "\n6.33\t1.57\t1.45\n6.45\t1.68\n"));
        events.push(TagEvent::close("pre"));
        events.push(TagEvent::open("hr"));
        events.push(TagEvent::open("pre"));
        events.extend(labelled("Author", "  Wisse P.N.J.\n"));
        events.extend(labelled("Bibcode", " "));
        events.push(TagEvent::open_with(
            "a",
            "href",
            "http://adsabs.harvard.edu/cgi-bin/bib_query?1981A%26AS...44..273W",
        ));
        events.push(TagEvent::text("1981A&AS...44..273W"));
        events.push(TagEvent::close("a"));
        events.push(TagEvent::close("pre"));
        events.push(TagEvent::open("hr"));
        events
    }

    #[test]
    fn test_full_layout() {
        let doc = parse_events(sample_events()).unwrap();

        assert_eq!(doc.metadata(MetadataKey::StarName), Some("HD 184313"));
        assert_eq!(doc.metadata(MetadataKey::NumberOfSources), Some("2"));
        assert_eq!(doc.metadata(MetadataKey::Remark), None);

        let data = doc.data.unwrap();
        assert_eq!(data.header, "V\tB-V\tU-B");
        assert_eq!(data.lines().collect::<Vec<_>>(), vec!["6.33\t1.57\t1.45", "6.45\t1.68"]);

        assert_eq!(doc.references.len(), 1);
        let reference = &doc.references[0];
        assert_eq!(reference.get("Author"), Some("Wisse P.N.J."));
        assert_eq!(reference.get("Bibcode"), Some("1981A&AS...44..273W"));
        assert_eq!(
            reference.get("BibcodeURL"),
            Some("http://adsabs.harvard.edu/cgi-bin/bib_query?1981A%26AS...44..273W")
        );
    }

    #[test]
    fn test_section_is_tracked() {
        let mut parser = DocumentParser::new();
        let events = sample_events();
        parser.handle(events[0].clone()).unwrap();
        assert_eq!(parser.section(), Section::Metadata);
        for event in events.into_iter().skip(1).take(12) {
            parser.handle(event).unwrap();
        }
        assert_eq!(parser.section(), Section::Data);
    }

    #[test]
    fn test_bare_query_link_is_ignored() {
        let mut events = e(&[
            TagEvent::open("h3"),
            TagEvent::text("SELECTION:"),
            TagEvent::close("h3"),
            TagEvent::open("hr"),
            TagEvent::open("hr"),
            TagEvent::open("pre"),
        ]);
        events.extend(labelled("BIBCODE", ""));
        events.push(TagEvent::open_with(
            "a",
            "href",
            "http://adsabs.harvard.edu/cgi-bin/bib_query?",
        ));
        events.push(TagEvent::text("-"));
        events.push(TagEvent::close("a"));
        events.push(TagEvent::close("pre"));

        let doc = parse_events(events).unwrap();
        assert_eq!(doc.references.len(), 1);
        assert_eq!(doc.references[0].get("BibcodeURL"), None);
        assert_eq!(doc.references[0].get("BIBCODE"), Some("-"));
    }

    #[test]
    fn test_only_first_data_blob_is_kept() {
        let mut events = e(&[
            TagEvent::open("h3"),
            TagEvent::text("Selection:"),
            TagEvent::close("h3"),
            TagEvent::open("hr"),
            TagEvent::open("pre"),
        ]);
        events.extend(labelled("52\t33-52", "\n5.0\t0.1\n"));
        events.push(TagEvent::close("pre"));
        events.push(TagEvent::open("pre"));
        events.extend(labelled("58\t72-58", "\n6.0\t0.2\n"));
        events.push(TagEvent::close("pre"));

        let doc = parse_events(events).unwrap();
        let data = doc.data.unwrap();
        assert_eq!(data.header, "52\t33-52");
        assert_eq!(data.body, "\n5.0\t0.1\n");
    }

    #[test]
    fn test_no_data_marker_aborts() {
        let events = e(&[
            TagEvent::open("hr"),
            TagEvent::open("h3"),
            TagEvent::text("No values found for HD 1 in UBV"),
            TagEvent::close("h3"),
        ]);
        let err = parse_events(events).unwrap_err();
        assert!(matches!(err, GcpdError::NoData(_)));

        let events = e(&[TagEvent::text("  ... no VALUES ...")]);
        assert!(matches!(
            parse_events(events).unwrap_err(),
            GcpdError::NoData(_)
        ));
    }

    #[test]
    fn test_unmatched_close_is_a_state_error() {
        for tag in ["b", "h3", "pre"] {
            let err = parse_events(vec![TagEvent::close(tag)]).unwrap_err();
            assert!(matches!(err, GcpdError::ParseState(_)), "tag {tag}");
        }
        // closes of untracked tags are tolerated
        assert!(parse_events(vec![TagEvent::close("td")]).is_ok());
    }

    #[test]
    fn test_empty_value_keeps_label_pending() {
        let mut events = labelled("Rem:", " ");
        events.push(TagEvent::open("br"));
        events.push(TagEvent::text("visual binary"));
        let doc = parse_events(events).unwrap();
        assert_eq!(doc.metadata(MetadataKey::Remark), Some("visual binary"));
    }

    #[test]
    fn test_metadata_value_is_taken_once() {
        let mut events = labelled("Star Code:", " 0100184313 ");
        events.push(TagEvent::text("unrelated"));
        let doc = parse_events(events).unwrap();
        assert_eq!(doc.metadata(MetadataKey::StarCode), Some("0100184313"));
    }

    #[test]
    fn test_emphasized_anchor_inside_heading() {
        let html = "<hr>\n<h3><b>Selection:</b></h3>\n<b>Star Name:</b> HD 1<br>\n<hr>\n\
                    <pre><b>V\tB-V\tU-B</b>\n3.14\t0.20\t0.10\n</pre><hr>";
        let doc = crate::document::parse_document(html).unwrap();
        assert_eq!(doc.metadata(MetadataKey::StarName), Some("HD 1"));
        let data = doc.data.unwrap();
        assert_eq!(data.header, "V\tB-V\tU-B");
        assert_eq!(data.lines().collect::<Vec<_>>(), vec!["3.14\t0.20\t0.10"]);
    }

    #[test]
    fn test_pending_label_does_not_cross_into_data() {
        for head in ["<b>Rem:</b> <br>", "<b>Epoch</b> 2000<br>"] {
            let html = format!(
                "<hr>\n<h3>Selection:</h3>\n<b>Star Name:</b> HD 1<br>\n{head}\n<hr>\n\
                 <pre><b>V\tB-V\tU-B</b>\n3.14\t0.20\t0.10\n</pre>\n<hr>"
            );
            let doc = crate::document::parse_document(&html).unwrap();
            let data = doc.data.unwrap();
            assert_eq!(data.header, "V\tB-V\tU-B", "{head}");
            assert_eq!(
                data.lines().collect::<Vec<_>>(),
                vec!["3.14\t0.20\t0.10"],
                "{head}"
            );
        }
    }

    #[test]
    fn test_data_text_outside_block_is_ignored() {
        let mut events = e(&[
            TagEvent::open("h3"),
            TagEvent::text("Selection:"),
            TagEvent::close("h3"),
            TagEvent::open("hr"),
        ]);
        events.extend(labelled("Note", " see below\n"));
        events.push(TagEvent::open("pre"));
        events.extend(labelled("V", "\n1.0\n"));
        events.push(TagEvent::close("pre"));

        let data = parse_events(events).unwrap().data.unwrap();
        assert_eq!(data.header, "V");
        assert_eq!(data.body, "\n1.0\n");
    }

    #[test]
    fn test_missing_anchor_yields_no_data_block() {
        let mut events = e(&[TagEvent::open("hr"), TagEvent::open("pre")]);
        events.extend(labelled("V", "\n1.0\n"));
        events.push(TagEvent::close("pre"));
        let doc = parse_events(events).unwrap();
        assert!(doc.data.is_none());
        assert!(doc.references.is_empty());
    }
}
