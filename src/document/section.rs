//! Section tracking over the separator markers (`<hr>`) of a photometry document.
//!
//! GCPD pages carry no explicit structure: a heading reading `Selection:` is the
//! only landmark. Its position (the number of separators seen so far) becomes the
//! **anchor**, and the following separators delimit the data table and the
//! bibliography:
//!
//! ```text
//!  separators ≤ anchor   → metadata
//!  separators = anchor+1 → data
//!  separators = anchor+2 → references
//!  beyond                → ignored
//! ```
//!
//! Documents that do not follow this layout are mis-sectioned silently.
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Section {
    Metadata,
    Data,
    References,
    Trailing,
}

#[derive(Debug, Clone, Default)]
pub struct SectionTracker {
    separators: usize,
    anchor: Option<usize>,
}

impl SectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one section separator.
    pub fn separator(&mut self) {
        self.separators += 1;
    }

    /// Anchor the section layout at the current separator count.
    ///
    /// A later anchor heading replaces the earlier one.
    pub fn anchor_here(&mut self) {
        self.anchor = Some(self.separators);
    }

    pub fn separators(&self) -> usize {
        self.separators
    }

    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    /// Section the stream is currently in.
    pub fn section(&self) -> Section {
        let Some(anchor) = self.anchor else {
            return Section::Metadata;
        };

        match self.separators {
            s if s <= anchor => Section::Metadata,
            s if s == anchor + 1 => Section::Data,
            s if s == anchor + 2 => Section::References,
            _ => Section::Trailing,
        }
    }
}
