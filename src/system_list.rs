//! # Systems available for a star
//!
//! The GCPD index page answers "which photometric systems have data for this star"
//! with a table. Its first row holds header cells (`<th>`) naming the columns; each
//! later row links every system through hyperlinked cells. The values of the
//! `Designation` column are the system identifiers accepted by the photometry query,
//! those of the `System` column are the GCPD system numbers.
use log::debug;
use serde::Serialize;

use crate::{
    constants::{DESIGNATION_HEADER, SYSTEM_HEADER},
    gcpd_errors::GcpdError,
    markup::{TagEvent, TagEventSource},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SystemList {
    pub designations: Vec<String>,
    pub system_numbers: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Outside,
    Header,
    Data,
}

#[derive(Debug, Clone)]
pub struct SystemListParser {
    in_table: bool,
    in_row: bool,
    in_link: bool,
    cell: Cell,
    row: usize,
    column: usize,
    descriptions: Vec<String>,
    list: SystemList,
}

impl Default for SystemListParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemListParser {
    pub fn new() -> Self {
        SystemListParser {
            in_table: false,
            in_row: false,
            in_link: false,
            cell: Cell::Outside,
            row: 0,
            column: 0,
            descriptions: Vec::new(),
            list: SystemList::default(),
        }
    }

    fn in_description_row(&self) -> bool {
        self.in_table && self.in_row && self.row == 0
    }

    pub fn handle(&mut self, event: TagEvent) -> Result<(), GcpdError> {
        match event {
            TagEvent::Open { name, .. } => match name.as_str() {
                "table" => self.in_table = true,
                "tr" => self.in_row = true,
                "th" => self.cell = Cell::Header,
                "td" => self.cell = Cell::Data,
                "a" => self.in_link = true,
                _ => {}
            },
            TagEvent::Close { name } => match name.as_str() {
                "table" => self.in_table = false,
                "tr" => {
                    self.column = 0;
                    self.row += 1;
                    self.in_row = false;
                }
                "th" => {
                    if self.cell != Cell::Header {
                        return Err(GcpdError::ParseState("end of th without start".into()));
                    }
                    self.cell = Cell::Outside;
                }
                "td" => {
                    if self.cell != Cell::Data {
                        return Err(GcpdError::ParseState("end of td without start".into()));
                    }
                    self.cell = Cell::Outside;
                    self.column += 1;
                }
                "a" => self.in_link = false,
                _ => {}
            },
            TagEvent::Text(text) => self.text(&text),
        }
        Ok(())
    }

    fn text(&mut self, text: &str) {
        if self.cell == Cell::Header && self.in_description_row() {
            self.descriptions.push(text.trim().to_string());
            return;
        }

        // header row and cells outside a table never hold systems
        if self.cell != Cell::Data || !self.in_link || !self.in_table || self.row == 0 {
            return;
        }

        match self.descriptions.get(self.column).map(String::as_str) {
            Some(DESIGNATION_HEADER) => self.list.designations.push(text.trim().to_string()),
            Some(SYSTEM_HEADER) => self.list.system_numbers.push(text.trim().to_string()),
            _ => {}
        }
    }

    /// Consume the parser; fails with [`GcpdError::NoData`] when no designation was found.
    pub fn finish(self) -> Result<SystemList, GcpdError> {
        debug!(
            "system list: columns {:?}, {} designations",
            self.descriptions,
            self.list.designations.len()
        );
        if self.list.designations.is_empty() {
            return Err(GcpdError::NoData("no photometric system listed".into()));
        }
        Ok(self.list)
    }
}

/// Extract the system list from the index page markup.
pub fn parse_system_list(markup: &str) -> Result<SystemList, GcpdError> {
    let mut parser = SystemListParser::new();
    for event in TagEventSource::new(markup) {
        parser.handle(event?)?;
    }
    parser.finish()
}
