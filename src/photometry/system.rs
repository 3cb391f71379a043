use std::collections::BTreeSet;

use serde::Serialize;

use super::band::{Band, Operand};
use crate::raw_table::RowLayout;

/// A photometric system: how GCPD names it, how its rows are laid out, and how each
/// band is derived from the tabulated colour indices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhotometricSystem {
    /// Identifier used by GCPD (`phot` query parameter).
    pub id: &'static str,
    /// Name usable on a command line when `id` is not.
    pub alias: Option<&'static str>,
    /// Name printed next to each magnitude.
    pub common_name: &'static str,
    pub layout: RowLayout,
    /// Derivations in evaluation order, hidden intermediates included.
    pub derivations: &'static [Band],
    /// Bands reported, in display order.
    pub bands: &'static [&'static str],
}

impl PhotometricSystem {
    /// Name under which the system is offered to users: the alias when there is one.
    pub fn key(&self) -> &'static str {
        self.alias.unwrap_or(self.id)
    }

    pub fn derivation(&self, band: &str) -> Option<&'static Band> {
        self.derivations.iter().find(|b| b.name == band)
    }

    /// Raw columns a band depends on, following band operands transitively.
    pub fn dependencies(&self, band: &str) -> BTreeSet<&'static str> {
        let mut columns = BTreeSet::new();
        let mut stack = vec![band];
        let mut seen = BTreeSet::new();

        while let Some(name) = stack.pop() {
            if !seen.insert(name) {
                continue;
            }
            let Some(derivation) = self.derivation(name) else {
                continue;
            };
            columns.extend(derivation.direct_columns());
            stack.extend(derivation.operands().filter_map(|operand| match operand {
                Operand::Band(name) => Some(name),
                Operand::Column(_) => None,
            }));
        }
        columns
    }

    /// Every raw column read by the system.
    pub fn columns(&self) -> BTreeSet<&'static str> {
        self.derivations
            .iter()
            .flat_map(|band| band.direct_columns())
            .collect()
    }
}
