//! Row-wise evaluation of a system's derivations over a [`RawTable`].
use std::collections::HashMap;

use log::{debug, warn};
use serde::Serialize;

use super::{
    band::{parse_value, Operand},
    system::PhotometricSystem,
};
use crate::{
    constants::{BandValues, Magnitude},
    raw_table::RawTable,
};

/// Computed magnitudes of one system, one sequence per displayed band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandTable {
    pub system: &'static str,
    pub common_name: &'static str,
    pub n_rows: usize,
    pub bands: Vec<(&'static str, BandValues)>,
}

impl BandTable {
    pub fn get(&self, band: &str) -> Option<&[Magnitude]> {
        self.bands
            .iter()
            .find(|(name, _)| *name == band)
            .map(|(_, values)| values.as_slice())
    }

    /// `(band, value)` pairs in display order, band-major.
    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, Magnitude)> + '_ {
        self.bands
            .iter()
            .flat_map(|(name, values)| values.iter().map(move |value| (*name, *value)))
    }

    /// Number of non-missing values over all bands.
    pub fn count_values(&self) -> usize {
        self.pairs().filter(|(_, value)| value.is_some()).count()
    }
}

/// Compute every band of `system` from `table`.
///
/// Arguments
/// -----------------
/// * `system`: the system whose derivations are evaluated in declaration order.
/// * `table`: the raw cells; a column the system needs but the table lacks reads as
///   missing on every row.
///
/// Return
/// ----------
/// * A [`BandTable`] holding, for each displayed band, exactly `table.n_rows()` values.
///   The computation is pure: identical inputs give bit-identical outputs.
pub fn transform(system: &'static PhotometricSystem, table: &RawTable) -> BandTable {
    let n_rows = table.n_rows();

    for column in system.columns() {
        if !table.has_column(column) {
            warn!("{}: column {column:?} absent from the table", system.id);
        }
    }

    let parsed: HashMap<&str, BandValues> = system
        .columns()
        .into_iter()
        .map(|column| {
            let values = (0..n_rows)
                .map(|row| parse_value(table.cell(column, row)))
                .collect();
            (column, values)
        })
        .collect();

    let mut computed: HashMap<&str, BandValues> = HashMap::new();
    for derivation in system.derivations {
        let values = (0..n_rows)
            .map(|row| {
                derivation.evaluate(|operand| match operand {
                    Operand::Column(name) => parsed.get(name).and_then(|v| v[row]),
                    Operand::Band(name) => computed.get(name).and_then(|v| v[row]),
                })
            })
            .collect::<BandValues>();

        debug!(
            "{}: band {} has {} values",
            system.id,
            derivation.name,
            values.iter().flatten().count()
        );
        computed.insert(derivation.name, values);
    }

    let bands = system
        .bands
        .iter()
        .map(|name| {
            let values = computed
                .remove(name)
                .unwrap_or_else(|| vec![None; n_rows]);
            (*name, values)
        })
        .collect();

    BandTable {
        system: system.id,
        common_name: system.common_name,
        n_rows,
        bands,
    }
}
