//! # Registry of supported photometric systems
//!
//! Every system GCPD can serve and this crate knows how to transform is declared
//! here as data. The derivation lists fix the evaluation order; bands absent from
//! a system's display list are intermediates (e.g. the Strömgren `v1`, `v2`).
//!
//! Lookup accepts the GCPD identifier or, for identifiers awkward on a command
//! line such as `(RI)Cousins`, the declared alias (`RI_Cousins`).
use std::{collections::HashMap, sync::LazyLock};

use super::{
    band::{Band, Operand, Step},
    system::PhotometricSystem,
};
use crate::{gcpd_errors::GcpdError, raw_table::RowLayout};

const fn col(name: &'static str) -> Operand {
    Operand::Column(name)
}

const fn band(name: &'static str) -> Operand {
    Operand::Band(name)
}

const fn add(operand: Operand) -> Step {
    Step::add(operand)
}

const fn sub(operand: Operand) -> Step {
    Step::sub(operand)
}

// -------------------------------------------------------------------------------------------------
// Johnson family
// -------------------------------------------------------------------------------------------------

const UBV: &[Band] = &[
    Band::column("V", "V"),
    Band::chain("B", band("V"), &[add(col("B-V"))]),
    Band::chain("U", band("B"), &[add(col("U-B"))]),
];

const UBVRI: &[Band] = &[
    Band::column("V", "V"),
    Band::chain("B", band("V"), &[add(col("B-V"))]),
    Band::chain("U", band("B"), &[add(col("U-B"))]),
    Band::chain("R", band("V"), &[sub(col("V-R"))]),
    Band::chain("I", band("R"), &[sub(col("R-I"))]),
];

const IJHKLMN: &[Band] = &[
    Band::column("J", "J"),
    Band::column("H", "H"),
    Band::column("K", "K"),
    Band::column("L", "L"),
    Band::column("M", "M"),
    Band::column("N", "N"),
];

/// V, R, I where R and I fall back to tabulated magnitudes (Eggen and Kron).
const VRI_WITH_FALLBACK: &[Band] = &[
    Band::column("V", "V"),
    Band::chain("R", band("V"), &[sub(col("V-R"))]).with_fallback("R"),
    Band::chain("I", band("R"), &[sub(col("R-I"))]).with_fallback("I"),
];

const RI_COUSINS: &[Band] = &[
    Band::column("V", "V"),
    Band::chain("B", band("V"), &[add(col("B-V"))]),
    Band::chain("U", band("B"), &[add(col("U-B"))]),
    Band::chain("I", band("V"), &[sub(col("V-I"))]),
    Band::chain("R", band("I"), &[add(col("R-I"))]),
];

// -------------------------------------------------------------------------------------------------
// Medium and narrow band systems
// -------------------------------------------------------------------------------------------------

const VILNIUS: &[Band] = &[
    Band::column("V", "V"),
    Band::chain("S", band("V"), &[sub(col("V-S"))]),
    Band::chain("Z", band("V"), &[add(col("Z-V"))]),
    Band::chain("Y", band("Z"), &[add(col("Y-Z"))]),
    Band::chain("X", band("Y"), &[add(col("X-Y"))]),
    Band::chain("P", band("X"), &[add(col("P-X"))]),
    Band::chain("U", band("P"), &[add(col("U-P"))]),
];

// m1 = (v-b) - (b-y), c1 = (u-v) - (v-b)
const STROMGREN: &[Band] = &[
    Band::column("y", "V"),
    Band::chain("b", band("y"), &[add(col("b-y"))]),
    Band::chain("v2", band("b"), &[add(col("m1"))]),
    Band::chain("v1", band("b"), &[sub(band("y"))]),
    Band::chain("v", band("v1"), &[add(band("v2"))]),
    Band::chain("u2", col("c1"), &[add(band("v"))]),
    Band::chain("u1", band("v"), &[sub(band("b"))]),
    Band::chain("u", band("u1"), &[add(band("u2"))]),
    Band::column("beta", "beta"),
];

const GENEVA: &[Band] = &[
    Band::column("V", "VM"),
    Band::chain("B", band("V"), &[sub(col("V"))]),
    Band::chain("U", band("B"), &[add(col("U"))]),
    Band::chain("B1", band("B"), &[add(col("B1"))]),
    Band::chain("B2", band("B"), &[add(col("B2"))]),
    Band::chain("V1", band("B"), &[add(col("V1"))]),
    Band::chain("G", band("B"), &[add(col("G"))]),
];

const WALRAVEN: &[Band] = &[
    Band::column("V", "V"),
    Band::chain("B", band("V"), &[add(col("V-B"))]),
    Band::chain("U", band("B"), &[sub(col("B-U"))]),
    Band::chain("W", band("U"), &[sub(col("U-W"))]),
    Band::chain("L", band("B"), &[sub(col("B-L"))]),
];

const DDO: &[Band] = &[
    Band::column("m48", "V48"),
    Band::chain("m51", band("m48"), &[sub(col("C4851"))]),
    Band::chain("m45", band("m48"), &[add(col("C4548"))]),
    Band::chain("m42", band("m45"), &[add(col("C4245"))]),
    Band::chain("m41", band("m42"), &[add(col("C4142"))]),
    Band::chain("m38", band("m41"), &[add(col("C3841"))]),
    Band::chain("m35", band("m38"), &[add(col("C3538"))]),
];

const OJA: &[Band] = &[
    Band::column("m45", "m45"),
    Band::chain("m42", band("m45"), &[add(col("ge"))]),
    Band::chain("m41", band("m42"), &[add(col("ce"))]),
];

// m52 is corrected by the 52-52 index only after the blue bands are derived.
const THIRTEEN_COLOR: &[Band] = &[
    Band::column("m52raw", "52"),
    Band::chain("m33", band("m52raw"), &[add(col("33-52"))]),
    Band::chain("m35", band("m52raw"), &[add(col("35-52"))]),
    Band::chain("m37", band("m52raw"), &[add(col("37-52"))]),
    Band::chain("m40", band("m52raw"), &[add(col("40-52"))]),
    Band::chain("m45", band("m52raw"), &[add(col("45-52"))]),
    Band::chain("m52", band("m52raw"), &[add(col("52-52"))]),
    Band::chain("m63", band("m52"), &[add(col("63-52"))]),
    Band::chain("m58", band("m52"), &[add(col("58-52"))]),
    Band::chain("m72", band("m58"), &[sub(col("72-58"))]),
    Band::chain("m80", band("m58"), &[sub(col("80-58"))]),
    Band::chain("m86", band("m58"), &[sub(col("86-58"))]),
    Band::chain("m99", band("m58"), &[sub(col("99-58"))]),
    Band::chain("m110", band("m58"), &[sub(col("110-58"))]),
];

const ALEXANDER: &[Band] = &[
    Band::column("m746", "7460"),
    Band::chain("m608", band("m746"), &[add(col("6076-7460"))]),
    Band::chain("m710", band("m746"), &[add(col("7100-7460"))]),
    Band::chain("m683", band("m710"), &[add(col("6830-7100"))]),
];

const WBVR: &[Band] = &[
    Band::column("V", "V"),
    Band::chain("B", band("V"), &[add(col("B-V"))]),
    Band::chain("W", band("B"), &[add(col("W-B"))]),
    Band::chain("R", band("V"), &[sub(col("V-R"))]),
];

const WASHINGTON: &[Band] = &[
    Band::column("V", "V"),
    Band::chain("T1", band("V"), &[sub(col("V-T1"))]),
    Band::chain("M", band("T1"), &[add(col("M-T1"))]),
    Band::chain("C", band("M"), &[add(col("C-M"))]),
    Band::chain("T2", band("T1"), &[sub(col("T1-T2"))]),
];

const fn system(
    id: &'static str,
    common_name: &'static str,
    derivations: &'static [Band],
    bands: &'static [&'static str],
) -> PhotometricSystem {
    PhotometricSystem {
        id,
        alias: None,
        common_name,
        layout: RowLayout::TabSeparated,
        derivations,
        bands,
    }
}

const fn aliased(mut system: PhotometricSystem, alias: &'static str) -> PhotometricSystem {
    system.alias = Some(alias);
    system
}

/// All supported systems.
pub static SYSTEMS: &[PhotometricSystem] = &[
    system("UBV", "Johnson", UBV, &["U", "B", "V"]),
    system("UBVE", "Johnson", UBV, &["U", "B", "V"]),
    system("UBVRI", "Johnson", UBVRI, &["U", "B", "V", "R", "I"]),
    system(
        "IJHKLMN",
        "Johnson",
        IJHKLMN,
        &["J", "H", "K", "L", "M", "N"],
    ),
    aliased(
        system("(RI)Eggen", "Eggen", VRI_WITH_FALLBACK, &["V", "R", "I"]),
        "RI_Eggen",
    ),
    aliased(
        system("(RI)Kron", "Kron", VRI_WITH_FALLBACK, &["V", "R", "I"]),
        "RI_Kron",
    ),
    aliased(
        system(
            "(RI)Cousins",
            "Cousins",
            RI_COUSINS,
            &["U", "B", "V", "R", "I"],
        ),
        "RI_Cousins",
    ),
    system(
        "Vilnius",
        "Vilnius",
        VILNIUS,
        &["U", "P", "X", "Y", "Z", "V", "S"],
    ),
    system(
        "Straizys",
        "Straizys",
        VILNIUS,
        &["U", "P", "X", "Y", "Z", "V", "S"],
    ),
    system("uvby", "Stromgren", STROMGREN, &["u", "b", "v", "y", "beta"]),
    system(
        "Geneva",
        "Geneva",
        GENEVA,
        &["V", "B", "U", "B1", "B2", "V1", "G"],
    ),
    system("Walraven", "Walraven", WALRAVEN, &["V", "B", "L", "U", "W"]),
    system(
        "DDO",
        "DDO",
        DDO,
        &["m48", "m51", "m45", "m42", "m41", "m38", "m35"],
    ),
    system("Oja", "Oja", OJA, &["m45", "m42", "m41"]),
    system(
        "13-color",
        "13-color",
        THIRTEEN_COLOR,
        &[
            "m52", "m33", "m35", "m37", "m40", "m45", "m63", "m58", "m72", "m80", "m86", "m99",
            "m110",
        ],
    ),
    PhotometricSystem {
        id: "Alexander",
        alias: None,
        common_name: "Alexander",
        layout: RowLayout::NumberedWhitespace,
        derivations: ALEXANDER,
        bands: &["m746", "m608", "m683", "m710"],
    },
    system("WBVR", "WBVR", WBVR, &["W", "B", "V", "R"]),
    system(
        "Washington",
        "Washington",
        WASHINGTON,
        &["V", "C", "M", "T1", "T2"],
    ),
];

/// Read-only lookup table over [`SYSTEMS`], keyed by identifier and alias.
pub struct SystemRegistry {
    by_name: HashMap<&'static str, &'static PhotometricSystem>,
}

static REGISTRY: LazyLock<SystemRegistry> = LazyLock::new(SystemRegistry::build);

impl SystemRegistry {
    fn build() -> Self {
        let mut by_name = HashMap::new();
        for system in SYSTEMS {
            by_name.insert(system.id, system);
            if let Some(alias) = system.alias {
                by_name.insert(alias, system);
            }
        }
        SystemRegistry { by_name }
    }

    /// The process-wide registry.
    pub fn global() -> &'static SystemRegistry {
        &REGISTRY
    }

    /// Exact-match lookup on identifier or alias.
    pub fn get(&self, name: &str) -> Result<&'static PhotometricSystem, GcpdError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| GcpdError::UnknownSystem(name.to_string()))
    }

    pub fn systems(&self) -> impl Iterator<Item = &'static PhotometricSystem> {
        SYSTEMS.iter()
    }

    /// Names offered to users, one per system (alias preferred).
    pub fn supported_names(&self) -> Vec<&'static str> {
        SYSTEMS.iter().map(PhotometricSystem::key).collect()
    }
}

/// Look up a system in the global registry.
pub fn lookup(name: &str) -> Result<&'static PhotometricSystem, GcpdError> {
    SystemRegistry::global().get(name)
}
