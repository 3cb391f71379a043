//! # Star name → GCPD catalog identifier
//!
//! GCPD indexes stars by a fixed-width numeric code made of a **catalog prefix**
//! followed by the **zero-padded star number** (six digits):
//!
//! ```text
//! 0100BBBBBB : HD, HDE and HDC
//! 0150BBBBBB : SAO
//! 0160BBBBBB : Hipparcos (HIP, HIC)
//! 0170BBBBBB : PPM
//! ```
//!
//! Names whose leading non-digit part is not one of the catalogs above are passed
//! through unchanged: GCPD accepts some identifiers verbatim (e.g. `-206700604`),
//! so an unrecognized prefix is never an error.
//!
//! ## Example
//!
//! ```rust
//! use gcpd::catalog::normalize_star_name;
//!
//! assert_eq!(normalize_star_name("HD174881"), "0100174881");
//! assert_eq!(normalize_star_name("HIP1"), "0160000001");
//! assert_eq!(normalize_star_name("Vega"), "Vega");
//! ```
use std::sync::LazyLock;

use regex::Regex;

static STAR_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<catalog>\D*)(?P<number>\d+)").expect("star name pattern is valid")
});

/// Star catalogs known to the GCPD numbering scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catalog {
    HenryDraper,
    Sao,
    Hipparcos,
    Ppm,
}

impl Catalog {
    /// Resolve a catalog from the literal name prefix (case-sensitive, no trimming).
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "HD" | "HDE" | "HDC" => Some(Catalog::HenryDraper),
            "SAO" => Some(Catalog::Sao),
            "HIP" | "HIC" => Some(Catalog::Hipparcos),
            "PPM" => Some(Catalog::Ppm),
            _ => None,
        }
    }

    /// Numeric code placed in front of the star number.
    pub fn code(&self) -> &'static str {
        match self {
            Catalog::HenryDraper => "0100",
            Catalog::Sao => "0150",
            Catalog::Hipparcos => "0160",
            Catalog::Ppm => "0170",
        }
    }
}

/// Normalize a free-text star name into the GCPD catalog identifier.
///
/// Arguments
/// -----------------
/// * `star_name`: a name such as `"HD174881"` or `"SAO 12"`; the catalog part must be
///   written exactly as in the table above (no separator between catalog and number).
///
/// Return
/// ----------
/// * The identifier `"<code><number padded to 6 digits>"`, or the input unchanged when
///   no catalog is recognized or the number does not fit.
pub fn normalize_star_name(star_name: &str) -> String {
    let Some(captures) = STAR_NAME.captures(star_name) else {
        return star_name.to_string();
    };

    let catalog = Catalog::from_prefix(&captures["catalog"]);
    let number = captures["number"].parse::<u64>().ok();

    match (catalog, number) {
        (Some(catalog), Some(number)) => format!("{}{number:06}", catalog.code()),
        _ => star_name.to_string(),
    }
}

#[cfg(test)]
mod catalog_test {
    use super::*;

    #[test]
    fn test_known_catalogs() {
        assert_eq!(normalize_star_name("HD174881"), "0100174881");
        assert_eq!(normalize_star_name("HDE226868"), "0100226868");
        assert_eq!(normalize_star_name("HDC42"), "0100000042");
        assert_eq!(normalize_star_name("SAO123"), "0150000123");
        assert_eq!(normalize_star_name("HIP1"), "0160000001");
        assert_eq!(normalize_star_name("HIC91262"), "0160091262");
        assert_eq!(normalize_star_name("PPM7"), "0170000007");
    }

    #[test]
    fn test_pass_through() {
        assert_eq!(normalize_star_name("XYZ123"), "XYZ123");
        assert_eq!(normalize_star_name("Vega"), "Vega");
        assert_eq!(normalize_star_name("-206700604"), "-206700604");
        // the separator is part of the catalog prefix, which is then unknown
        assert_eq!(normalize_star_name("HD 174881"), "HD 174881");
        assert_eq!(normalize_star_name(""), "");
    }

    #[test]
    fn test_trailing_text_is_ignored() {
        assert_eq!(normalize_star_name("HD432A"), "0100000432");
    }

    #[test]
    fn test_wide_numbers_are_not_truncated() {
        assert_eq!(normalize_star_name("HD12345678"), "010012345678");
    }
}
