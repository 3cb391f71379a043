//! # Plain-text report
//!
//! Renders a [`PhotometryResult`] as the line-oriented format consumed by fitting
//! tools: one `M` line per available magnitude, followed by the bibliography as
//! comment lines.
//!
//! ```text
//! # data in UBV photometric system
//! M   HD174881 Johnson U 9.34 0.05 # Johnson U
//! # References:
//! #
//! # Author: Mermilliod J.-C.
//! #
//! ```
use std::fmt;

use crate::{constants::NOMINAL_UNCERTAINTY, document::Reference, gcpd::PhotometryResult};

/// Format `value` like C's `%.4g`.
///
/// Four significant digits, trailing zeros and a trailing decimal point removed;
/// the exponent form is used when the decimal exponent is below -4 or at least 4.
pub fn format_g4(value: f64) -> String {
    const PRECISION: i32 = 4;

    if value.is_nan() {
        return "nan".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.into();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.into();
    }

    // the exponent after rounding to the requested precision
    let scientific = format!("{:.*e}", (PRECISION - 1) as usize, value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..PRECISION).contains(&exponent) {
        let decimals = (PRECISION - 1 - exponent) as usize;
        trim_zeros(&format!("{value:.decimals$}")).to_string()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_zeros(mantissa), exponent.abs())
    }
}

fn trim_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

fn clean(value: &str) -> String {
    value.replace(['\n', '\r', '\t'], " ")
}

/// Bibliography block, one comment paragraph per reference.
pub struct References<'a>(pub &'a [Reference]);

impl fmt::Display for References<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# References:")?;
        writeln!(f, "#")?;
        for reference in self.0 {
            for (key, value) in reference.display_fields() {
                writeln!(f, "# {key}: {}", clean(value))?;
            }
            writeln!(f, "#")?;
        }
        Ok(())
    }
}

/// Report of one [`PhotometryResult`] for the star labelled `target`.
pub struct Report<'a> {
    pub target: &'a str,
    pub result: &'a PhotometryResult,
    pub with_references: bool,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let system = self.result.system;
        let (target, common) = (self.target, system.common_name);
        writeln!(f, "# data in {} photometric system", system.id)?;

        for (band, value) in self.result.bands.pairs() {
            if let Some(value) = value {
                writeln!(
                    f,
                    "M   {target} {common} {band} {} {NOMINAL_UNCERTAINTY} # {common} {band}",
                    format_g4(value)
                )?;
            }
        }

        if self.with_references {
            write!(f, "{}", References(&self.result.document.references))?;
        }
        Ok(())
    }
}

/// Render the report of `result` for the star labelled `target`.
///
/// Arguments
/// -----------------
/// * `target`: label written on each magnitude line, usually the star name as given.
/// * `result`: parsed document and computed bands.
/// * `with_references`: append the bibliography.
///
/// Return
/// ----------
/// * The report text, each line terminated by a newline.
///
/// See also
/// ------------
/// * [`Report`] – the same output through [`fmt::Display`].
pub fn render(target: &str, result: &PhotometryResult, with_references: bool) -> String {
    Report {
        target,
        result,
        with_references,
    }
    .to_string()
}

#[cfg(test)]
mod report_test {
    use super::*;
    use crate::{
        document::ParsedDocument, photometry::engine::transform, photometry::registry::lookup,
        raw_table::RawTable,
    };

    #[test]
    fn test_format_g4() {
        assert_eq!(format_g4(9.35), "9.35");
        assert_eq!(format_g4(10.86), "10.86");
        assert_eq!(format_g4(-0.134), "-0.134");
        assert_eq!(format_g4(0.0), "0");
        assert_eq!(format_g4(3.0), "3");
        assert_eq!(format_g4(12.3456), "12.35");
        assert_eq!(format_g4(123456.0), "1.235e+05");
        assert_eq!(format_g4(0.0001234), "0.0001234");
        assert_eq!(format_g4(0.00001234), "1.234e-05");
        assert_eq!(format_g4(9999.6), "1e+04");
        assert_eq!(format_g4(f64::NAN), "nan");
    }

    #[test]
    fn test_render() {
        let system = lookup("UBV").unwrap();
        let table = RawTable::from_columns([
            ("V", vec!["3.0", ""]),
            ("B-V", vec!["0.5", "0.2"]),
            ("U-B", vec!["0.25", "0.1"]),
        ]);
        let mut reference = Reference::new();
        reference.insert("Author", "Doe\tJ.\nSmith");
        reference.insert("Comment", "hidden");
        reference.insert("BibcodeURL", "http://ads/1");

        let result = PhotometryResult {
            system,
            document: ParsedDocument {
                references: vec![reference],
                ..Default::default()
            },
            bands: transform(system, &table),
        };

        let expected = "# data in UBV photometric system\n\
                        M   HD1 Johnson U 3.75 0.05 # Johnson U\n\
                        M   HD1 Johnson B 3.5 0.05 # Johnson B\n\
                        M   HD1 Johnson V 3 0.05 # Johnson V\n";
        assert_eq!(render("HD1", &result, false), expected);

        let with_refs = render("HD1", &result, true);
        assert!(with_refs.starts_with(expected));
        assert!(with_refs.ends_with(
            "# References:\n#\n# Author: Doe J. Smith\n# BibcodeURL: http://ads/1\n#\n"
        ));
        assert!(!with_refs.contains("hidden"));

        let report = Report {
            target: "HD1",
            result: &result,
            with_references: true,
        };
        assert_eq!(format!("{report}"), with_refs);
    }

    #[test]
    fn test_empty_bibliography() {
        assert_eq!(References(&[]).to_string(), "# References:\n#\n");
    }
}
