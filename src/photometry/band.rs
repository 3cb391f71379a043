//! Band derivations and missing-value arithmetic.
//!
//! A [`Band`] starts from one [`Operand`] and applies a chain of additions and
//! subtractions. Operands are raw table columns or bands computed earlier in the
//! same system. The missing value (`None`) absorbs every operation: a chain with
//! one missing operand yields a missing result, which may then be replaced by an
//! optional fallback column.
use serde::Serialize;

use crate::constants::Magnitude;

/// Parse a raw cell as a number; anything unparsable is the missing value.
pub fn parse_value(raw: &str) -> Magnitude {
    raw.trim().parse::<f64>().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Op {
    Add,
    Sub,
}

/// Combine two values, propagating the missing value.
pub fn combine(op: Op, lhs: Magnitude, rhs: Magnitude) -> Magnitude {
    let (lhs, rhs) = (lhs?, rhs?);
    Some(match op {
        Op::Add => lhs + rhs,
        Op::Sub => lhs - rhs,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operand {
    /// Raw table column.
    Column(&'static str),
    /// Band computed earlier in the same system.
    Band(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Step {
    pub op: Op,
    pub operand: Operand,
}

impl Step {
    pub const fn add(operand: Operand) -> Self {
        Step {
            op: Op::Add,
            operand,
        }
    }

    pub const fn sub(operand: Operand) -> Self {
        Step {
            op: Op::Sub,
            operand,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Band {
    pub name: &'static str,
    pub base: Operand,
    pub steps: &'static [Step],
    /// Column substituted wherever the chain result is missing.
    pub fallback: Option<&'static str>,
}

impl Band {
    /// Band read directly from a column.
    pub const fn column(name: &'static str, column: &'static str) -> Self {
        Band {
            name,
            base: Operand::Column(column),
            steps: &[],
            fallback: None,
        }
    }

    pub const fn chain(name: &'static str, base: Operand, steps: &'static [Step]) -> Self {
        Band {
            name,
            base,
            steps,
            fallback: None,
        }
    }

    pub const fn with_fallback(mut self, column: &'static str) -> Self {
        self.fallback = Some(column);
        self
    }

    /// All operands read by this band, base first.
    pub fn operands(&self) -> impl Iterator<Item = Operand> + '_ {
        std::iter::once(self.base).chain(self.steps.iter().map(|step| step.operand))
    }

    /// Raw columns read directly by this band, fallback included.
    pub fn direct_columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.operands()
            .filter_map(|operand| match operand {
                Operand::Column(name) => Some(name),
                Operand::Band(_) => None,
            })
            .chain(self.fallback)
    }

    /// Evaluate the band for one row, given a resolver for operand values.
    pub fn evaluate<F>(&self, mut resolve: F) -> Magnitude
    where
        F: FnMut(Operand) -> Magnitude,
    {
        let chained = self
            .steps
            .iter()
            .fold(resolve(self.base), |acc, step| {
                combine(step.op, acc, resolve(step.operand))
            });

        match (chained, self.fallback) {
            (None, Some(column)) => resolve(Operand::Column(column)),
            (value, _) => value,
        }
    }
}

#[cfg(test)]
mod band_test {
    use super::*;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("3.14"), Some(3.14));
        assert_eq!(parse_value(" -0.5\r"), Some(-0.5));
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("  "), None);
        assert_eq!(parse_value("*"), None);
        assert_eq!(parse_value("1.2:"), None);
    }

    #[test]
    fn test_missing_propagation() {
        for op in [Op::Add, Op::Sub] {
            for a in [-3.5, 0.0, 1.0, 12.75] {
                assert_eq!(combine(op, Some(a), None), None);
                assert_eq!(combine(op, None, Some(a)), None);
            }
            assert_eq!(combine(op, None, None), None);
        }
        assert_eq!(combine(Op::Add, Some(1.0), Some(4.0)), Some(5.0));
        assert_eq!(combine(Op::Sub, Some(1.0), Some(4.0)), Some(-3.0));
    }

    #[test]
    fn test_operands_and_columns() {
        const STEPS: &[Step] = &[
            Step::sub(Operand::Column("R-I")),
            Step::add(Operand::Band("V")),
        ];
        let band = Band::chain("I", Operand::Band("R"), STEPS).with_fallback("I");

        let operands: Vec<_> = band.operands().collect();
        assert_eq!(
            operands,
            vec![
                Operand::Band("R"),
                Operand::Column("R-I"),
                Operand::Band("V")
            ]
        );
        assert_eq!(band.direct_columns().collect::<Vec<_>>(), vec!["R-I", "I"]);
    }

    #[test]
    fn test_fallback_only_on_missing() {
        const STEPS: &[Step] = &[Step::sub(Operand::Column("V-R"))];
        let band = Band::chain("R", Operand::Column("V"), STEPS).with_fallback("R");

        let resolve_with = |v: Magnitude, vr: Magnitude, r: Magnitude| {
            move |operand| match operand {
                Operand::Column("V") => v,
                Operand::Column("V-R") => vr,
                Operand::Column("R") => r,
                _ => None,
            }
        };

        assert_eq!(
            band.evaluate(resolve_with(Some(5.0), Some(0.5), Some(9.0))),
            Some(4.5)
        );
        assert_eq!(
            band.evaluate(resolve_with(Some(5.0), None, Some(9.0))),
            Some(9.0)
        );
        assert_eq!(band.evaluate(resolve_with(None, None, None)), None);
    }
}
