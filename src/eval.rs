// SPDX: CC0-1.0

use crate::{error::FormulaError, lex::SubStr, parse, Number, Point};
use core::fmt;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sign {
    Pos,
    Neg,
}

impl Sign {
    #[inline]
    pub fn apply(self, val: Number) -> Number {
        match self {
            Self::Pos => val,
            Self::Neg => -val,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pos => write!(f, "+"),
            Self::Neg => write!(f, "-"),
        }
    }
}

/// One additive component of a formula: `sign * coef * x^exp`, or just
/// `sign * coef` if `var` is false.
#[derive(Clone, Debug, PartialEq)]
pub struct Term {
    pub sign: Sign,
    pub var: bool,
    pub coef: Number,
    pub exp: Number, // unused unless var
    pub loc: SubStr,
}

impl Term {
    #[inline]
    pub fn value(&self, x: Number) -> Number {
        let mag = if self.var {
            self.coef * x.powf(self.exp)
        } else {
            self.coef
        };
        self.sign.apply(mag)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{sign} {coef}", sign = self.sign, coef = self.coef)?;
        if self.var {
            write!(f, " * x^{exp}", exp = self.exp)?;
        }
        write!(f, "  (from '{}')", self.loc)
    }
}

/// A parsed formula, ready to be evaluated at any x.
#[derive(Clone, Debug, PartialEq)]
pub struct Formula {
    pub(crate) src: Arc<String>,
    pub(crate) terms: Vec<Term>,
}

impl Formula {
    #[inline]
    pub const fn new(src: Arc<String>, terms: Vec<Term>) -> Self {
        Self { src, terms }
    }

    /// The formula with whitespace removed.
    pub fn src(&self) -> Arc<String> {
        Arc::clone(&self.src)
    }

    #[inline]
    pub fn terms(&self) -> core::slice::Iter<'_, Term> {
        self.terms.iter()
    }

    /// Sum of every term at `x`. A formula without terms is zero everywhere.
    pub fn eval(&self, x: Number) -> Result<Number, FormulaError> {
        let y: Number = self.terms.iter().map(|term| term.value(x)).sum();
        if y.is_finite() {
            Ok(y)
        } else {
            Err(FormulaError::NonFinite {
                x,
                loc: SubStr::all(self.src()),
            })
        }
    }

    /// Evaluates at each x of `domain`, in order. Either every x succeeds or
    /// the first error is returned and no points are.
    pub fn sample<I>(&self, domain: I) -> Result<Vec<Point<Number>>, FormulaError>
    where
        I: IntoIterator<Item = Number>,
    {
        crate::sample(|x| self.eval(x), domain)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.src)
    }
}

/// Parses `formula` and samples it over `domain`.
pub fn evaluate<I>(formula: &str, domain: I) -> Result<Vec<Point<Number>>, FormulaError>
where
    I: IntoIterator<Item = Number>,
{
    parse::parse(formula)?.sample(domain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn xs(vals: &[i32]) -> Vec<Number> {
        vals.iter().copied().map(Number::from).collect()
    }

    fn ys(formula: &str, domain: &[i32]) -> Vec<Number> {
        evaluate(formula, xs(domain))
            .unwrap()
            .into_iter()
            .map(|p| p.y)
            .collect()
    }

    #[test]
    fn constant() {
        assert_eq!(ys("5", &[-2, -1, 0, 1, 2]), [5.0; 5]);
    }

    #[test]
    fn linear() {
        let points = evaluate("x + 3", xs(&[-2, -1, 0, 1, 2])).unwrap();
        let pairs: Vec<(Number, Number)> = points.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(
            pairs,
            [(-2.0, 1.0), (-1.0, 2.0), (0.0, 3.0), (1.0, 4.0), (2.0, 5.0)]
        );
    }

    #[test]
    fn implicit_coefficient_negative_variable() {
        assert_eq!(ys("-x + 1", &[0, 1, 2]), [1.0, 0.0, -1.0]);
    }

    #[test]
    fn exponent_term() {
        assert_eq!(ys("2x^2 - 3", &[0, 1, 2]), [-3.0, -1.0, 5.0]);
    }

    #[test]
    fn leading_plus_matches_bare_variable() {
        assert_eq!(ys("+x", &[-3, 0, 7]), ys("x", &[-3, 0, 7]));
    }

    #[test]
    fn empty_formula_is_zero() {
        assert_eq!(ys("", &[-1, 0, 1]), [0.0; 3]);
    }

    #[test]
    fn constant_with_exponent_ignores_exponent() {
        assert_eq!(ys("2^3", &[0, 5]), [2.0, 2.0]);
    }

    #[test]
    fn fractional_coefficients_and_exponents() {
        let got = ys("0.5x^1.5 + 2.25", &[0, 4, 9]);
        assert_relative_eq!(got[0], 2.25, epsilon = 1e-12);
        assert_relative_eq!(got[1], 6.25, epsilon = 1e-12);
        assert_relative_eq!(got[2], 15.75, epsilon = 1e-12);
    }

    #[test]
    fn division_is_an_error() {
        let err = evaluate("x/2", xs(&[0, 1])).unwrap_err();
        assert!(matches!(err, FormulaError::Malformed { .. }));
    }

    #[test]
    fn non_real_value_fails_whole_domain() {
        // fine for x >= 0, undefined for x = -1
        let err = evaluate("x^0.5", xs(&[4, 1, 0, -1, 9])).unwrap_err();
        assert_eq!(
            err,
            FormulaError::NonFinite {
                x: -1.0,
                loc: SubStr::all(Arc::new(String::from("x^0.5"))),
            }
        );
    }

    #[test]
    fn negative_exponent_is_unsupported() {
        assert!(evaluate("x^-1", xs(&[1])).is_err());
        assert!(evaluate("x^-1.0", xs(&[0])).is_err());
    }

    #[test]
    fn empty_domain_yields_no_points() {
        assert!(evaluate("x", Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn term_display() {
        let formula = parse::parse("-3x^2").unwrap();
        let term = formula.terms().next().unwrap();
        assert_eq!(term.to_string(), "- 3 * x^2  (from '-3x^2')");
    }
}
