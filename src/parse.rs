// SPDX: CC0-1.0

// terms are parsed once per formula, not once per x; evaluation is in eval.rs

use crate::{
    error::FormulaError,
    eval::{Formula, Sign, Term},
    lex::{self, SubStr, Terms},
    Number,
};

pub const VAR: char = 'x';
pub const EXP: char = '^';

fn parse_num(loc: &SubStr) -> Result<Number, core::num::ParseFloatError> {
    loc.get().parse()
}

/// Parses one signed term, e.g. `-3x^2`, `+x`, `4`, `2^3`.
pub fn parse_term(term: SubStr) -> Result<Term, FormulaError> {
    let (sign, skip) = match term.get().chars().next() {
        Some('-') => (Sign::Neg, 1),
        Some('+') => (Sign::Pos, 1),
        _ => (Sign::Pos, 0),
    };
    let body = term.slice(skip, term.len() - skip);

    // everything after the first '^' is the exponent
    let (base, exp) = if let Some(idx) = body.get().find(EXP) {
        let loc = body.slice(idx + 1, body.len() - idx - 1);
        let exp = parse_num(&loc).map_err(|source| FormulaError::Exponent {
            loc: loc.clone(),
            source,
        })?;
        (body.slice(0, idx), exp)
    } else {
        (body, 1.0)
    };

    let var = base.get().ends_with(VAR);
    let coef_loc = if var {
        base.slice(0, base.len() - VAR.len_utf8())
    } else {
        base
    };
    if coef_loc.get().contains(VAR) {
        return Err(FormulaError::Malformed { loc: term });
    }

    let coef = if var && coef_loc.is_empty() {
        // implicit coefficient: `x`, `-x`, `+x`
        1.0
    } else {
        parse_num(&coef_loc).map_err(|source| FormulaError::Coefficient {
            loc: coef_loc.clone(),
            source,
        })?
    };

    Ok(Term {
        sign,
        var,
        coef,
        exp,
        loc: term,
    })
}

/// Parses a whole formula. Whitespace is ignored; the first bad term is the
/// error.
pub fn parse(formula: &str) -> Result<Formula, FormulaError> {
    let src = lex::compact(formula);
    let terms = Terms::new(&src)
        .map(parse_term)
        .collect::<Result<Vec<Term>, FormulaError>>()?;
    tracing::debug!(formula = %src, terms = terms.len(), "parsed formula");
    Ok(Formula::new(src, terms))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(text: &str) -> Result<Term, FormulaError> {
        let src = lex::compact(text);
        parse_term(SubStr::all(src))
    }

    #[test]
    fn bare_number() {
        let t = term("42").unwrap();
        assert_eq!((t.sign, t.var, t.coef), (Sign::Pos, false, 42.0));
    }

    #[test]
    fn implicit_coefficient() {
        for (text, sign) in [("x", Sign::Pos), ("+x", Sign::Pos), ("-x", Sign::Neg)] {
            let t = term(text).unwrap();
            assert_eq!((t.sign, t.var, t.coef, t.exp), (sign, true, 1.0, 1.0));
        }
    }

    #[test]
    fn coefficient_and_exponent() {
        let t = term("-2.5x^3").unwrap();
        assert_eq!((t.sign, t.var, t.coef, t.exp), (Sign::Neg, true, 2.5, 3.0));
    }

    #[test]
    fn bad_coefficient_points_at_coefficient() {
        let err = term("-3.2.1x").unwrap_err();
        assert!(matches!(err, FormulaError::Coefficient { .. }));
        assert_eq!(err.loc().get(), "3.2.1");
        assert_eq!(err.loc().start(), 1);
    }

    #[test]
    fn bad_exponent_points_at_exponent() {
        let err = term("x^two").unwrap_err();
        assert!(matches!(err, FormulaError::Exponent { .. }));
        assert_eq!(err.loc().get(), "two");
    }

    #[test]
    fn constant_exponent_must_still_be_a_number() {
        assert!(term("2^").is_err());
        assert_eq!(term("2^3").unwrap().coef, 2.0);
    }

    #[test]
    fn bare_sign_is_not_a_term() {
        let err = term("+").unwrap_err();
        assert!(matches!(err, FormulaError::Coefficient { .. }));
        assert!(err.loc().is_empty());
    }

    #[test]
    fn misplaced_variable_is_malformed() {
        for text in ["x2", "2x3", "xx", "x/2", "3(x)"] {
            assert!(
                matches!(term(text), Err(FormulaError::Malformed { .. })),
                "{text}"
            );
        }
    }

    #[test]
    fn other_variables_are_rejected() {
        assert!(matches!(
            parse("3y + 1"),
            Err(FormulaError::Coefficient { .. })
        ));
    }

    #[test]
    fn first_bad_term_wins() {
        let err = parse("x + 2y - 3z").unwrap_err();
        assert_eq!(err.loc().get(), "2y");
    }

    #[test]
    fn formula_keeps_compacted_source() {
        let formula = parse(" 2 x ^ 2 - 3 ").unwrap();
        assert_eq!(formula.to_string(), "2x^2-3");
        assert_eq!(formula.terms().count(), 2);
    }
}
