// SPDX: CC0-1.0

use crate::{lex::SubStr, Number};
use core::num::ParseFloatError;
use thiserror::Error;

/// Why a formula could not be turned into points.
///
/// Every variant carries the part of the (whitespace-free) formula it is
/// about, so callers can point at it.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum FormulaError {
    #[error("invalid coefficient '{loc}': {source}")]
    Coefficient {
        loc: SubStr,
        #[source]
        source: ParseFloatError,
    },

    #[error("invalid exponent '{loc}': {source}")]
    Exponent {
        loc: SubStr,
        #[source]
        source: ParseFloatError,
    },

    #[error("malformed term '{loc}'")]
    Malformed { loc: SubStr },

    #[error("'{loc}' has no real value at x = {x}")]
    NonFinite { x: Number, loc: SubStr },
}

impl FormulaError {
    pub fn loc(&self) -> &SubStr {
        match self {
            Self::Coefficient { loc, .. }
            | Self::Exponent { loc, .. }
            | Self::Malformed { loc }
            | Self::NonFinite { loc, .. } => loc,
        }
    }

    /// A hint for the user, if there is a likely cause worth mentioning.
    pub fn note(&self) -> Option<&'static str> {
        match self {
            Self::Exponent { loc, .. } if loc.is_empty() => {
                Some("'^' needs a number after it, and '-' always starts a new term, so 'x^-2' is not supported")
            }
            Self::Exponent { .. } => None,
            Self::Coefficient { loc, .. } if loc.is_empty() => {
                Some("each '+' or '-' must be followed by a term")
            }
            Self::Coefficient { .. } => None,
            Self::Malformed { .. } => Some(
                "terms look like 'c', 'cx' or 'cx^e'; parentheses, '*' and '/' are not supported",
            ),
            Self::NonFinite { .. } => {
                Some("fractional exponents of negative x and division by zero have no real value")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn message_names_offending_text() {
        let src = Arc::new(String::from("3x-4y"));
        let err = FormulaError::Malformed {
            loc: SubStr::new(src, 2, 3),
        };
        assert_eq!(err.to_string(), "malformed term '-4y'");
        assert_eq!(err.loc().start(), 2);
    }

    #[test]
    fn non_finite_reports_x() {
        let src = Arc::new(String::from("x^0.5"));
        let err = FormulaError::NonFinite {
            x: -1.0,
            loc: SubStr::all(src),
        };
        assert_eq!(err.to_string(), "'x^0.5' has no real value at x = -1");
        assert!(err.note().is_some());
    }
}
