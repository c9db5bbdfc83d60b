// SPDX: CC0-1.0

pub mod error;
pub mod eval;
pub mod gnuplot;
pub mod lex;
pub mod paper;
pub mod parse;
pub mod shell;

pub use error::FormulaError;
pub use eval::{evaluate, Formula};

use core::{fmt, ops::Range};

pub type Number = f64;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

/// x values a formula is sampled at, one per integer.
pub const DEFAULT_DOMAIN: Range<i32> = -1000..1000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Domain {
    pub x: Range<i32>,
}

impl Domain {
    pub fn values(&self) -> impl Iterator<Item = Number> {
        self.x.clone().map(Number::from)
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self { x: DEFAULT_DOMAIN }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x in [{}, {})", self.x.start, self.x.end)
    }
}

/// Evaluates `f` at every x of `domain`, in order, stopping at the first
/// error. Nothing sampled before the error is returned.
pub fn sample<F, I, E>(mut f: F, domain: I) -> Result<Vec<Point<Number>>, E>
where
    F: FnMut(Number) -> Result<Number, E>,
    I: IntoIterator<Item = Number>,
{
    domain
        .into_iter()
        .map(|x| f(x).map(|y| Point { x, y }))
        .collect()
}
