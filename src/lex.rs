// SPDX: CC0-1.0

use core::{fmt, iter::Peekable, str::CharIndices};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubStr {
    // yes, silly, but atomic operations are cheap for this use case
    src: Arc<String>,
    start: usize,
    len: usize,
}

impl SubStr {
    #[inline]
    pub const fn new(src: Arc<String>, start: usize, len: usize) -> Self {
        Self { src, start, len }
    }

    #[inline]
    pub fn all(src: Arc<String>) -> Self {
        let len = src.len();
        Self::new(src, 0, len)
    }

    pub fn src(&self) -> Arc<String> {
        Arc::clone(&self.src)
    }

    pub const fn start(&self) -> usize {
        self.start
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self) -> &str {
        &self.src[self.start..self.start + self.len]
    }

    /// Narrow to `len` bytes starting `offset` bytes into this substring.
    pub fn slice(&self, offset: usize, len: usize) -> Self {
        debug_assert!(offset + len <= self.len);
        Self::new(Arc::clone(&self.src), self.start + offset, len)
    }
}

impl fmt::Display for SubStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.get())
    }
}

/// Removes every whitespace character from the formula.
pub fn compact(formula: &str) -> Arc<String> {
    Arc::new(formula.chars().filter(|chr| !chr.is_whitespace()).collect())
}

#[inline]
const fn is_separator(chr: char) -> bool {
    matches!(chr, '+' | '-')
}

/// Splits a compacted formula into signed terms.
///
/// A new term starts right before every `+` and `-`, so the sign stays
/// attached to the term it belongs to. Empty segments never come out of this
/// iterator, which makes a leading sign harmless. A sign that belongs to an
/// exponent (`x^-2`) still starts a new term.
#[derive(Debug)]
pub struct Terms<'src> {
    src: &'src Arc<String>,
    cur: Peekable<CharIndices<'src>>,
}

impl<'src> Terms<'src> {
    pub fn new(src: &'src Arc<String>) -> Self {
        Self {
            src,
            cur: src.char_indices().peekable(),
        }
    }
}

impl Iterator for Terms<'_> {
    type Item = SubStr;

    fn next(&mut self) -> Option<Self::Item> {
        // the first char is always part of the term, sign or not
        let (start, _) = self.cur.next()?;
        let mut end = self.src.len();
        while let Some((idx, chr)) = self.cur.peek().copied() {
            if is_separator(chr) {
                end = idx;
                break;
            }
            self.cur.next();
        }
        // @unicode
        Some(SubStr::new(Arc::clone(self.src), start, end - start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(formula: &str) -> Vec<String> {
        let src = compact(formula);
        Terms::new(&src).map(|term| term.get().to_string()).collect()
    }

    #[test]
    fn compact_strips_all_whitespace() {
        assert_eq!(compact(" 2 x ^ 2\t-  3\n").as_str(), "2x^2-3");
    }

    #[test]
    fn splits_before_every_sign() {
        assert_eq!(split("x + 3"), ["x", "+3"]);
        assert_eq!(split("-x + 1"), ["-x", "+1"]);
        assert_eq!(split("2x^2 - 3"), ["2x^2", "-3"]);
    }

    #[test]
    fn leading_sign_yields_no_empty_term() {
        assert_eq!(split("+x"), ["+x"]);
        assert_eq!(split("-5"), ["-5"]);
    }

    #[test]
    fn doubled_signs_become_bare_sign_terms() {
        assert_eq!(split("x+-3"), ["x", "+", "-3"]);
    }

    #[test]
    fn sign_inside_exponent_splits_the_term() {
        assert_eq!(split("x^-2"), ["x^", "-2"]);
    }

    #[test]
    fn empty_formula_has_no_terms() {
        assert!(split("").is_empty());
        assert!(split("   ").is_empty());
    }

    #[test]
    fn term_locations_point_into_compacted_source() {
        let src = compact("3x - 4");
        let terms: Vec<SubStr> = Terms::new(&src).collect();
        assert_eq!(terms[1].start(), 2);
        assert_eq!(terms[1].len(), 2);
        assert_eq!(terms[1].src().as_str(), "3x-4");
        assert_eq!(terms[1].slice(1, 1).get(), "4");
    }
}
