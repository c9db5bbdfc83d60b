// SPDX: CC0-1.0

use crate::{error::FormulaError, eval::Formula, lex::SubStr, Number, Point};
use anyhow::Context;
use core::fmt;
use std::{
    io::{self, stdin, BufRead, Write},
    sync::Arc,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    SetFormula,
    Zoom,
    Plot,
    PrintTerms,
    PrintPoints,
}

impl Command {
    pub const fn exhaustive() -> &'static [Command] {
        &[
            Self::Help,
            Self::Quit,
            Self::SetFormula,
            Self::Zoom,
            Self::Plot,
            Self::PrintTerms,
            Self::PrintPoints,
        ]
    }

    pub const fn help(&self) -> &'static str {
        match self {
            Self::Help => "display help for each command",
            Self::Quit => "quit the shell",
            Self::SetFormula => "set the function to graph, e.g. '2x^2 - 3'",
            Self::Zoom => "set the zoom level",
            Self::Plot => "draw the graph again",
            Self::PrintTerms => "print the terms parsed from the function (for debugging)",
            Self::PrintPoints => "print the first and last points of the graph",
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Quit => "quit",
            Self::SetFormula => "set",
            Self::Zoom => "zoom",
            Self::Plot => "plot",
            Self::PrintTerms => "terms",
            Self::PrintPoints => "points",
        }
    }

    /// The command whose name is closest to `name`, if any is close enough.
    pub fn suggest(name: &str) -> Option<Command> {
        Self::exhaustive()
            .iter()
            .map(|c| (strsim::normalized_damerau_levenshtein(name, c.name()), *c))
            .filter(|(sim, _)| *sim > 0.3)
            .reduce(|acc, elem| if elem.0 > acc.0 { elem } else { acc })
            .map(|(_, c)| c)
    }
}

impl core::str::FromStr for Command {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s: &str = s;
        for c in Self::exhaustive() {
            if s == c.name() {
                return Ok(*c);
            }
        }
        Err(())
    }
}

pub fn input<W: Write>(out: W, prompt: impl fmt::Display) -> anyhow::Result<String> {
    fn inner<W: Write>(mut out: W, prompt: impl fmt::Display) -> io::Result<String> {
        write!(out, "{prompt}")?;
        out.flush()?;
        let mut stdin = stdin().lock();
        let mut s = String::new();
        stdin.read_line(&mut s)?;
        Ok(s.trim().to_string())
    }

    let s = inner(out, prompt).context("read from standard input failed")?;
    Ok(s)
}

pub fn read_fromstr<W: Write, T: core::str::FromStr>(
    mut out: W,
    prompt: impl fmt::Display,
    ignore_empty: bool,
) -> anyhow::Result<Result<Option<T>, <T as core::str::FromStr>::Err>>
where
    <T as core::str::FromStr>::Err: fmt::Display,
{
    let input = Arc::new(input(&mut out, prompt)?);
    if ignore_empty && input.is_empty() {
        return Ok(Ok(None));
    }
    match input.parse::<T>() {
        Ok(new) => Ok(Ok(Some(new))),
        Err(err) => {
            writeln!(out)?;
            underline(&mut out, &SubStr::all(input))?;
            writeln!(out, "parse error: {err}")?;
            Ok(Err(err))
        }
    }
}

pub fn underline<W: Write>(mut out: W, span: &SubStr) -> io::Result<()> {
    writeln!(out, "{}", span.src())?;
    writeln!(
        out,
        "{}{}",
        " ".repeat(span.start()),
        // an empty span still gets a caret where it would start
        "^".repeat(span.len().max(1))
    )?;
    Ok(())
}

/// The message shown when a formula can't be graphed. The graph is left as
/// it was.
pub fn formula_warning<W: Write>(mut out: W, err: &FormulaError) -> io::Result<()> {
    writeln!(out)?;
    underline(&mut out, err.loc())?;
    writeln!(out, "warning: There was a problem resolving your function...")?;
    writeln!(out, "error: {err}")?;
    if let Some(note) = err.note() {
        writeln!(out, "note: {note}")?;
    }
    Ok(())
}

pub fn dump_terms<W: Write>(
    mut out: W,
    formula: &Formula,
    title: core::fmt::Arguments,
) -> io::Result<()> {
    writeln!(out, "{title}: ")?;
    if formula.terms().len() == 0 {
        writeln!(out, "  (empty, f(x) = 0)")?;
    }
    for term in formula.terms() {
        writeln!(out, "  {term}")?;
    }
    Ok(())
}

/// Prints up to `n` points from each end.
pub fn dump_points<W: Write>(mut out: W, points: &[Point<Number>], n: usize) -> io::Result<()> {
    writeln!(out, "{} points", points.len())?;
    let fmt_point = |out: &mut W, p: &Point<Number>| writeln!(out, "  ({}, {})", p.x, p.y);
    if points.len() <= 2 * n {
        for p in points {
            fmt_point(&mut out, p)?;
        }
    } else {
        for p in &points[..n] {
            fmt_point(&mut out, p)?;
        }
        writeln!(out, "  ...")?;
        for p in &points[points.len() - n..] {
            fmt_point(&mut out, p)?;
        }
    }
    Ok(())
}

pub fn formula_undefined<W: Write>(mut out: W) -> io::Result<()> {
    writeln!(out, "error: no function is defined")
}
