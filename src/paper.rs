// SPDX: CC0-1.0

use crate::{error::FormulaError, eval::Formula, parse, Domain, Number, Point};
use core::{fmt, num::ParseIntError, str::FromStr};
use thiserror::Error;

/// A line from the first point to the second, in surface coordinates.
pub type Segment = [Point<Number>; 2];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Zoom(u8);

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ZoomError {
    #[error("invalid zoom level: {0}")]
    Parse(#[from] ParseIntError),

    #[error("zoom level must be between {min} and {max}, found {found}", min = Zoom::MIN, max = Zoom::MAX)]
    OutOfRange { found: u32 },
}

impl Zoom {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(50);
    pub const DEFAULT: Self = Self(25);

    pub fn new(level: u32) -> Result<Self, ZoomError> {
        if (u32::from(Self::MIN.0)..=u32::from(Self::MAX.0)).contains(&level) {
            // fits, MAX is a u8
            Ok(Self(level as u8))
        } else {
            Err(ZoomError::OutOfRange { found: level })
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Pixels per unit.
    #[inline]
    pub fn factor(self) -> Number {
        Number::from(self.0)
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Zoom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Zoom {
    type Err = ZoomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim().parse()?)
    }
}

/// Size of the drawing area in pixels. The origin is the top left corner and
/// y grows downwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
}

impl Surface {
    pub fn center(&self) -> Point<Number> {
        Point {
            x: Number::from(self.width) / 2.0,
            y: Number::from(self.height) / 2.0,
        }
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// What is on the graph: the sampled points and the zoom they are shown at.
///
/// Both can only change through [`Paper::set_zoom`] and [`Paper::set_points`],
/// and each change asks for a redraw, which the owner picks up with
/// [`Paper::take_redraw`].
#[derive(Clone, Debug, Default)]
pub struct Paper {
    zoom: Zoom,
    points: Vec<Point<Number>>,
    redraw: bool,
}

impl Paper {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn points(&self) -> &[Point<Number>] {
        &self.points
    }

    pub fn set_zoom(&mut self, zoom: Zoom) {
        self.zoom = zoom;
        self.redraw = true;
    }

    /// Replaces every point; the old graph is gone after this.
    pub fn set_points(&mut self, points: Vec<Point<Number>>) {
        self.points = points;
        self.redraw = true;
    }

    /// Parses `input` and samples it over `domain`. The points only replace
    /// the current ones if every step succeeds; on error the graph is left
    /// exactly as it was.
    pub fn resolve(&mut self, input: &str, domain: &Domain) -> Result<Formula, FormulaError> {
        let formula = parse::parse(input)?;
        let points = formula.sample(domain.values())?;
        tracing::debug!(formula = %formula, points = points.len(), "sampled formula");
        self.set_points(points);
        Ok(formula)
    }

    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    /// Returns whether a redraw was requested, and clears the request.
    pub fn take_redraw(&mut self) -> bool {
        core::mem::take(&mut self.redraw)
    }

    /// Maps a point of the graph to the surface.
    pub fn project(&self, surface: &Surface, p: Point<Number>) -> Point<Number> {
        let center = surface.center();
        let zoom = self.zoom.factor();
        Point {
            x: center.x + p.x * zoom,
            y: center.y - p.y * zoom,
        }
    }

    /// Lines joining each point to the next one.
    pub fn segments(&self, surface: &Surface) -> Vec<Segment> {
        self.points
            .windows(2)
            .map(|pair| [self.project(surface, pair[0]), self.project(surface, pair[1])])
            .collect()
    }

    /// The vertical then the horizontal axis, both through the center.
    pub fn axes(&self, surface: &Surface) -> [Segment; 2] {
        let Point { x: cx, y: cy } = surface.center();
        let w = Number::from(surface.width);
        let h = Number::from(surface.height);
        [
            [Point { x: cx, y: 0.0 }, Point { x: cx, y: h }],
            [Point { x: 0.0, y: cy }, Point { x: w, y: cy }],
        ]
    }

    pub fn label(&self) -> String {
        format!("Zoom level: {}", self.zoom)
    }

    /// Bottom left corner of the zoom label.
    pub fn label_pos(&self, surface: &Surface) -> Point<Number> {
        Point {
            x: Number::from(surface.width) - 60.0,
            y: Number::from(surface.height) - 10.0,
        }
    }
}
