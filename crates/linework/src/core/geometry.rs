//! Geometric primitives produced by the grid parser
//!
//! This module contains the data model shared by the parser and the shape
//! extractor: lattice points, anchors, bullets, and line segments.

use std::fmt;
use std::ops::Sub;

use serde::{Deserialize, Serialize};

/// A position on the character grid, `(x, y)` = (column, row).
///
/// Points order lexicographically by column, then row. Every place the
/// library needs a deterministic "minimum point" relies on this order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Displacement between two grid points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Perpendicular dot product, `u.dx * v.dy - u.dy * v.dx`.
    ///
    /// The sign tells which side of `self` the other vector falls on; zero
    /// means colinear.
    pub fn dot_perp(self, other: Offset) -> i32 {
        self.dx * other.dy - self.dy * other.dx
    }
}

impl Sub for Point {
    type Output = Offset;

    fn sub(self, rhs: Point) -> Offset {
        Offset {
            dx: self.x - rhs.x,
            dy: self.y - rhs.y,
        }
    }
}

/// The visual shape of a junction point in the drawing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Anchor {
    /// Four-way junction or corner, drawn as `+`
    Multi,
    /// Rising diagonal corner, drawn as `/`
    FirstDiagonal,
    /// Falling diagonal corner, drawn as `\`
    SecondDiagonal,
}

impl Anchor {
    /// The character this anchor was read from (and serializes back to).
    pub fn symbol(&self) -> char {
        match self {
            Anchor::Multi => '+',
            Anchor::FirstDiagonal => '/',
            Anchor::SecondDiagonal => '\\',
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::Multi => write!(f, "multi"),
            Anchor::FirstDiagonal => write!(f, "first-diagonal"),
            Anchor::SecondDiagonal => write!(f, "second-diagonal"),
        }
    }
}

/// Orientation of a line segment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum SegmentKind {
    Horizontal,
    Vertical,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentKind::Horizontal => write!(f, "horizontal"),
            SegmentKind::Vertical => write!(f, "vertical"),
        }
    }
}

/// Stroke style of a segment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum DrawStyle {
    #[default]
    Solid,
    Dashed,
}

impl fmt::Display for DrawStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawStyle::Solid => write!(f, "solid"),
            DrawStyle::Dashed => write!(f, "dashed"),
        }
    }
}

/// A maximal straight run of line characters in one row or column.
///
/// Invariants: `start <= end` componentwise, `start.y == end.y` for
/// horizontal segments and `start.x == end.x` for vertical ones, and the
/// run covers at least one cell.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    pub kind: SegmentKind,
    pub draw: DrawStyle,
}

impl Segment {
    pub fn new(start: Point, end: Point, kind: SegmentKind, draw: DrawStyle) -> Self {
        Self {
            start,
            end,
            kind,
            draw,
        }
    }

    /// Number of cells covered by the segment, always at least one.
    pub fn cell_count(&self) -> usize {
        match self.kind {
            SegmentKind::Horizontal => (self.end.x - self.start.x) as usize + 1,
            SegmentKind::Vertical => (self.end.y - self.start.y) as usize + 1,
        }
    }

    /// Iterate over the cells the segment covers, start to end.
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        let (start, kind) = (self.start, self.kind);
        (0..self.cell_count() as i32).map(move |i| match kind {
            SegmentKind::Horizontal => Point::new(start.x + i, start.y),
            SegmentKind::Vertical => Point::new(start.x, start.y + i),
        })
    }

    /// The character each covered cell serializes to.
    pub fn symbol(&self) -> char {
        match (self.kind, self.draw) {
            (SegmentKind::Horizontal, DrawStyle::Solid) => '-',
            (SegmentKind::Horizontal, DrawStyle::Dashed) => '=',
            (SegmentKind::Vertical, DrawStyle::Solid) => '|',
            (SegmentKind::Vertical, DrawStyle::Dashed) => ':',
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{} {}", self.kind, self.start, self.end, self.draw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_ordering_is_column_major() {
        let mut points = vec![
            Point::new(2, 0),
            Point::new(0, 2),
            Point::new(0, 0),
            Point::new(2, 2),
        ];
        points.sort();
        assert_eq!(
            points,
            vec![
                Point::new(0, 0),
                Point::new(0, 2),
                Point::new(2, 0),
                Point::new(2, 2),
            ]
        );
    }

    #[test]
    fn test_dot_perp_signs() {
        let right = Offset::new(1, 0);
        let down = Offset::new(0, 1);
        assert_eq!(right.dot_perp(down), 1);
        assert_eq!(down.dot_perp(right), -1);
        assert_eq!(right.dot_perp(right), 0);
    }

    #[test]
    fn test_point_subtraction() {
        let d = Point::new(4, 1) - Point::new(1, 3);
        assert_eq!(d, Offset::new(3, -2));
    }

    #[test]
    fn test_segment_cells_horizontal() {
        let seg = Segment::new(
            Point::new(1, 0),
            Point::new(3, 0),
            SegmentKind::Horizontal,
            DrawStyle::Solid,
        );
        assert_eq!(seg.cell_count(), 3);
        let cells: Vec<_> = seg.cells().collect();
        assert_eq!(
            cells,
            vec![Point::new(1, 0), Point::new(2, 0), Point::new(3, 0)]
        );
    }

    #[test]
    fn test_segment_cells_vertical_single() {
        let seg = Segment::new(
            Point::new(0, 1),
            Point::new(0, 1),
            SegmentKind::Vertical,
            DrawStyle::Dashed,
        );
        assert_eq!(seg.cell_count(), 1);
        assert_eq!(seg.cells().collect::<Vec<_>>(), vec![Point::new(0, 1)]);
        assert_eq!(seg.symbol(), ':');
    }

    #[test]
    fn test_anchor_symbols() {
        assert_eq!(Anchor::Multi.symbol(), '+');
        assert_eq!(Anchor::FirstDiagonal.symbol(), '/');
        assert_eq!(Anchor::SecondDiagonal.symbol(), '\\');
    }

    #[test]
    fn test_display_formats() {
        let seg = Segment::new(
            Point::new(0, 0),
            Point::new(2, 0),
            SegmentKind::Horizontal,
            DrawStyle::Dashed,
        );
        assert_eq!(seg.to_string(), "horizontal (0, 0)-(2, 0) dashed");
        assert_eq!(Anchor::FirstDiagonal.to_string(), "first-diagonal");
    }
}
