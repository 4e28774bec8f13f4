//! Single-pass grid parser
//!
//! Walks the character grid once, left to right and top to bottom, keeping
//! one in-progress horizontal run for the current row and one in-progress
//! vertical run per column. Junction characters, bullets and blanks close
//! the runs around them; the closed runs become [`Segment`]s.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, span, trace, Level};

use crate::core::chars::{classify, is_dashed_variant, CellClass};
use crate::core::geometry::{Anchor, DrawStyle, Point, Segment, SegmentKind};

/// Everything the parser extracts from one picture.
///
/// A bullet always installs a [`Anchor::Multi`] at its own position; apart
/// from that the three collections are independent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    pub anchors: BTreeMap<Point, Anchor>,
    pub bullets: BTreeSet<Point>,
    pub segments: BTreeSet<Segment>,
}

impl ParseResult {
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty() && self.bullets.is_empty() && self.segments.is_empty()
    }

    /// Serialize the result back into a textual grid.
    ///
    /// Segments write their cells as `-`/`=`/`|`/`:` (a dashed segment
    /// writes every cell as the dashed variant), anchors write their
    /// junction character, and bullets write `*` over the cell of their
    /// induced anchor. Trailing blanks are trimmed. Parsing the returned
    /// lines yields a result equal to `self`.
    pub fn to_lines(&self) -> Vec<String> {
        let mut width = 0usize;
        let mut height = 0usize;
        let mut expand = |p: Point| {
            width = width.max(p.x as usize + 1);
            height = height.max(p.y as usize + 1);
        };
        for seg in &self.segments {
            expand(seg.start);
            expand(seg.end);
        }
        for &p in self.anchors.keys() {
            expand(p);
        }
        for &p in &self.bullets {
            expand(p);
        }

        let mut grid = vec![vec![' '; width]; height];
        for seg in &self.segments {
            for cell in seg.cells() {
                grid[cell.y as usize][cell.x as usize] = seg.symbol();
            }
        }
        for (&p, anchor) in &self.anchors {
            grid[p.y as usize][p.x as usize] = anchor.symbol();
        }
        for &p in &self.bullets {
            grid[p.y as usize][p.x as usize] = '*';
        }

        grid.into_iter()
            .map(|row| {
                let line: String = row.into_iter().collect();
                line.trim_end().to_string()
            })
            .collect()
    }
}

/// One in-progress run of line characters.
///
/// The first `extend` fixes the start; every later `extend` only moves the
/// end. `close` emits the run, if any, and resets the slot.
#[derive(Debug, Clone)]
struct RunAccumulator {
    kind: SegmentKind,
    run: Option<(Point, Point, DrawStyle)>,
}

impl RunAccumulator {
    fn new(kind: SegmentKind) -> Self {
        Self { kind, run: None }
    }

    fn extend(&mut self, p: Point) {
        match &mut self.run {
            None => self.run = Some((p, p, DrawStyle::Solid)),
            Some((_, end, _)) => *end = p,
        }
    }

    fn mark_dashed(&mut self) {
        if let Some((_, _, draw)) = &mut self.run {
            *draw = DrawStyle::Dashed;
        }
    }

    fn close(&mut self, out: &mut BTreeSet<Segment>) {
        if let Some((start, end, draw)) = self.run.take() {
            out.insert(Segment::new(start, end, self.kind, draw));
        }
    }
}

/// Parse an ordered sequence of text rows into anchors, bullets and
/// segments.
///
/// Cells past the end of a short row count as blank. The function is total:
/// unrecognized characters are blanks, and there is no failure mode.
pub fn parse_text_lines<S: AsRef<str>>(lines: &[S]) -> ParseResult {
    let rows: Vec<Vec<char>> = lines
        .iter()
        .map(|line| line.as_ref().chars().collect())
        .collect();
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);

    let parse_span = span!(Level::DEBUG, "parse_grid", rows = rows.len(), width);
    let _enter = parse_span.enter();
    trace!("starting grid walk");

    let mut result = ParseResult::default();
    let mut columns: Vec<RunAccumulator> = (0..width)
        .map(|_| RunAccumulator::new(SegmentKind::Vertical))
        .collect();
    let mut row_run = RunAccumulator::new(SegmentKind::Horizontal);

    for (y, row) in rows.iter().enumerate() {
        for (x, column) in columns.iter_mut().enumerate() {
            let ch = row.get(x).copied().unwrap_or(' ');
            let p = Point::new(x as i32, y as i32);
            match classify(ch) {
                CellClass::Horizontal => {
                    row_run.extend(p);
                    if is_dashed_variant(ch) {
                        row_run.mark_dashed();
                    }
                    column.close(&mut result.segments);
                }
                CellClass::Vertical => {
                    row_run.close(&mut result.segments);
                    column.extend(p);
                    if is_dashed_variant(ch) {
                        column.mark_dashed();
                    }
                }
                CellClass::Anchor(kind) => {
                    row_run.close(&mut result.segments);
                    column.close(&mut result.segments);
                    result.anchors.insert(p, kind);
                }
                CellClass::Bullet => {
                    row_run.close(&mut result.segments);
                    column.close(&mut result.segments);
                    result.anchors.insert(p, Anchor::Multi);
                    result.bullets.insert(p);
                }
                CellClass::Blank => {
                    row_run.close(&mut result.segments);
                    column.close(&mut result.segments);
                }
            }
        }
        // nothing follows the last column of a row
        row_run.close(&mut result.segments);
    }
    for column in &mut columns {
        column.close(&mut result.segments);
    }

    debug!(
        segments = result.segments.len(),
        anchors = result.anchors.len(),
        bullets = result.bullets.len(),
        "parsed grid"
    );
    result
}

/// Parse a whole text blob, splitting it on line breaks first.
pub fn parse_text(input: &str) -> ParseResult {
    let lines: Vec<&str> = input.lines().collect();
    parse_text_lines(&lines)
}
