//! End-to-end tracing pipeline
//!
//! Builds the planar graph implied by a [`ParseResult`] and runs the
//! primitive extractor over it, turning a parsed picture into closed
//! shapes and open chains.

use serde::{Deserialize, Serialize};

use crate::core::geometry::{Anchor, DrawStyle, Point, SegmentKind};
use crate::core::graph::Graph;
use crate::core::parser::{parse_text, ParseResult};
use crate::core::planar::extract_all_primitives;

/// The planar graph a parsed picture induces: anchor kinds on the
/// vertices, draw styles on the edges.
pub type ShapeGraph = Graph<Point, Option<Anchor>, DrawStyle>;

/// Extracted structure of a picture: closed regions and dangling chains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Primitives {
    pub cycles: Vec<Vec<Point>>,
    pub filaments: Vec<Vec<Point>>,
}

/// Build the planar graph for a parse result.
///
/// Segments contribute their endpoints and an edge between them; anchors
/// (bullets included, through their induced anchor) contribute vertices.
/// An anchor one cell before a segment's start or after its end, in the
/// segment's own direction, is linked to that endpoint, and two anchors in
/// adjacent cells are linked directly. A box drawn from four corners and
/// four one-cell runs therefore comes out as a single eight-vertex ring.
pub fn shape_graph(result: &ParseResult) -> ShapeGraph {
    let mut graph = ShapeGraph::new();

    for segment in &result.segments {
        graph.add_vertex(segment.start, None);
        if segment.end != segment.start {
            graph.add_vertex(segment.end, None);
            graph.connect(segment.start, segment.end, segment.draw);
        }
    }
    for (&point, &anchor) in &result.anchors {
        graph.add_vertex(point, Some(anchor));
    }

    for segment in &result.segments {
        let (before, after) = match segment.kind {
            SegmentKind::Horizontal => (
                Point::new(segment.start.x - 1, segment.start.y),
                Point::new(segment.end.x + 1, segment.end.y),
            ),
            SegmentKind::Vertical => (
                Point::new(segment.start.x, segment.start.y - 1),
                Point::new(segment.end.x, segment.end.y + 1),
            ),
        };
        if result.anchors.contains_key(&before) {
            graph.connect(before, segment.start, segment.draw);
        }
        if result.anchors.contains_key(&after) {
            graph.connect(segment.end, after, segment.draw);
        }
    }

    for &point in result.anchors.keys() {
        for neighbor in [Point::new(point.x + 1, point.y), Point::new(point.x, point.y + 1)] {
            if result.anchors.contains_key(&neighbor) {
                graph.connect(point, neighbor, DrawStyle::Solid);
            }
        }
    }

    graph
}

/// Parse a picture and extract its cycles and filaments in one call.
pub fn trace_text(input: &str) -> (ParseResult, Primitives) {
    let parsed = parse_text(input);
    let (cycles, filaments) = extract_all_primitives(shape_graph(&parsed));
    (parsed, Primitives { cycles, filaments })
}
