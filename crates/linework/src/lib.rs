//! Linework - Trace ASCII line drawings into geometric structure
//!
//! A library that converts two-dimensional ASCII pictures built from
//! lines, corners, dashes and bullets into a structured description:
//! horizontal and vertical segments with draw style, anchor points where
//! lines meet or bend, bullet points, and the closed cycles and open
//! filaments of the planar graph those primitives form.
//!
//! # Quick Start
//!
//! ```rust
//! use linework::trace_text;
//!
//! let picture = "+-+\n| |\n+-+";
//! let (parsed, shapes) = trace_text(picture);
//! assert_eq!(parsed.segments.len(), 4);
//! assert_eq!(shapes.cycles.len(), 1);
//! assert!(shapes.filaments.is_empty());
//! ```
//!
//! # Advanced Usage
//!
//! The pipeline stages are exposed individually for callers that want to
//! inspect or adjust the intermediate graph:
//!
//! ```rust
//! use linework::prelude::*;
//!
//! let parsed = parse_text_lines(&["*--*"]);
//! assert_eq!(parsed.bullets.len(), 2);
//!
//! let graph = shape_graph(&parsed);
//! let (cycles, filaments) = extract_all_primitives(graph);
//! assert!(cycles.is_empty());
//! assert_eq!(filaments.len(), 1);
//! ```

pub mod core;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        extract_all_primitives, parse_text, parse_text_lines, shape_graph, trace_text, Anchor,
        DrawStyle, Graph, ParseResult, PlanarVertex, Point, Primitives, Segment, SegmentKind,
        ShapeGraph,
    };
}
