//! Minimal-cycle and filament extraction for planar graphs
//!
//! Partitions an undirected planar graph into its minimal interior cycles
//! (enclosed regions) and its filaments (dangling chains). The walk picks
//! the clockwise-most neighbor to leave the starting vertex and then keeps
//! taking the tightest counter-clockwise turn, which traces exactly one
//! interior face; extracted structure is removed from the graph until
//! nothing is left.

use std::collections::BTreeSet;

use tracing::{debug, span, trace, Level};

use crate::core::geometry::{Offset, Point};
use crate::core::graph::{canonical_edge, Adjacency, Graph};

/// Direction of an angular sweep around a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rotation {
    Clockwise,
    CounterClockwise,
}

/// A vertex type the planar walk can order angularly.
///
/// `clockwise_most` answers: standing at `current`, having arrived from
/// `previous`, which neighbor is reached by the tightest right turn?
/// `counter_clockwise_most` is the tightest left turn. `previous` itself is
/// never a candidate; with no other neighbor the answer is `None`. Ties
/// between colinear candidates fall to the smaller vertex.
pub trait PlanarVertex: Copy + Ord {
    fn clockwise_most(
        previous: Option<Self>,
        current: Self,
        neighbors: &BTreeSet<Self>,
    ) -> Option<Self>;

    fn counter_clockwise_most(
        previous: Option<Self>,
        current: Self,
        neighbors: &BTreeSet<Self>,
    ) -> Option<Self>;
}

impl PlanarVertex for Point {
    fn clockwise_most(
        previous: Option<Self>,
        current: Self,
        neighbors: &BTreeSet<Self>,
    ) -> Option<Self> {
        angular_pick(previous, current, neighbors, Rotation::Clockwise)
    }

    fn counter_clockwise_most(
        previous: Option<Self>,
        current: Self,
        neighbors: &BTreeSet<Self>,
    ) -> Option<Self> {
        angular_pick(previous, current, neighbors, Rotation::CounterClockwise)
    }
}

/// Walk direction to assume when the walk has no previous vertex yet.
const START_DIRECTION: Offset = Offset::new(0, -1);

fn angular_pick(
    previous: Option<Point>,
    current: Point,
    neighbors: &BTreeSet<Point>,
    rotation: Rotation,
) -> Option<Point> {
    let d_curr = previous.map_or(START_DIRECTION, |p| current - p);

    let mut best: Option<(Point, Offset, bool)> = None;
    for &candidate in neighbors {
        if Some(candidate) == previous {
            continue;
        }
        let d_adj = candidate - current;
        let replace = match best {
            None => true,
            Some((_, d_next, convex)) => match rotation {
                // at a convex best candidate, beating either the incoming
                // direction or the best so far suffices; at a reflex one
                // the challenger must beat both
                Rotation::Clockwise => {
                    if convex {
                        d_curr.dot_perp(d_adj) < 0 || d_next.dot_perp(d_adj) < 0
                    } else {
                        d_curr.dot_perp(d_adj) < 0 && d_next.dot_perp(d_adj) < 0
                    }
                }
                Rotation::CounterClockwise => {
                    if convex {
                        d_curr.dot_perp(d_adj) > 0 && d_next.dot_perp(d_adj) > 0
                    } else {
                        d_curr.dot_perp(d_adj) > 0 || d_next.dot_perp(d_adj) > 0
                    }
                }
            },
        };
        if replace {
            let convex = d_adj.dot_perp(d_curr) <= 0;
            best = Some((candidate, d_adj, convex));
        }
    }
    best.map(|(vertex, _, _)| vertex)
}

/// Mutable record threaded through one extraction run.
struct Extraction<V: PlanarVertex, Vi, Ei> {
    graph: Graph<V, Vi, Ei>,
    adjacency: Adjacency<V>,
    visited: BTreeSet<V>,
    cycle_edges: BTreeSet<(V, V)>,
    found_cycles: Vec<Vec<V>>,
    found_filaments: Vec<Vec<V>>,
}

/// Partition `graph` into its minimal interior cycles and its filaments.
///
/// Cycles come out in walk order starting at the smallest vertex of the
/// face; filaments come out in walk order from the end the driver reached
/// first. The graph is consumed: extraction dismantles it edge by edge.
pub fn extract_all_primitives<V: PlanarVertex, Vi, Ei>(
    graph: Graph<V, Vi, Ei>,
) -> (Vec<Vec<V>>, Vec<Vec<V>>) {
    let extract_span = span!(
        Level::DEBUG,
        "extract_primitives",
        vertices = graph.vertex_count(),
        edges = graph.edge_count()
    );
    let _enter = extract_span.enter();

    let adjacency = graph.adjacency();
    let mut state = Extraction {
        graph,
        adjacency,
        visited: BTreeSet::new(),
        cycle_edges: BTreeSet::new(),
        found_cycles: Vec::new(),
        found_filaments: Vec::new(),
    };
    state.run();

    debug!(
        cycles = state.found_cycles.len(),
        filaments = state.found_filaments.len(),
        "extraction finished"
    );
    (state.found_cycles, state.found_filaments)
}

impl<V: PlanarVertex, Vi, Ei> Extraction<V, Vi, Ei> {
    /// Repeatedly consume the smallest remaining vertex until the graph is
    /// empty. Every round removes at least one vertex or edge.
    fn run(&mut self) {
        while let Some(vertex) = self.graph.min_vertex() {
            match self.degree(vertex) {
                0 => {
                    self.remove_vertex(vertex);
                }
                1 => {
                    let filament = self.extract_filament(vertex, vertex);
                    trace!(length = filament.len(), "found filament");
                    self.found_filaments.push(filament);
                }
                _ => self.extract_cycle(vertex),
            }
        }
    }

    /// Trace the interior face incident to `root`, the smallest vertex of
    /// its component.
    fn extract_cycle(&mut self, root: V) {
        // visited state is per walk; leftovers from an earlier walk would
        // misread a shared vertex as the walk re-entering itself
        self.visited.clear();

        let start = self.clockwise_most(None, root).unwrap_or(root);
        let mut history = vec![root];
        let mut previous = root;
        let mut current = if start == root { None } else { Some(start) };

        loop {
            let vertex = match current {
                // the walk ran into open space: no face here, only a chain
                None => {
                    let filament = self.extract_filament(previous, previous);
                    self.found_filaments.push(filament);
                    return;
                }
                Some(vertex) => vertex,
            };

            if vertex == root {
                // face closed: record it, mark its edges, and detach the
                // walked-over entry edge so the next round sees less graph
                for pair in history.windows(2) {
                    self.cycle_edges.insert(canonical_edge(pair[0], pair[1]));
                }
                trace!(length = history.len(), "found cycle");
                self.found_cycles.push(history);
                self.remove_edge(root, start);
                for vertex in [root, start] {
                    if self.degree(vertex) == 1 {
                        if let Some(next) = self.adjacency.sole_neighbor(vertex) {
                            // cleanup peel of the face remnant, not a filament
                            let _ = self.extract_filament(vertex, next);
                        }
                    }
                }
                return;
            }

            if self.visited.contains(&vertex) {
                // the walk re-entered itself without closing at the root,
                // so the root sits on a filament hanging off a cycle
                let filament = self.extract_filament_from_middle(start, root);
                self.found_filaments.push(filament);
                return;
            }

            self.visited.insert(vertex);
            let next = self.counter_clockwise_most(Some(previous), vertex);
            history.push(vertex);
            previous = vertex;
            current = next;
        }
    }

    /// Peel a dangling chain off the graph, starting at `from` and walking
    /// away until the chain rejoins a branching vertex or runs out.
    ///
    /// When the entry edge `(from, to)` belongs to an already-found cycle
    /// the peel stays on cycle edges and stops before crossing into fresh
    /// territory.
    fn extract_filament(&mut self, from: V, to: V) -> Vec<V> {
        let must_cycle = self.is_cycle_edge(from, to);
        let mut history = Vec::new();
        let mut current = from;

        if self.degree(from) >= 3 {
            self.remove_edge(from, to);
            history.push(from);
            current = to;
        }

        loop {
            match self.degree(current) {
                0 => {
                    history.push(current);
                    self.remove_vertex(current);
                    return history;
                }
                1 => {
                    let next = match self.adjacency.sole_neighbor(current) {
                        Some(next) => next,
                        None => {
                            history.push(current);
                            self.remove_vertex(current);
                            return history;
                        }
                    };
                    if must_cycle && !self.is_cycle_edge(current, next) {
                        history.push(current);
                        return history;
                    }
                    self.remove_edge(current, next);
                    history.push(current);
                    self.remove_vertex(current);
                    current = next;
                }
                _ => {
                    history.push(current);
                    return history;
                }
            }
        }
    }

    /// Walk from `current` away from `previous` along the degree-two chain
    /// until its end, then peel the chain from there.
    fn extract_filament_from_middle(&mut self, previous: V, current: V) -> Vec<V> {
        let mut previous = previous;
        let mut current = current;
        while self.degree(current) == 2 {
            let neighbors = match self.adjacency.neighbors(current) {
                Some(neighbors) => neighbors,
                None => break,
            };
            let mut iter = neighbors.iter().copied();
            let first = match iter.next() {
                Some(first) => first,
                None => break,
            };
            let next = if first == previous {
                match iter.next() {
                    Some(other) => other,
                    None => break,
                }
            } else {
                first
            };
            previous = current;
            current = next;
        }
        self.extract_filament(current, previous)
    }

    fn clockwise_most(&self, previous: Option<V>, current: V) -> Option<V> {
        self.adjacency
            .neighbors(current)
            .and_then(|neighbors| V::clockwise_most(previous, current, neighbors))
    }

    fn counter_clockwise_most(&self, previous: Option<V>, current: V) -> Option<V> {
        self.adjacency
            .neighbors(current)
            .and_then(|neighbors| V::counter_clockwise_most(previous, current, neighbors))
    }

    fn degree(&self, vertex: V) -> usize {
        self.adjacency.degree(vertex)
    }

    fn is_cycle_edge(&self, a: V, b: V) -> bool {
        self.cycle_edges.contains(&canonical_edge(a, b))
    }

    fn remove_edge(&mut self, a: V, b: V) {
        self.graph.remove_edge(a, b);
        self.adjacency.disconnect(a, b);
    }

    fn remove_vertex(&mut self, vertex: V) {
        self.graph.remove_vertex(vertex);
        self.adjacency.remove(vertex);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Point;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn graph_of(edges: &[(Point, Point)]) -> Graph<Point, (), ()> {
        let mut graph = Graph::new();
        for &(a, b) in edges {
            graph.add_vertex(a, ());
            graph.add_vertex(b, ());
            graph.connect(a, b, ());
        }
        graph
    }

    fn square() -> Vec<(Point, Point)> {
        vec![
            (p(0, 0), p(2, 0)),
            (p(2, 0), p(2, 2)),
            (p(0, 2), p(2, 2)),
            (p(0, 0), p(0, 2)),
        ]
    }

    #[test]
    fn test_clockwise_most_excludes_previous() {
        let neighbors: BTreeSet<Point> = [p(0, 2)].into_iter().collect();
        assert_eq!(
            Point::clockwise_most(Some(p(0, 2)), p(0, 0), &neighbors),
            None
        );
    }

    #[test]
    fn test_clockwise_most_from_rest() {
        let neighbors: BTreeSet<Point> = [p(0, 2), p(2, 0)].into_iter().collect();
        assert_eq!(
            Point::clockwise_most(None, p(0, 0), &neighbors),
            Some(p(2, 0))
        );
    }

    #[test]
    fn test_counter_clockwise_most_stays_on_the_face() {
        // arriving at (2,2) from above; the walk turns west rather than
        // running straight through the junction
        let neighbors: BTreeSet<Point> = [p(0, 2), p(2, 0), p(4, 2)].into_iter().collect();
        assert_eq!(
            Point::counter_clockwise_most(Some(p(2, 0)), p(2, 2), &neighbors),
            Some(p(0, 2))
        );
    }

    #[test]
    fn test_square_yields_one_cycle() {
        let (cycles, filaments) = extract_all_primitives(graph_of(&square()));
        assert_eq!(
            cycles,
            vec![vec![p(0, 0), p(2, 0), p(2, 2), p(0, 2)]]
        );
        assert!(filaments.is_empty());
    }

    #[test]
    fn test_square_with_tail() {
        let mut edges = square();
        edges.push((p(2, 2), p(4, 2)));
        let (cycles, filaments) = extract_all_primitives(graph_of(&edges));
        assert_eq!(
            cycles,
            vec![vec![p(0, 0), p(2, 0), p(2, 2), p(0, 2)]]
        );
        assert_eq!(filaments, vec![vec![p(2, 2), p(4, 2)]]);
    }

    #[test]
    fn test_diagonal_splits_square_into_two_faces() {
        let mut edges = square();
        edges.push((p(0, 0), p(2, 2)));
        let (cycles, filaments) = extract_all_primitives(graph_of(&edges));
        assert_eq!(
            cycles,
            vec![
                vec![p(0, 0), p(2, 0), p(2, 2)],
                vec![p(0, 0), p(2, 2), p(0, 2)],
            ]
        );
        assert!(filaments.is_empty());
    }

    #[test]
    fn test_two_squares_share_an_edge() {
        let mut edges = square();
        edges.extend([
            (p(2, 0), p(4, 0)),
            (p(4, 0), p(4, 2)),
            (p(2, 2), p(4, 2)),
        ]);
        let (cycles, filaments) = extract_all_primitives(graph_of(&edges));
        assert_eq!(
            cycles,
            vec![
                vec![p(0, 0), p(2, 0), p(2, 2), p(0, 2)],
                vec![p(2, 0), p(4, 0), p(4, 2), p(2, 2)],
            ]
        );
        assert!(filaments.is_empty());
    }

    #[test]
    fn test_four_boxes_in_a_grid() {
        // 3x3 lattice; the center vertex has degree four, and every
        // junction offers a straight-ahead continuation
        let mut edges = Vec::new();
        for i in [0, 2, 4] {
            edges.push((p(0, i), p(2, i)));
            edges.push((p(2, i), p(4, i)));
            edges.push((p(i, 0), p(i, 2)));
            edges.push((p(i, 2), p(i, 4)));
        }
        let (cycles, filaments) = extract_all_primitives(graph_of(&edges));
        assert_eq!(
            cycles,
            vec![
                vec![p(0, 0), p(2, 0), p(2, 2), p(0, 2)],
                vec![p(0, 2), p(2, 2), p(2, 4), p(0, 4)],
                vec![p(2, 0), p(4, 0), p(4, 2), p(2, 2)],
                vec![p(2, 2), p(4, 2), p(4, 4), p(2, 4)],
            ]
        );
        assert!(filaments.is_empty());
    }

    #[test]
    fn test_branching_chains_become_filaments() {
        let edges = [
            (p(0, 0), p(2, 0)),
            (p(2, 0), p(4, 0)),
            (p(2, 0), p(2, 2)),
        ];
        let (cycles, filaments) = extract_all_primitives(graph_of(&edges));
        assert!(cycles.is_empty());
        assert_eq!(
            filaments,
            vec![
                vec![p(0, 0), p(2, 0)],
                vec![p(4, 0), p(2, 0), p(2, 2)],
            ]
        );
    }

    #[test]
    fn test_bare_edge_is_a_filament() {
        let (cycles, filaments) = extract_all_primitives(graph_of(&[(p(0, 0), p(3, 0))]));
        assert!(cycles.is_empty());
        assert_eq!(filaments, vec![vec![p(0, 0), p(3, 0)]]);
    }

    #[test]
    fn test_isolated_vertices_report_nothing() {
        let mut graph: Graph<Point, (), ()> = Graph::new();
        graph.add_vertex(p(0, 0), ());
        graph.add_vertex(p(5, 5), ());
        let (cycles, filaments) = extract_all_primitives(graph);
        assert!(cycles.is_empty());
        assert!(filaments.is_empty());
    }

    #[test]
    fn test_empty_graph() {
        let graph: Graph<Point, (), ()> = Graph::new();
        let (cycles, filaments) = extract_all_primitives(graph);
        assert!(cycles.is_empty());
        assert!(filaments.is_empty());
    }

    #[test]
    fn test_every_edge_lands_in_exactly_one_primitive() {
        // square with a tail: four cycle edges plus one filament edge
        let mut edges = square();
        edges.push((p(2, 2), p(4, 2)));
        let (cycles, filaments) = extract_all_primitives(graph_of(&edges));

        let mut seen: BTreeSet<(Point, Point)> = BTreeSet::new();
        for cycle in &cycles {
            for pair in cycle.windows(2) {
                assert!(seen.insert(canonical_edge(pair[0], pair[1])));
            }
            let closing = canonical_edge(cycle[0], *cycle.last().unwrap());
            assert!(seen.insert(closing));
        }
        for filament in &filaments {
            for pair in filament.windows(2) {
                assert!(seen.insert(canonical_edge(pair[0], pair[1])));
            }
        }
        let expected: BTreeSet<(Point, Point)> = edges
            .iter()
            .map(|&(a, b)| canonical_edge(a, b))
            .collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let mut edges = square();
        edges.extend([(p(2, 2), p(4, 2)), (p(0, 0), p(2, 2))]);
        let first = extract_all_primitives(graph_of(&edges));
        let second = extract_all_primitives(graph_of(&edges));
        assert_eq!(first, second);
    }
}
