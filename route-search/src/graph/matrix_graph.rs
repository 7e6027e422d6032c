use std::fmt::Display;

use ndarray::Array2;
use rustc_hash::FxHashMap;

use crate::Cost;

use super::{Edge, Edges, Graph, GraphSize, Node, TotalWeight, Vertex};

/// Weight reported by [`MatrixGraph::weight`] for a missing edge or an out-of-range index.
pub const NO_EDGE: i64 = -1;

/// Largest accepted edge weight. Route lengths over such weights stay far below `i64::MAX`.
pub const MAX_WEIGHT: i64 = i32::MAX as i64;

/// Dense adjacency-matrix representation of an undirected weighted graph with a fixed
/// number of nodes.
///
/// Invalid input never fails: out-of-range nodes and weights outside `1..=MAX_WEIGHT` are
/// ignored, lookups outside the graph yield [`NO_EDGE`] or `None`.
#[derive(Debug, Clone)]
pub struct MatrixGraph {
    /// Symmetric; `None` is the absent edge.
    matrix: Array2<Option<Cost>>,
    /// Registered vertices by id. May hold fewer entries than `n`.
    vertices: FxHashMap<Node, Vertex>,
    /// Number of accepted `add_edge` calls. Never decreases.
    num_edges: usize,
}

impl MatrixGraph {
    pub fn new(n: usize) -> Self {
        MatrixGraph {
            matrix: Array2::from_elem((n, n), None),
            vertices: FxHashMap::default(),
            num_edges: 0,
        }
    }

    /// Registers a vertex. An existing vertex with the same id is replaced.
    pub fn add_vertex(&mut self, vertex: Vertex) {
        self.vertices.insert(vertex.id(), vertex);
    }

    /// Inserts (or overwrites) the undirected edge `source -- sink`.
    ///
    /// Silently ignored if either node is out of range or `weight` is not in `1..=MAX_WEIGHT`.
    pub fn add_edge(&mut self, source: Node, sink: Node, weight: i64) {
        let n = self.n();
        if source.id() >= n || sink.id() >= n || !(1..=MAX_WEIGHT).contains(&weight) {
            log::trace!(
                "Ignoring edge {} -- {} with weight {}.",
                source,
                sink,
                weight
            );
            return;
        }
        let cost = Cost::new(weight as u64);
        self.matrix[[source.id(), sink.id()]] = Some(cost);
        self.matrix[[sink.id(), source.id()]] = Some(cost);
        self.num_edges += 1;
    }

    /// Returns the weight of the edge `source -- sink`, or [`NO_EDGE`].
    pub fn weight(&self, source: Node, sink: Node) -> i64 {
        self.edge_cost(source, sink)
            .map(|c| c.get() as i64)
            .unwrap_or(NO_EDGE)
    }

    pub fn vertex(&self, id: Node) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    /// All registered vertices in ascending id order.
    pub fn vertices(&self) -> Vec<&Vertex> {
        let mut vertices: Vec<&Vertex> = self.vertices.values().collect();
        vertices.sort_by_key(|v| v.id());
        vertices
    }

    /// Number of accepted edge insertions, including overwrites.
    pub fn m(&self) -> usize {
        self.num_edges
    }
}

impl Display for MatrixGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.matrix.rows() {
            let line: Vec<String> = row
                .iter()
                .map(|c| match c {
                    Some(cost) => cost.to_string(),
                    None => "∞".to_string(),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

impl GraphSize for MatrixGraph {
    fn n(&self) -> usize {
        self.matrix.nrows()
    }
}

impl Graph for MatrixGraph {
    fn edge_cost(&self, node1: Node, node2: Node) -> Option<Cost> {
        self.matrix.get([node1.id(), node2.id()]).copied().flatten()
    }
}

impl TotalWeight for MatrixGraph {
    fn total_weight(&self) -> Cost {
        self.edges().map(|e| e.cost()).sum()
    }
}

/// Iterates the upper triangle of the matrix, so every undirected edge appears once.
pub struct EdgeIter<'a> {
    graph: &'a MatrixGraph,
    row: usize,
    col: usize,
}

impl<'a> Iterator for EdgeIter<'a> {
    type Item = Edge;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.graph.n();
        while self.row < n {
            if self.col >= n {
                self.row += 1;
                self.col = self.row;
                continue;
            }
            let (i, j) = (self.row, self.col);
            self.col += 1;
            if let Some(cost) = self.graph.matrix[[i, j]] {
                return Some(Edge::new(i.into(), j.into(), cost));
            }
        }
        None
    }
}

impl<'a> Edges<'a> for MatrixGraph {
    type EdgeIter = EdgeIter<'a>;

    fn edges(&'a self) -> Self::EdgeIter {
        EdgeIter {
            graph: self,
            row: 0,
            col: 0,
        }
    }
}
