mod edge;
mod matrix_graph;
mod node;
mod route;
mod vertex;

pub use edge::*;
pub use matrix_graph::{EdgeIter, MatrixGraph, MAX_WEIGHT, NO_EDGE};
pub use node::*;
pub use route::{penalized_length, Route, NO_PATH};
pub(crate) use route::path_cost;
pub use vertex::{Attribute, Vertex};

use crate::Cost;

/// Read-only view of a weighted undirected graph whose nodes are `0..n`.
///
/// This is everything a search needs; the searches never mutate the graph.
pub trait Graph: GraphSize + TotalWeight {
    /// Returns the cost of an edge between two nodes if such exists.
    fn edge_cost(&self, node1: Node, node2: Node) -> Option<Cost>;

    fn contains_node(&self, node: Node) -> bool {
        node.id() < self.n()
    }

    fn contains_edge(&self, node1: Node, node2: Node) -> bool {
        self.edge_cost(node1, node2).is_some()
    }

    fn nodes(&self) -> std::iter::Map<std::ops::Range<usize>, fn(usize) -> Node> {
        (0..self.n()).map(Node::new as fn(usize) -> Node)
    }
}

pub trait Edges<'a> {
    type EdgeIter: Iterator<Item = Edge>;

    fn edges(&'a self) -> Self::EdgeIter;
}

pub trait GraphSize {
    fn n(&self) -> usize;
}

pub trait TotalWeight {
    fn total_weight(&self) -> Cost;
}

#[cfg(test)]
mod test_graph {
    use super::*;

    ///   0 --5-- 1 --1-- 2
    ///  |3|     |1|     |3|
    ///   3 --1-- 4 --6-- 5
    #[test]
    fn test_graph_construction() {
        let mut graph = MatrixGraph::new(6);
        graph.add_edge(0.into(), 1.into(), 5);
        graph.add_edge(0.into(), 3.into(), 3);
        graph.add_edge(1.into(), 4.into(), 1);
        graph.add_edge(1.into(), 2.into(), 1);
        graph.add_edge(2.into(), 5.into(), 3);
        graph.add_edge(3.into(), 4.into(), 1);
        graph.add_edge(4.into(), 5.into(), 6);

        assert_eq!(6, graph.n());
        assert_eq!(7, graph.m());

        for node in graph.nodes() {
            assert!(graph.contains_node(node));
        }
        assert!(!graph.contains_node(6.into()));

        assert!(graph.contains_edge(0.into(), 1.into()));
        assert!(graph.contains_edge(1.into(), 0.into()));
        assert!(graph.contains_edge(5.into(), 4.into()));
        assert!(!graph.contains_edge(0.into(), 5.into()));

        assert_eq!(graph.total_weight(), 20.into());
    }
}
