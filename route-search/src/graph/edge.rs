use crate::Cost;

use super::Node;

/// An undirected edge of a graph, reported with `source <= sink`.
#[derive(Copy, Clone, Debug, Default, Hash, PartialEq, Eq)]
pub struct Edge {
    cost: Cost,
    source: Node,
    sink: Node,
}

impl Edge {
    pub fn new(source: Node, sink: Node, cost: Cost) -> Self {
        Edge { source, sink, cost }
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn source(&self) -> Node {
        self.source
    }

    pub fn sink(&self) -> Node {
        self.sink
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -- {} ({})", self.source, self.sink, self.cost)
    }
}
