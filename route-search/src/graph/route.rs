use std::convert::TryFrom;

use crate::{error::Error, Cost};

use super::{Graph, Node};

/// Distance reported by [`Route::distance`] when no route is known.
pub const NO_PATH: i64 = -1;

/// A path from `nodes.first()` to `nodes.last()`.
///
/// `cost` is `Some` exactly when every consecutive pair of nodes is joined by an edge.
/// A non-empty route without a cost is a construction that could not be closed
/// and must not be trusted as a path of the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    nodes: Vec<Node>,
    cost: Option<Cost>,
}

impl<'a> IntoIterator for &'a Route {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl Route {
    /// The "no route" result: no nodes and distance [`NO_PATH`].
    pub fn not_found() -> Self {
        Self {
            nodes: vec![],
            cost: None,
        }
    }

    pub fn new(nodes: Vec<Node>, cost: Cost) -> Self {
        assert!(!nodes.is_empty(), "a route has at least one node");
        Self {
            nodes,
            cost: Some(cost),
        }
    }

    /// Computes the cost of `nodes` in `graph`.
    ///
    /// # Panics
    ///
    /// Panics if two consecutive nodes are not adjacent. Use [`Route::try_cost_from`] for
    /// routes of unknown origin.
    pub fn with_cost_from<G>(nodes: Vec<Node>, graph: &G) -> Self
    where
        G: Graph,
    {
        match Self::try_cost_from(nodes, graph) {
            Ok(route) => route,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn try_cost_from<G>(nodes: Vec<Node>, graph: &G) -> Result<Self, Error>
    where
        G: Graph,
    {
        let cost = path_cost(graph, &nodes)?;
        Ok(Self::new(nodes, cost))
    }

    /// Keeps `nodes` even if they do not form a path of `graph`; such a route is flagged.
    pub fn from_candidate<G>(nodes: Vec<Node>, graph: &G) -> Self
    where
        G: Graph,
    {
        let cost = path_cost(graph, &nodes).ok();
        if cost.is_none() && !nodes.is_empty() {
            log::warn!(
                "Route {} -> {} uses a missing edge.",
                nodes[0],
                nodes[nodes.len() - 1]
            );
        }
        Self { nodes, cost }
    }

    pub fn cost(&self) -> Option<Cost> {
        self.cost
    }

    /// Total weight of the route, or [`NO_PATH`] if it has none.
    pub fn distance(&self) -> i64 {
        self.cost
            .map(|c| i64::try_from(c.get()).unwrap_or(i64::MAX))
            .unwrap_or(NO_PATH)
    }

    pub fn nodes(&self) -> &[Node] {
        self.nodes.as_slice()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn first(&self) -> Option<Node> {
        self.nodes.first().copied()
    }

    pub fn last(&self) -> Option<Node> {
        self.nodes.last().copied()
    }

    pub fn is_valid(&self) -> bool {
        self.cost.is_some()
    }

    /// True for a non-empty route that does not form a path of its graph.
    pub fn is_flagged(&self) -> bool {
        !self.nodes.is_empty() && self.cost.is_none()
    }

    pub fn is_valid_in<G>(&self, graph: &G) -> bool
    where
        G: Graph,
    {
        is_valid_path(graph, &self.nodes)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let nodes: Vec<String> = self.nodes.iter().map(|n| n.to_string()).collect();
        write!(f, "{}", nodes.join(" -> "))
    }
}

pub(crate) fn is_valid_path<G>(graph: &G, nodes: &[Node]) -> bool
where
    G: Graph,
{
    !nodes.is_empty() && nodes.windows(2).all(|e| graph.contains_edge(e[0], e[1]))
}

/// Sum of the edge costs along `nodes`.
pub(crate) fn path_cost<G>(graph: &G, nodes: &[Node]) -> Result<Cost, Error>
where
    G: Graph,
{
    if nodes.is_empty() {
        return Err(Error::EmptyPath);
    }
    let mut cost = Cost::new(0);
    for e in nodes.windows(2) {
        cost += graph.edge_cost(e[0], e[1]).ok_or(Error::InvalidPath {
            from: e[0],
            to: e[1],
        })?;
    }
    Ok(cost)
}

/// Length of `nodes` where every missing edge counts as `penalty`.
///
/// With `penalty` above the total weight of the graph, any route over distinct nodes
/// that uses a missing edge is longer than every route that does not.
pub fn penalized_length<G>(graph: &G, nodes: &[Node], penalty: Cost) -> Cost
where
    G: Graph,
{
    nodes
        .windows(2)
        .map(|e| graph.edge_cost(e[0], e[1]).unwrap_or(penalty))
        .fold(Cost::new(0), |a, b| a.saturating_add(b))
}

#[cfg(test)]
mod test_route {
    use super::*;
    use crate::graph::MatrixGraph;

    fn nodes(ids: &[usize]) -> Vec<Node> {
        ids.iter().map(|&n| Node::new(n)).collect()
    }

    ///   0 --2-- 1 --3-- 2
    fn line() -> MatrixGraph {
        let mut graph = MatrixGraph::new(3);
        graph.add_edge(0.into(), 1.into(), 2);
        graph.add_edge(1.into(), 2.into(), 3);
        graph
    }

    #[test]
    fn test_cost_from() {
        let graph = line();
        let route = Route::with_cost_from(nodes(&[0, 1, 2]), &graph);
        assert_eq!(route.cost(), Some(5.into()));
        assert_eq!(route.distance(), 5);
        assert_eq!(route.to_string(), "0 -> 1 -> 2");
        assert!(route.is_valid_in(&graph));
    }

    #[test]
    fn test_single_node_route() {
        let graph = line();
        let route = Route::with_cost_from(nodes(&[1]), &graph);
        assert_eq!(route.distance(), 0);
    }

    #[test]
    #[should_panic]
    fn test_cost_of_invalid_path_panics() {
        let graph = line();
        Route::with_cost_from(nodes(&[0, 2]), &graph);
    }

    #[test]
    fn test_try_cost_from() {
        let graph = line();
        assert_eq!(
            Route::try_cost_from(nodes(&[0, 2, 1]), &graph),
            Err(Error::InvalidPath {
                from: 0.into(),
                to: 2.into()
            })
        );
        assert_eq!(Route::try_cost_from(vec![], &graph), Err(Error::EmptyPath));
    }

    #[test]
    fn test_flagged_candidate() {
        let graph = line();
        let route = Route::from_candidate(nodes(&[1, 0, 2]), &graph);
        assert!(route.is_flagged());
        assert_eq!(route.distance(), NO_PATH);
        assert!(!Route::not_found().is_flagged());
        assert_eq!(Route::not_found().distance(), NO_PATH);
    }

    #[test]
    fn test_penalized_length() {
        let graph = line();
        assert_eq!(
            penalized_length(&graph, &nodes(&[1, 0, 2]), 100.into()),
            102.into()
        );
        assert_eq!(penalized_length(&graph, &nodes(&[0, 1, 2]), 100.into()), 5.into());
    }
}
