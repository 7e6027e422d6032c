use std::cmp::Ordering;

use binary_heap_plus::BinaryHeap;
use compare::Compare;
use fixedbitset::FixedBitSet;

use crate::{
    cost::Cost,
    graph::{Graph, Node, Route},
};

/// Orders frontier entries so that the heap pops the smallest tentative cost first.
struct FrontierOrder;

impl Compare<(Cost, Node)> for FrontierOrder {
    fn compare(&self, l: &(Cost, Node), r: &(Cost, Node)) -> Ordering {
        r.0.cmp(&l.0).then(r.1.cmp(&l.1))
    }
}

/// Shortest route from `start` to `end`, or [`Route::not_found`] if either node is not in the
/// graph or `end` is unreachable.
pub fn dijkstra_path<G>(graph: &G, start: Node, end: Node) -> Route
where
    G: Graph,
{
    if !graph.contains_node(start) || !graph.contains_node(end) {
        return Route::not_found();
    }
    let paths = shortest_paths_to(graph, start, &[end]);
    match (paths.cost_to(end), paths.path_to(end)) {
        (Some(cost), Some(path)) => Route::new(path, cost),
        _ => Route::not_found(),
    }
}

/// Runs Dijkstra from `node` until every node of `goals` has been settled.
///
/// Relaxation scans the full matrix row of the popped node, so one run is `O(n^2)`.
pub fn shortest_paths_to<G>(graph: &G, node: Node, goals: &[Node]) -> Paths
where
    G: Graph,
{
    let n = graph.n();
    if !graph.contains_node(node) {
        return Paths::empty(node);
    }

    let mut to_visit = FixedBitSet::with_capacity(n);
    for goal in goals.iter().filter(|g| graph.contains_node(**g)) {
        to_visit.insert(goal.id());
    }
    let mut remaining = to_visit.count_ones(..);

    let mut costs = vec![Cost::max(); n];
    let mut prev: Vec<Option<Node>> = vec![None; n];
    let mut settled = FixedBitSet::with_capacity(n);

    costs[node.id()] = Cost::new(0);

    let mut heap = BinaryHeap::from_vec_cmp(vec![(Cost::new(0), node)], FrontierOrder);
    while let Some((cost, u)) = heap.pop() {
        if settled.put(u.id()) || cost > costs[u.id()] {
            continue;
        }
        if to_visit.contains(u.id()) {
            remaining -= 1;
            if remaining == 0 {
                break;
            }
        }

        for v in graph.nodes() {
            if let Some(weight) = graph.edge_cost(u, v) {
                let update = cost + weight;
                if update < costs[v.id()] {
                    costs[v.id()] = update;
                    prev[v.id()] = Some(u);
                    heap.push((update, v));
                }
            }
        }
    }

    Paths { node, costs, prev }
}

/// Tentative costs and predecessors of one Dijkstra run.
pub struct Paths {
    node: Node,
    costs: Vec<Cost>,
    prev: Vec<Option<Node>>,
}

impl Paths {
    fn empty(node: Node) -> Self {
        Self {
            node,
            costs: vec![],
            prev: vec![],
        }
    }

    /// Cost of the shortest path to `n2`, `None` if unreachable.
    pub fn cost_to(&self, n2: Node) -> Option<Cost> {
        self.costs
            .get(n2.id())
            .copied()
            .filter(|&c| c != Cost::max())
    }

    pub fn path_to(&self, n2: Node) -> Option<Vec<Node>> {
        self.cost_to(n2)?;
        let mut path = vec![n2];
        let mut n = n2;
        while n != self.node {
            n = self.prev[n.id()]?;
            path.push(n);
        }
        path.reverse();
        Some(path)
    }
}

#[cfg(test)]
mod test_dijkstra {
    use super::*;
    use crate::graph::{MatrixGraph, NO_PATH};

    fn nodes(ids: &[usize]) -> Vec<Node> {
        ids.iter().map(|&n| Node::new(n)).collect()
    }

    ///   A --5-- B
    ///  |3|  2  |1|
    ///   C --4-- D      E
    #[test]
    fn test_cities() {
        let mut graph = MatrixGraph::new(5);
        graph.add_edge(0.into(), 1.into(), 5);
        graph.add_edge(0.into(), 2.into(), 3);
        graph.add_edge(1.into(), 2.into(), 2);
        graph.add_edge(1.into(), 3.into(), 1);
        graph.add_edge(2.into(), 3.into(), 4);

        let route = dijkstra_path(&graph, 0.into(), 3.into());
        assert_eq!(route.distance(), 6);
        let found = route.nodes().to_vec();
        assert!(found == nodes(&[0, 1, 3]) || found == nodes(&[0, 2, 1, 3]));
        assert!(route.is_valid_in(&graph));
    }

    #[test]
    fn test_unreachable() {
        let mut graph = MatrixGraph::new(5);
        graph.add_edge(0.into(), 1.into(), 5);
        graph.add_edge(1.into(), 3.into(), 1);

        let route = dijkstra_path(&graph, 0.into(), 4.into());
        assert!(route.is_empty());
        assert_eq!(route.distance(), NO_PATH);
    }

    #[test]
    fn test_out_of_range() {
        let mut graph = MatrixGraph::new(2);
        graph.add_edge(0.into(), 1.into(), 5);

        assert_eq!(dijkstra_path(&graph, 0.into(), 2.into()), Route::not_found());
        assert_eq!(dijkstra_path(&graph, 7.into(), 1.into()), Route::not_found());
    }

    #[test]
    fn test_start_is_end() {
        let mut graph = MatrixGraph::new(2);
        graph.add_edge(0.into(), 1.into(), 5);

        let route = dijkstra_path(&graph, 1.into(), 1.into());
        assert_eq!(route.nodes(), nodes(&[1]).as_slice());
        assert_eq!(route.distance(), 0);
    }

    ///   0 --6-- 1 --1-- 2
    ///  |3|     |1|     |3|
    ///   3 --1-- 4 --6-- 5
    #[test]
    fn test_multiple_goals() {
        let mut graph = MatrixGraph::new(6);
        graph.add_edge(0.into(), 1.into(), 6);
        graph.add_edge(0.into(), 3.into(), 3);
        graph.add_edge(1.into(), 4.into(), 1);
        graph.add_edge(1.into(), 2.into(), 1);
        graph.add_edge(2.into(), 5.into(), 3);
        graph.add_edge(3.into(), 4.into(), 1);
        graph.add_edge(4.into(), 5.into(), 6);

        let paths = shortest_paths_to(&graph, 0.into(), &[1.into(), 2.into()]);

        assert_eq!(paths.cost_to(1.into()), Some(5.into()));
        assert_eq!(paths.cost_to(2.into()), Some(6.into()));
        assert_eq!(paths.path_to(2.into()), Some(nodes(&[0, 3, 4, 1, 2])));
    }
}
