use crate::{
    graph::{penalized_length, Graph, Node},
    Cost,
};

/// Exhaustive 2-opt on a route with fixed end nodes.
///
/// Lengths are penalized lengths (see [`penalized_length`]), so the search also drives routes
/// away from missing edges. Every accepted reversal strictly shortens the route; the search
/// stops at the first route none of whose reversals does.
pub struct TwoOpt<'b, G> {
    current_route: Vec<Node>,
    current_cost: Cost,
    start_cost: Cost,
    iteration: usize,
    graph: &'b G,
    penalty: Cost,
}

impl<'b, G> TwoOpt<'b, G>
where
    G: Graph,
{
    pub fn new(route: Vec<Node>, graph: &'b G, penalty: Cost) -> Self {
        let cost = penalized_length(graph, &route, penalty);
        TwoOpt {
            current_route: route,
            current_cost: cost,
            start_cost: cost,
            iteration: 0,
            graph,
            penalty,
        }
    }

    pub fn current_cost(&self) -> Cost {
        self.current_cost
    }

    pub fn run(mut self) -> (Vec<Node>, Cost) {
        let n = self.current_route.len();
        'iter: loop {
            // Reversing [i, k) keeps node 0 and node n - 1 in place.
            for i in 1..n.saturating_sub(1) {
                for k in i + 2..n {
                    if self.reversal_delta(i, k) < 0 {
                        two_opt_swap(&mut self.current_route, i, k);
                        self.current_cost =
                            penalized_length(self.graph, &self.current_route, self.penalty);
                        self.iteration += 1;
                        continue 'iter;
                    }
                }
            }
            break 'iter;
        }
        log::trace!(
            "2-OPT results after {} iterations: {} -> {}",
            self.iteration,
            self.start_cost,
            self.current_cost
        );
        (self.current_route, self.current_cost)
    }

    /// Change of length when reversing `[i, k)`: edges `(i-1, i)` and `(k-1, k)` are replaced by
    /// `(i-1, k-1)` and `(i, k)`.
    fn reversal_delta(&self, i: usize, k: usize) -> i64 {
        let r = &self.current_route;
        let w = |a: Node, b: Node| self.graph.edge_cost(a, b).unwrap_or(self.penalty);
        let removed = w(r[i - 1], r[i]).saturating_add(w(r[k - 1], r[k]));
        let added = w(r[i - 1], r[k - 1]).saturating_add(w(r[i], r[k]));
        added.delta(removed)
    }
}

fn two_opt_swap(nodes: &mut [Node], i: usize, k: usize) {
    let (_, second) = nodes.split_at_mut(i);
    let (middle, _) = second.split_at_mut(k - i);
    middle.reverse();
}
