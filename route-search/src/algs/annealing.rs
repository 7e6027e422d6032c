use rand::Rng;

use crate::{
    config::AnnealingConfig,
    graph::{penalized_length, Graph, Node, Route},
    Cost,
};

use super::operators::{distinct_interior_pair, greedy_walk, missing_edge_penalty};

/// Greedy nearest-neighbor route refined by simulated annealing over interior swaps.
///
/// When the greedy walk gets stuck it is closed by appending `end` directly. If the refinement
/// cannot repair such a route, it is returned flagged (see [`Route::is_flagged`]).
pub fn annealing_search<G, R>(
    graph: &G,
    start: Node,
    end: Node,
    config: &AnnealingConfig,
    rng: &mut R,
) -> Route
where
    G: Graph,
    R: Rng + ?Sized,
{
    if !graph.contains_node(start) || !graph.contains_node(end) {
        return Route::not_found();
    }
    if start == end {
        return Route::new(vec![start], Cost::new(0));
    }

    let mut current = greedy_walk(graph, start, end, 1, rng);
    let penalty = missing_edge_penalty(graph);
    let mut current_len = penalized_length(graph, &current, penalty);
    let mut best = current.clone();
    let mut best_len = current_len;

    log::debug!(
        "Starting annealing from a greedy route of {} nodes, length {}.",
        current.len(),
        current_len
    );

    if current.len() >= 4 {
        let mut temperature = config.initial_temperature;
        let mut accepted = 0usize;
        for _ in 0..config.iterations {
            let (i, j) = distinct_interior_pair(current.len(), rng);
            let delta = swap_delta(graph, &current, i, j, penalty);

            let accept = if delta < 0 {
                true
            } else if temperature > 0.0 {
                rng.gen::<f64>() < (-(delta as f64) / temperature).exp()
            } else {
                false
            };

            if accept {
                current.swap(i, j);
                current_len = Cost::new((current_len.get() as i64 + delta) as u64);
                accepted += 1;
                if current_len < best_len {
                    best.clone_from(&current);
                    best_len = current_len;
                }
            }
            temperature *= config.cooling_rate;
        }
        log::debug!(
            "Annealing accepted {}/{} swaps, best length {}.",
            accepted,
            config.iterations,
            best_len
        );
    }

    // Lengths were tracked incrementally; the route cost is recomputed from the edges.
    Route::from_candidate(best, graph)
}

/// Change of the penalized length when swapping the nodes at interior positions `i < j`.
///
/// Only the edges touching the two positions are looked at. Edge `k` joins `path[k]` and
/// `path[k + 1]`.
fn swap_delta<G>(graph: &G, path: &[Node], i: usize, j: usize, penalty: Cost) -> i64
where
    G: Graph,
{
    let mut touched = [i - 1, i, j - 1, j];
    touched.sort_unstable();

    let at = |k: usize| {
        if k == i {
            path[j]
        } else if k == j {
            path[i]
        } else {
            path[k]
        }
    };
    let weight = |a: Node, b: Node| graph.edge_cost(a, b).unwrap_or(penalty);

    let mut before = Cost::new(0);
    let mut after = Cost::new(0);
    for (idx, &k) in touched.iter().enumerate() {
        if idx > 0 && touched[idx - 1] == k {
            continue;
        }
        before = before.saturating_add(weight(path[k], path[k + 1]));
        after = after.saturating_add(weight(at(k), at(k + 1)));
    }
    after.delta(before)
}
