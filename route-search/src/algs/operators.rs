//! Route construction and recombination shared by the randomized searches.
//!
//! Candidate routes here are plain node sequences `[start, interior.., end]`; their validity
//! is decided by the caller.

use fixedbitset::FixedBitSet;
use rand::{seq::SliceRandom, Rng};

use crate::{
    graph::{Graph, Node},
    Cost,
};

/// Missing edges are priced above the total weight, so any route over distinct nodes
/// that needs one loses against every route that does not.
pub(crate) fn missing_edge_penalty<G>(graph: &G) -> Cost
where
    G: Graph,
{
    graph.total_weight() + Cost::new(1)
}

/// `[start, shuffled interior.., end]` where the interior is every other node of the graph.
pub(crate) fn random_permutation<G, R>(graph: &G, start: Node, end: Node, rng: &mut R) -> Vec<Node>
where
    G: Graph,
    R: Rng + ?Sized,
{
    let mut interior: Vec<Node> = graph.nodes().filter(|&n| n != start && n != end).collect();
    interior.shuffle(rng);
    let mut path = Vec::with_capacity(interior.len() + 2);
    path.push(start);
    path.append(&mut interior);
    path.push(end);
    path
}

/// Walks from `start` to the nearest unvisited neighbor until none is left, then appends `end`.
///
/// With `rcl_size > 1` the next node is drawn uniformly from the `rcl_size` nearest
/// unvisited neighbors. `end` is never entered before the final step, so the last hop
/// may lack an edge.
pub(crate) fn greedy_walk<G, R>(
    graph: &G,
    start: Node,
    end: Node,
    rcl_size: usize,
    rng: &mut R,
) -> Vec<Node>
where
    G: Graph,
    R: Rng + ?Sized,
{
    let mut visited = FixedBitSet::with_capacity(graph.n());
    visited.insert(start.id());
    visited.insert(end.id());

    let mut path = vec![start];
    loop {
        let last = path[path.len() - 1];
        let mut candidates: Vec<(Cost, Node)> = graph
            .nodes()
            .filter(|n| !visited.contains(n.id()))
            .filter_map(|n| graph.edge_cost(last, n).map(|c| (c, n)))
            .collect();
        if candidates.is_empty() {
            break;
        }
        candidates.sort_unstable();
        let pick = rng.gen_range(0..rcl_size.max(1).min(candidates.len()));
        let next = candidates[pick].1;
        visited.insert(next.id());
        path.push(next);
    }
    if start != end {
        path.push(end);
    }
    path
}

/// Inserts every node missing from `path` in random order right before its end node, so that
/// all routes of a population are permutations of the same node set.
pub(crate) fn complete_permutation<G, R>(graph: &G, path: &mut Vec<Node>, rng: &mut R)
where
    G: Graph,
    R: Rng + ?Sized,
{
    let mut present = FixedBitSet::with_capacity(graph.n());
    for node in path.iter() {
        present.insert(node.id());
    }
    let mut missing: Vec<Node> = graph.nodes().filter(|n| !present.contains(n.id())).collect();
    if missing.is_empty() {
        return;
    }
    missing.shuffle(rng);
    let end = path.pop();
    path.append(&mut missing);
    path.extend(end);
}

/// Order crossover of two permutations of the same node set.
///
/// A random slice of `parent1` is copied in place; the free slots are filled left to right with
/// the nodes of `parent2` not yet in the child, in `parent2` order. With `fixed_ends` the slice
/// is drawn from the interior and both end nodes stay where they are.
pub(crate) fn order_crossover<R>(
    parent1: &[Node],
    parent2: &[Node],
    fixed_ends: bool,
    rng: &mut R,
) -> Vec<Node>
where
    R: Rng + ?Sized,
{
    let len = parent1.len();
    debug_assert_eq!(len, parent2.len());
    let (lo, hi) = if fixed_ends {
        (1, len.saturating_sub(2))
    } else {
        (0, len.saturating_sub(1))
    };
    if len == 0 || lo > hi {
        return parent1.to_vec();
    }

    let capacity = parent1.iter().chain(parent2).map(|n| n.id() + 1).max().unwrap_or(0);
    let mut used = FixedBitSet::with_capacity(capacity);
    let mut child: Vec<Option<Node>> = vec![None; len];

    if fixed_ends {
        for &i in &[0, len - 1] {
            child[i] = Some(parent1[i]);
            used.insert(parent1[i].id());
        }
    }

    let a = rng.gen_range(lo..=hi);
    let b = rng.gen_range(lo..=hi);
    let (a, b) = (a.min(b), a.max(b));
    for i in a..=b {
        child[i] = Some(parent1[i]);
        used.insert(parent1[i].id());
    }

    let mut free = 0;
    for &node in parent2 {
        if used.contains(node.id()) {
            continue;
        }
        while free < len && child[free].is_some() {
            free += 1;
        }
        if free < len {
            child[free] = Some(node);
            used.insert(node.id());
        }
    }

    let child: Vec<Node> = child.into_iter().flatten().collect();
    debug_assert_eq!(child.len(), len);
    child
}

/// Swaps two distinct interior positions. Routes with fewer than two interior nodes are kept.
pub(crate) fn swap_mutation<R>(path: &mut [Node], rng: &mut R)
where
    R: Rng + ?Sized,
{
    if path.len() < 4 {
        return;
    }
    let (i, j) = distinct_interior_pair(path.len(), rng);
    path.swap(i, j);
}

/// Two distinct positions from `1..len - 1`. Requires `len >= 4`.
pub(crate) fn distinct_interior_pair<R>(len: usize, rng: &mut R) -> (usize, usize)
where
    R: Rng + ?Sized,
{
    let i = rng.gen_range(1..len - 1);
    let mut j = rng.gen_range(1..len - 2);
    if j >= i {
        j += 1;
    }
    (i.min(j), i.max(j))
}
