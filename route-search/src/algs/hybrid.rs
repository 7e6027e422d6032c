use rand::Rng;

use crate::{
    config::HybridConfig,
    graph::{penalized_length, Graph, Node, Route},
    two_opt::TwoOpt,
    Cost,
};

use super::operators::{complete_permutation, greedy_walk, missing_edge_penalty, order_crossover};

/// Genetic search over greedily seeded routes in which every offspring is improved by 2-opt.
///
/// Parents and offspring compete for survival on their penalized length, so individuals using a
/// missing edge are dropped first. Returns [`Route::not_found`] if even the best survivor is not
/// a path of `graph`.
pub fn hybrid_search<G, R>(
    graph: &G,
    start: Node,
    end: Node,
    config: &HybridConfig,
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
    let size = config.population_size.max(1);
    let penalty = missing_edge_penalty(graph);

    let mut population: Vec<(Cost, Vec<Node>)> = (0..size)
        .map(|_| {
            let mut path = greedy_walk(graph, start, end, config.rcl_size, rng);
            complete_permutation(graph, &mut path, rng);
            (penalized_length(graph, &path, penalty), path)
        })
        .collect();
    population.sort_unstable();

    log::debug!(
        "Starting hybrid search: {} individuals, {} generations, best seed {}.",
        size,
        config.generations,
        population[0].0
    );

    for generation in 0..config.generations {
        let mut offspring = Vec::with_capacity(size);
        for _ in 0..size {
            let p1 = &population[rng.gen_range(0..population.len())].1;
            let p2 = &population[rng.gen_range(0..population.len())].1;
            let child = order_crossover(p1, p2, true, rng);
            let (child, cost) = TwoOpt::new(child, graph, penalty).run();
            offspring.push((cost, child));
        }

        population.append(&mut offspring);
        population.sort_unstable();
        population.truncate(size);
        log::trace!(
            "Generation {}/{}: {}",
            generation + 1,
            config.generations,
            population[0].0
        );
    }

    let (length, best) = population.swap_remove(0);
    match Route::try_cost_from(best, graph) {
        Ok(route) => {
            debug_assert_eq!(route.cost(), Some(length));
            route
        }
        Err(err) => {
            log::debug!("Hybrid search found no valid route: {}", err);
            Route::not_found()
        }
    }
}

#[cfg(test)]
mod test_hybrid {
    use super::*;
    use crate::{dijkstra::dijkstra_path, graph::MatrixGraph};
    use rand::{rngs::StdRng, SeedableRng};

    fn complete_graph(n: usize, rng: &mut StdRng) -> MatrixGraph {
        let mut graph = MatrixGraph::new(n);
        for i in 0..n {
            for j in i + 1..n {
                graph.add_edge(i.into(), j.into(), rng.gen_range(1..100));
            }
        }
        graph
    }

    #[test]
    fn test_valid_route_on_complete_graph() {
        let mut rng = StdRng::seed_from_u64(21);
        let graph = complete_graph(10, &mut rng);
        let config = HybridConfig::default()
            .with_population_size(10)
            .with_generations(10);

        let route = hybrid_search(&graph, 2.into(), 5.into(), &config, &mut rng);
        assert!(route.is_valid_in(&graph));
        assert_eq!(route.first(), Some(2.into()));
        assert_eq!(route.last(), Some(5.into()));
        assert_eq!(route.len(), 10);
        assert!(dijkstra_path(&graph, 2.into(), 5.into()).distance() <= route.distance());
    }

    ///   0 --1-- 1 --1-- 2 --1-- 3 --1-- 4, plus expensive chords 0-2, 1-3, 2-4
    #[test]
    fn test_finds_hamiltonian_line() {
        let mut graph = MatrixGraph::new(5);
        for i in 0..4usize {
            graph.add_edge(i.into(), (i + 1).into(), 1);
        }
        for i in 0..3usize {
            graph.add_edge(i.into(), (i + 2).into(), 9);
        }
        let mut rng = StdRng::seed_from_u64(5);
        let config = HybridConfig::default()
            .with_population_size(6)
            .with_generations(5);

        let route = hybrid_search(&graph, 0.into(), 4.into(), &config, &mut rng);
        assert_eq!(route.distance(), 4);
    }

    #[test]
    fn test_no_valid_route() {
        let mut graph = MatrixGraph::new(4);
        graph.add_edge(0.into(), 1.into(), 1);
        graph.add_edge(1.into(), 2.into(), 1);
        let mut rng = StdRng::seed_from_u64(2);
        let config = HybridConfig::default()
            .with_population_size(4)
            .with_generations(3);

        let route = hybrid_search(&graph, 0.into(), 3.into(), &config, &mut rng);
        assert_eq!(route, Route::not_found());
    }

    #[test]
    fn test_invalid_endpoints() {
        let graph = MatrixGraph::new(3);
        let mut rng = StdRng::seed_from_u64(1);
        let route = hybrid_search(&graph, 0.into(), 9.into(), &HybridConfig::default(), &mut rng);
        assert_eq!(route.distance(), -1);
        assert!(route.is_empty());
    }
}
